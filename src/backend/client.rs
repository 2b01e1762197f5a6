//! HTTP client for the agent/document service.
//!
//! Every call is a single request with no retry. Callers only distinguish
//! success from failure; the error variants exist for logging.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};

use super::types::{DocumentMeta, NewAgent, UploadReceipt};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout.
    Network(String),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The local file could not be read.
    Io(String),
    /// The service answered 2xx with a body we could not decode.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            BackendError::Io(msg) => write!(f, "I/O error: {msg}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// `POST /agents`.
    async fn create_agent(&self, agent: &NewAgent) -> Result<(), BackendError>;

    /// `POST /upload` with the file as multipart field `file`.
    async fn upload_document(&self, path: &Path) -> Result<UploadReceipt, BackendError>;

    /// `GET /documents`.
    async fn list_documents(&self) -> Result<Vec<DocumentMeta>, BackendError>;
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {e}");
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into `BackendError::Status`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    debug!("Backend response status: {status}");
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AgentBackend for HttpBackend {
    async fn create_agent(&self, agent: &NewAgent) -> Result<(), BackendError> {
        info!(
            "Creating agent '{}' ({} capabilities)",
            agent.name,
            agent.capabilities.len()
        );
        let response = self
            .client
            .post(self.url("agents"))
            .json(agent)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn upload_document(&self, path: &Path) -> Result<UploadReceipt, BackendError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BackendError::Io(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        info!("Uploading '{}' ({} bytes)", file_name, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        // The receipt is informational; an unexpected body is still a success.
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<UploadReceipt>(&text) {
            Ok(receipt) => {
                debug!("Upload receipt: {:?}", receipt);
                Ok(receipt)
            }
            Err(e) => {
                debug!("Upload response was not a receipt ({e}): {text}");
                Ok(UploadReceipt::default())
            }
        }
    }

    async fn list_documents(&self) -> Result<Vec<DocumentMeta>, BackendError> {
        let response = self
            .client
            .get(self.url("documents"))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let response = check_status(response).await?;
        let documents: Vec<DocumentMeta> = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        info!("Loaded {} documents", documents.len());
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(backend.url("agents"), "http://localhost:8000/agents");
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("a.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn status_error_display() {
        let err = BackendError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}

//! # Modal Dialogs
//!
//! Form state for the Add Agent and Upload Document modals. Each form owns
//! its fields and a `pending` flag covering its own in-flight request; no
//! other component reads either.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::backend::NewAgent;

/// Extensions the upload form accepts (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "doc", "docx"];
/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    AddAgent(AddAgentForm),
    Upload(UploadForm),
}

impl Dialog {
    pub fn is_pending(&self) -> bool {
        match self {
            Dialog::AddAgent(form) => form.pending,
            Dialog::Upload(form) => form.pending,
        }
    }
}

// ============================================================================
// Add Agent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentField {
    #[default]
    Name,
    Description,
    Capabilities,
}

impl AgentField {
    pub fn next(self) -> Self {
        match self {
            AgentField::Name => AgentField::Description,
            AgentField::Description => AgentField::Capabilities,
            AgentField::Capabilities => AgentField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AgentField::Name => AgentField::Capabilities,
            AgentField::Description => AgentField::Name,
            AgentField::Capabilities => AgentField::Description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddAgentForm {
    pub name: String,
    pub description: String,
    /// Comma-separated, as typed.
    pub capabilities: String,
    pub focus: AgentField,
    pub pending: bool,
    /// Inline validation message.
    pub error: Option<String>,
}

impl AddAgentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_mut(&mut self, field: AgentField) -> &mut String {
        match field {
            AgentField::Name => &mut self.name,
            AgentField::Description => &mut self.description,
            AgentField::Capabilities => &mut self.capabilities,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        self.field_mut(self.focus)
    }

    /// Build the request, or record why the form cannot be sent.
    /// Every field is required.
    pub fn request(&mut self) -> Option<NewAgent> {
        let missing = [
            ("name", &self.name),
            ("description", &self.description),
            ("capabilities", &self.capabilities),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label);

        if let Some(label) = missing {
            self.error = Some(format!("Please fill in the {label} field"));
            return None;
        }
        self.error = None;
        Some(NewAgent::from_form(
            &self.name,
            &self.description,
            &self.capabilities,
        ))
    }
}

// ============================================================================
// Upload Document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    Missing,
    NotFound(String),
    UnsupportedType(String),
    TooLarge(u64),
    Unreadable(String),
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::Missing => write!(f, "Choose a file to upload"),
            UploadRejection::NotFound(p) => write!(f, "No such file: {p}"),
            UploadRejection::UnsupportedType(p) => {
                write!(f, "Unsupported file type: {p} (PDF, TXT, DOC, DOCX)")
            }
            UploadRejection::TooLarge(size) => write!(
                f,
                "File is {:.1} MB (max 10 MB)",
                *size as f64 / (1024.0 * 1024.0)
            ),
            UploadRejection::Unreadable(msg) => write!(f, "Cannot read file: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    /// Path as typed; `~/` expands to the home directory.
    pub path: String,
    pub pending: bool,
    pub error: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and check the typed path, recording any rejection inline.
    pub fn request(&mut self) -> Option<PathBuf> {
        match validate_upload(&self.path) {
            Ok(path) => {
                self.error = None;
                Some(path)
            }
            Err(rejection) => {
                self.error = Some(rejection.to_string());
                None
            }
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Check that `raw` names an existing file of an accepted type and size.
pub fn validate_upload(raw: &str) -> Result<PathBuf, UploadRejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UploadRejection::Missing);
    }
    let path = expand_home(raw);

    let accepted = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });
    if !accepted {
        return Err(UploadRejection::UnsupportedType(raw.to_string()));
    }

    let meta = match fs::metadata(&path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(UploadRejection::NotFound(raw.to_string()));
        }
        Err(e) => return Err(UploadRejection::Unreadable(e.to_string())),
    };
    if !meta.is_file() {
        return Err(UploadRejection::NotFound(raw.to_string()));
    }
    if meta.len() > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge(meta.len()));
    }
    Ok(path)
}

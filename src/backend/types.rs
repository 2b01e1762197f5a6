use serde::{Deserialize, Serialize};

/// Body of `POST /agents`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub capabilities: Vec<String>,
}

impl NewAgent {
    /// Build a request from raw form input. Capabilities are split on commas and
    /// trimmed; empty tokens are kept so the server sees exactly what was typed.
    pub fn from_form(name: &str, description: &str, capabilities: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            capabilities: split_capabilities(capabilities),
        }
    }
}

pub fn split_capabilities(raw: &str) -> Vec<String> {
    raw.split(',').map(|cap| cap.trim().to_string()).collect()
}

/// One entry of `GET /documents`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub filename: String,
    pub upload_date: String,
    pub document_id: String,
}

/// Success body of `POST /upload`. Only logged; no field is required.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_are_split_and_trimmed() {
        let req = NewAgent::from_form("Researcher", "Finds things", " research, analysis ,writing");
        assert_eq!(req.capabilities, vec!["research", "analysis", "writing"]);
    }

    #[test]
    fn empty_tokens_are_kept() {
        assert_eq!(split_capabilities("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_capabilities(""), vec![""]);
    }

    #[test]
    fn new_agent_serializes_expected_shape() {
        let req = NewAgent::from_form("n", "d", "x");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "n", "description": "d", "capabilities": ["x"]})
        );
    }

    #[test]
    fn receipt_tolerates_missing_fields() {
        let receipt: UploadReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt, UploadReceipt::default());
    }
}

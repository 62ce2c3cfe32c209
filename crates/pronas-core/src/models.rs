//! Domain models for the document analysis workflow.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Component, Path};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user-selected file pending analysis.
///
/// The payload uses [`Bytes`] so the workflow can hand a copy to the HTTP
/// layer while keeping the selected artifact without duplicating the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: String,
    pub payload: Bytes,
}

impl Artifact {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Read an artifact from a local file path, inferring the media type
    /// from the extension.
    pub fn from_path(file_path: &str) -> anyhow::Result<Self> {
        let path = Path::new(file_path);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
        }

        let payload = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", file_path, e))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("documento.pdf")
            .to_string();

        let media_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        }
        .to_string();

        Ok(Self {
            file_name,
            media_type,
            payload: Bytes::from(payload),
        })
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// Analysis report returned by the gateway.
///
/// The schema is owned by the external analysis service, so the report is an
/// opaque JSON object. Typed accessors are best-effort views over the fields
/// the service is known to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport(Map<String, Value>);

impl AnalysisReport {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Name of the analyzed file, when echoed back by the service.
    pub fn filename(&self) -> Option<&str> {
        self.0.get("filename").and_then(Value::as_str)
    }

    /// Text extracted from the document by OCR, when present.
    pub fn extracted_text(&self) -> Option<&str> {
        self.0.get("extracted_text").and_then(Value::as_str)
    }

    /// Predicted compliance score, when present.
    pub fn compliance_score(&self) -> Option<f64> {
        self.0.get("compliance_score").and_then(Value::as_f64)
    }

    /// Bias warnings raised by the service, when present.
    pub fn bias_warnings(&self) -> Vec<&str> {
        self.0
            .get("bias_warnings")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for AnalysisReport {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Current phase of a document submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded { report: AnalysisReport },
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Whether the state is a terminal outcome (succeeded or failed).
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. }
        )
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            SubmissionState::Succeeded { report } => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

impl Display for SubmissionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::Succeeded { .. } => write!(f, "succeeded"),
            SubmissionState::Failed { .. } => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: Value) -> AnalysisReport {
        match value {
            Value::Object(map) => AnalysisReport::new(map),
            _ => panic!("expected JSON object"),
        }
    }

    #[test]
    fn test_report_typed_accessors() {
        let report = report(json!({
            "filename": "projeto.pdf",
            "extracted_text": "texto extraido",
            "compliance_score": 0.75,
            "bias_warnings": ["termo 'apenas' detectado"],
        }));

        assert_eq!(report.filename(), Some("projeto.pdf"));
        assert_eq!(report.extracted_text(), Some("texto extraido"));
        assert_eq!(report.compliance_score(), Some(0.75));
        assert_eq!(report.bias_warnings(), vec!["termo 'apenas' detectado"]);
    }

    #[test]
    fn test_report_missing_fields() {
        let report = report(json!({"result": "ok"}));
        assert_eq!(report.filename(), None);
        assert_eq!(report.compliance_score(), None);
        assert!(report.bias_warnings().is_empty());
        assert_eq!(report.get("result"), Some(&json!("ok")));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SubmissionState::Idle.to_string(), "idle");
        assert_eq!(SubmissionState::Submitting.to_string(), "submitting");
        assert_eq!(
            SubmissionState::Failed {
                message: "erro".to_string()
            }
            .to_string(),
            "failed"
        );
    }

    #[test]
    fn test_state_accessors() {
        let ok = SubmissionState::Succeeded {
            report: report(json!({"result": "ok"})),
        };
        assert!(ok.is_settled());
        assert!(ok.report().is_some());
        assert_eq!(ok.error_message(), None);

        let failed = SubmissionState::Failed {
            message: "erro".to_string(),
        };
        assert!(failed.is_settled());
        assert_eq!(failed.error_message(), Some("erro"));
    }

    #[test]
    fn test_artifact_from_path_rejects_parent_dir() {
        assert!(Artifact::from_path("../etc/passwd").is_err());
    }
}

//! Artifact validation
//!
//! Client-side validation mirroring the checks the gateway applies before
//! accepting a document, so obviously bad selections never reach the wire.

use std::path::Path;

use crate::error::AnalysisError;
use crate::models::Artifact;

const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Validates a selected artifact against the accepted media types.
#[derive(Clone, Debug)]
pub struct ArtifactValidator {
    accepted_media_types: Vec<String>,
}

impl ArtifactValidator {
    pub fn new(accepted_media_types: Vec<String>) -> Self {
        Self {
            accepted_media_types: accepted_media_types
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    /// Validator accepting only PDF documents, the single type the analysis
    /// gateway processes.
    pub fn pdf_only() -> Self {
        Self::new(vec![PDF_MEDIA_TYPE.to_string()])
    }

    pub fn accepted_media_types(&self) -> &[String] {
        &self.accepted_media_types
    }

    /// Validate media type, payload and filename of a candidate artifact.
    pub fn validate(&self, artifact: &Artifact) -> Result<(), AnalysisError> {
        if artifact.payload.is_empty() {
            return Err(AnalysisError::InvalidArtifact(format!(
                "empty payload: {}",
                artifact.file_name
            )));
        }

        let media_type = artifact.media_type.to_lowercase();
        if !self.accepted_media_types.contains(&media_type) {
            tracing::debug!(
                file_name = %artifact.file_name,
                media_type = %artifact.media_type,
                "rejected artifact with unsupported media type"
            );
            return Err(AnalysisError::InvalidArtifact(format!(
                "unsupported media type: {}",
                artifact.media_type
            )));
        }

        // The gateway rejects non-.pdf filenames with HTTP 400, so catch the
        // mismatch locally when the accepted type is PDF.
        if media_type == PDF_MEDIA_TYPE {
            let extension = Path::new(&artifact.file_name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());
            if extension.as_deref() != Some("pdf") {
                return Err(AnalysisError::InvalidArtifact(format!(
                    "filename does not end in .pdf: {}",
                    artifact.file_name
                )));
            }
        }

        Ok(())
    }
}

impl Default for ArtifactValidator {
    fn default() -> Self {
        Self::pdf_only()
    }
}

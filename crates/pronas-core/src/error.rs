//! Error types module
//!
//! All failures of the analysis workflow are unified under [`AnalysisError`].
//! Internal messages are developer-facing; every variant also maps to the
//! fixed user-facing message shown by the UI via [`AnalysisError::user_message`].

/// Fixed user-facing messages (the gateway serves a Brazilian program, so
/// these are Portuguese, matching what the service itself returns in `detail`).
pub const MSG_INVALID_ARTIFACT: &str = "Por favor, selecione um arquivo PDF.";
pub const MSG_NO_ARTIFACT: &str = "Nenhum arquivo selecionado.";
pub const MSG_ANALYSIS_FAILED: &str = "Falha ao analisar o documento.";
pub const MSG_GATEWAY_UNREACHABLE: &str = "Não foi possível conectar ao serviço de análise.";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Selected artifact failed validation (wrong media type, empty payload).
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Submission attempted with no artifact selected.
    #[error("no artifact selected")]
    NoArtifact,

    /// Gateway answered with a non-success HTTP status. `message` is the
    /// `detail` field extracted from the response body when parsable,
    /// otherwise the generic fallback.
    #[error("gateway returned status {status}: {message}")]
    Gateway { status: u16, message: String },

    /// Transport-level fault: no connectivity, timeout, malformed URL.
    #[error("could not reach analysis gateway: {0}")]
    Transport(String),
}

impl AnalysisError {
    /// Single human-readable message surfaced to the user. Gateway errors
    /// pass the service's own detail through; everything else is fixed.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InvalidArtifact(_) => MSG_INVALID_ARTIFACT.to_string(),
            AnalysisError::NoArtifact => MSG_NO_ARTIFACT.to_string(),
            AnalysisError::Gateway { message, .. } => {
                if message.is_empty() {
                    MSG_ANALYSIS_FAILED.to_string()
                } else {
                    message.clone()
                }
            }
            AnalysisError::Transport(_) => MSG_GATEWAY_UNREACHABLE.to_string(),
        }
    }

    /// Whether the failure happened before any network call was made.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidArtifact(_) | AnalysisError::NoArtifact
        )
    }
}

//! Document submission workflow.
//!
//! [`UploadWorkflow`] owns the lifecycle of one document submission: artifact
//! selection and validation, a single outbound analysis request, and the
//! settled success/failure state. The state machine is the sole source of
//! truth for whether a request is in flight; a second `submit` while one is
//! outstanding is rejected as a no-op, so at most one request per artifact
//! ever reaches the gateway.
//!
//! Errors never propagate past the workflow: every failure kind settles into
//! [`SubmissionState::Failed`] with a single user-facing message.

use anyhow::Result;
use tokio::sync::Mutex;
use uuid::Uuid;

use pronas_core::error::AnalysisError;

// Re-exported so workflow consumers need a single dependency.
pub use pronas_analysis_client::AnalysisClient;
pub use pronas_core::{
    AnalysisReport, Artifact, ArtifactValidator, DocumentAnalyzer, GatewayConfig, SubmissionState,
};

#[derive(Default)]
struct Inner {
    artifact: Option<Artifact>,
    state: SubmissionState,
}

/// State machine for a single document submission.
///
/// Methods take `&self`; shared state sits behind a mutex that is never held
/// across the analysis await, so concurrent callers observe the `Submitting`
/// guard instead of blocking on each other.
pub struct UploadWorkflow<A: DocumentAnalyzer> {
    analyzer: A,
    validator: ArtifactValidator,
    inner: Mutex<Inner>,
}

impl UploadWorkflow<AnalysisClient> {
    /// Workflow wired to the real gateway client.
    pub fn with_gateway(config: GatewayConfig) -> Result<Self> {
        Ok(Self::new(AnalysisClient::new(config)?))
    }

    /// Workflow wired to the gateway configured via the environment.
    pub fn from_env() -> Result<Self> {
        Self::with_gateway(GatewayConfig::from_env())
    }
}

impl<A: DocumentAnalyzer> UploadWorkflow<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_validator(analyzer, ArtifactValidator::pdf_only())
    }

    pub fn with_validator(analyzer: A, validator: ArtifactValidator) -> Self {
        Self {
            analyzer,
            validator,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Current state snapshot.
    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.state.clone()
    }

    pub async fn has_artifact(&self) -> bool {
        self.inner.lock().await.artifact.is_some()
    }

    pub async fn artifact_name(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .artifact
            .as_ref()
            .map(|a| a.file_name.clone())
    }

    /// Validate and store a candidate artifact.
    ///
    /// A valid candidate replaces any previously held artifact and clears a
    /// settled result or error. An invalid candidate is not retained and the
    /// workflow settles into `Failed` with the fixed validation message.
    /// While a submission is in flight the selection is rejected as a no-op.
    pub async fn select_artifact(&self, candidate: Artifact) -> SubmissionState {
        let mut inner = self.inner.lock().await;
        if inner.state.is_submitting() {
            tracing::debug!(
                file_name = %candidate.file_name,
                "selection ignored: submission in flight"
            );
            return inner.state.clone();
        }

        match self.validator.validate(&candidate) {
            Ok(()) => {
                tracing::debug!(
                    file_name = %candidate.file_name,
                    size = candidate.size(),
                    "artifact selected"
                );
                inner.artifact = Some(candidate);
                inner.state = SubmissionState::Idle;
            }
            Err(err) => {
                tracing::debug!(
                    file_name = %candidate.file_name,
                    error = %err,
                    "artifact rejected"
                );
                inner.artifact = None;
                inner.state = SubmissionState::Failed {
                    message: err.user_message(),
                };
            }
        }
        inner.state.clone()
    }

    /// Submit the held artifact for analysis.
    ///
    /// Performs exactly one outbound request per accepted call and suspends
    /// until it settles. With no artifact held the call fails locally without
    /// touching the network. While a submission is already in flight the call
    /// is a no-op returning the `Submitting` snapshot.
    pub async fn submit(&self) -> SubmissionState {
        let artifact = {
            let mut inner = self.inner.lock().await;
            if inner.state.is_submitting() {
                tracing::debug!("submit ignored: submission already in flight");
                return inner.state.clone();
            }
            match &inner.artifact {
                None => {
                    inner.state = SubmissionState::Failed {
                        message: AnalysisError::NoArtifact.user_message(),
                    };
                    return inner.state.clone();
                }
                Some(artifact) => {
                    let artifact = artifact.clone();
                    inner.state = SubmissionState::Submitting;
                    artifact
                }
            }
        };

        let submission_id = Uuid::new_v4();
        tracing::info!(
            %submission_id,
            file_name = %artifact.file_name,
            size = artifact.size(),
            "submitting document for analysis"
        );

        let outcome = self.analyzer.analyze(&artifact).await;

        let mut inner = self.inner.lock().await;
        inner.state = match outcome {
            Ok(report) => {
                tracing::info!(%submission_id, "analysis succeeded");
                SubmissionState::Succeeded { report }
            }
            Err(err) => {
                tracing::warn!(%submission_id, error = %err, "analysis failed");
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };
        inner.state.clone()
    }

    /// Clear the artifact and return to `Idle`.
    ///
    /// A no-op while a submission is in flight: the observed behavior has no
    /// cancellation, so the outstanding call settles before the machine can
    /// be reset.
    pub async fn reset(&self) -> SubmissionState {
        let mut inner = self.inner.lock().await;
        if inner.state.is_submitting() {
            tracing::debug!("reset ignored: submission in flight");
            return inner.state.clone();
        }
        inner.artifact = None;
        inner.state = SubmissionState::Idle;
        inner.state.clone()
    }
}

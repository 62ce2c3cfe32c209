//! Analyzer seam
//!
//! The workflow talks to the analysis capability through this trait so the
//! state machine can be exercised without a live gateway.

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::models::{AnalysisReport, Artifact};

/// Adapter from an [`Artifact`] to a single analysis request.
///
/// Implementations perform exactly one outbound request per call, with no
/// retries or polling; re-submission policy belongs to the caller.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, artifact: &Artifact) -> Result<AnalysisReport, AnalysisError>;
}

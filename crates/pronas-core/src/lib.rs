//! PRONAS/PCD Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! validation shared by the document analysis workflow components.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use analyzer::DocumentAnalyzer;
pub use config::GatewayConfig;
pub use error::AnalysisError;
pub use models::{AnalysisReport, Artifact, SubmissionState};
pub use validation::ArtifactValidator;

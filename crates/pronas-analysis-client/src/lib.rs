//! HTTP client for the PRONAS/PCD AI analysis gateway.
//!
//! Adapts an [`Artifact`] into a single multipart request against the
//! gateway's `/ai/analyze-document` endpoint and interprets the response.
//! The client performs no retries and no polling; whether to resubmit is the
//! caller's decision.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use pronas_core::error::MSG_ANALYSIS_FAILED;
use pronas_core::{AnalysisError, AnalysisReport, Artifact, DocumentAnalyzer, GatewayConfig};

const ANALYZE_PATH: &str = "/ai/analyze-document";
const HEALTH_PATH: &str = "/health";

/// HTTP client for the analysis gateway.
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    client: Client,
    config: GatewayConfig,
}

impl AnalysisClient {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client for analysis gateway")?;

        Ok(Self { client, config })
    }

    /// Create a client from the environment (PRONAS_GATEWAY_URL, defaulting
    /// to the localhost gateway).
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Probe the gateway's health endpoint.
    pub async fn health(&self) -> Result<(), AnalysisError> {
        let url = self.config.endpoint(HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AnalysisError::Gateway {
                status: status.as_u16(),
                message: format!("health check failed with status {}", status.as_u16()),
            })
        }
    }

    fn build_form(artifact: &Artifact) -> Result<Form, AnalysisError> {
        let part = Part::bytes(artifact.payload.to_vec())
            .file_name(artifact.file_name.clone())
            .mime_str(&artifact.media_type)
            .map_err(|e| {
                AnalysisError::InvalidArtifact(format!(
                    "invalid media type {}: {}",
                    artifact.media_type, e
                ))
            })?;
        Ok(Form::new().part("file", part))
    }
}

/// Map a non-success response body to the user-facing failure message: the
/// gateway returns `{"detail": "..."}` on errors, anything else falls back to
/// the generic message.
fn extract_error_detail(status: StatusCode, body: &str) -> AnalysisError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| MSG_ANALYSIS_FAILED.to_string());

    AnalysisError::Gateway {
        status: status.as_u16(),
        message,
    }
}

fn classify_transport_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        AnalysisError::Transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        AnalysisError::Transport(format!("connection failed: {}", err))
    } else {
        AnalysisError::Transport(err.to_string())
    }
}

#[async_trait]
impl DocumentAnalyzer for AnalysisClient {
    async fn analyze(&self, artifact: &Artifact) -> Result<AnalysisReport, AnalysisError> {
        if artifact.payload.is_empty() {
            return Err(AnalysisError::InvalidArtifact(format!(
                "empty payload: {}",
                artifact.file_name
            )));
        }

        let url = self.config.endpoint(ANALYZE_PATH);
        tracing::debug!(
            file_name = %artifact.file_name,
            size = artifact.size(),
            %url,
            "sending document to analysis gateway"
        );

        let form = Self::build_form(artifact)?;
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = extract_error_detail(status, &body);
            tracing::warn!(
                file_name = %artifact.file_name,
                status = status.as_u16(),
                error = %err,
                "analysis gateway rejected document"
            );
            return Err(err);
        }

        let body: Value = response.json().await.map_err(|e| AnalysisError::Gateway {
            status: status.as_u16(),
            message: format!("response was not valid JSON: {}", e),
        })?;

        match body {
            Value::Object(fields) => {
                tracing::info!(
                    file_name = %artifact.file_name,
                    status = status.as_u16(),
                    "analysis completed"
                );
                Ok(AnalysisReport::new(fields))
            }
            other => Err(AnalysisError::Gateway {
                status: status.as_u16(),
                message: format!("expected JSON object, got {}", json_type_name(&other)),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

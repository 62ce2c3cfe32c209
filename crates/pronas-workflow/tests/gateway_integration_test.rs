//! End-to-end tests: workflow driving the real gateway client against a
//! mock HTTP server.

use std::time::Duration;

use serde_json::json;

use pronas_core::error::MSG_GATEWAY_UNREACHABLE;
use pronas_core::{Artifact, GatewayConfig};
use pronas_workflow::UploadWorkflow;

fn pdf_artifact() -> Artifact {
    Artifact::new("projeto.pdf", "application/pdf", &b"%PDF-1.4 conteudo"[..])
}

fn workflow_for(url: &str) -> UploadWorkflow<pronas_workflow::AnalysisClient> {
    let config = GatewayConfig::new(url).with_request_timeout(Duration::from_secs(5));
    UploadWorkflow::with_gateway(config).unwrap()
}

#[tokio::test]
async fn test_full_cycle_against_gateway() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ai/analyze-document")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"filename": "projeto.pdf", "extracted_text": "texto", "compliance_score": 0.75, "bias_warnings": []}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let workflow = workflow_for(&server.url());
    workflow.select_artifact(pdf_artifact()).await;
    let state = workflow.submit().await;

    let report = state.report().expect("expected succeeded state");
    assert_eq!(report.filename(), Some("projeto.pdf"));
    assert_eq!(report.compliance_score(), Some(0.75));
    assert!(report.bias_warnings().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gateway_rejection_surfaces_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/ai/analyze-document")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Formato de arquivo inválido. Apenas PDF é aceito."}"#)
        .create_async()
        .await;

    let workflow = workflow_for(&server.url());
    workflow.select_artifact(pdf_artifact()).await;
    let state = workflow.submit().await;

    assert_eq!(
        state.error_message(),
        Some("Formato de arquivo inválido. Apenas PDF é aceito.")
    );
}

#[tokio::test]
async fn test_unreachable_gateway_surfaces_transport_message() {
    // Port 9 (discard) is never bound in the test environment.
    let workflow = workflow_for("http://127.0.0.1:9");
    workflow.select_artifact(pdf_artifact()).await;
    let state = workflow.submit().await;

    assert_eq!(state.error_message(), Some(MSG_GATEWAY_UNREACHABLE));
}

#[tokio::test]
async fn test_resubmission_after_failure_issues_new_request() {
    let mut server = mockito::Server::new_async().await;
    let failure = server
        .mock("POST", "/ai/analyze-document")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Não foi possível extrair texto do documento."}"#)
        .expect(1)
        .create_async()
        .await;

    let workflow = workflow_for(&server.url());
    workflow.select_artifact(pdf_artifact()).await;
    let state = workflow.submit().await;
    assert_eq!(
        state.error_message(),
        Some("Não foi possível extrair texto do documento.")
    );
    failure.assert_async().await;

    // The user picks the file again and resubmits; the workflow issues
    // exactly one new request.
    let success = server
        .mock("POST", "/ai/analyze-document")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": "ok"}"#)
        .expect(1)
        .create_async()
        .await;

    workflow.select_artifact(pdf_artifact()).await;
    let state = workflow.submit().await;
    assert_eq!(state.report().unwrap().get("result"), Some(&json!("ok")));
    success.assert_async().await;
}

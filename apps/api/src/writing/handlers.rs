//! Axum route handlers for the writing API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::dispatcher::{dispatch, ExportOutcome, ExportRequest};
use crate::state::AppState;
use crate::storage::upload_reference_document;
use crate::writing::chat::{self, ChatReply};
use crate::writing::models::{ChatMessage, QualityReport, WritingRequest};
use crate::writing::pipeline::{Pipeline, PipelineOutcome, TracingObserver};
use crate::writing::prompts::ChatContext;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckContentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<ChatContext>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    pub file_name: String,
    /// Base64-encoded file bytes.
    pub file_data: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentResponse {
    pub file_url: String,
    pub file_name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/writing/generate
///
/// Runs the full pipeline (generate → humanize → quality check) and returns
/// the finished document plus its quality report. A fresh pipeline instance
/// per request — resubmission always starts clean.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<WritingRequest>,
) -> Result<Json<PipelineOutcome>, AppError> {
    let observer = TracingObserver;
    let pipeline = Pipeline::new(&state.llm, state.estimator.as_ref(), &observer);
    let outcome = pipeline.run(&request).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/writing/check
///
/// Standalone quality estimate for already-produced content.
pub async fn handle_check(
    State(state): State<AppState>,
    Json(request): Json<CheckContentRequest>,
) -> Result<Json<QualityReport>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let report = state.estimator.estimate(&request.content).await;
    Ok(Json(report))
}

/// POST /api/v1/writing/chat
///
/// Advisory chat. Provider failures degrade to a fixed fallback reply, so
/// this handler only errors on invalid input.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let reply = chat::respond(
        &state.llm,
        &request.message,
        request.context.as_ref(),
        &request.chat_history,
    )
    .await;
    Ok(Json(reply))
}

/// POST /api/v1/writing/export
///
/// Renders the content as HTML and requests delivery. Always returns an
/// outcome object; delivery failures surface as `success: false`.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportOutcome>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    let outcome = dispatch(state.delivery.as_ref(), &request).await;
    Ok(Json(outcome))
}

/// POST /api/v1/writing/upload
///
/// Uploads a reference document and returns a presigned URL the caller can
/// attach to a subsequent `WritingRequest`.
pub async fn handle_upload(
    State(state): State<AppState>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<Json<UploadDocumentResponse>, AppError> {
    if request.file_name.trim().is_empty() {
        return Err(AppError::Validation("fileName cannot be empty".to_string()));
    }
    if request.file_data.is_empty() {
        return Err(AppError::Validation("fileData cannot be empty".to_string()));
    }

    let uploaded = upload_reference_document(
        &state.s3,
        &state.config.s3_bucket,
        &request.file_name,
        &request.file_data,
        &request.content_type,
    )
    .await?;

    Ok(Json(UploadDocumentResponse {
        file_url: uploaded.file_url,
        file_name: uploaded.file_name,
    }))
}

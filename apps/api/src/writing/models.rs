//! Data models for the academic writing pipeline.
//!
//! Wire format is camelCase throughout — the JSON contract predates this
//! service and the frontend depends on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Average adult reading speed, words per minute.
const READING_SPEED_WPM: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// WritingRequest
// ────────────────────────────────────────────────────────────────────────────

/// A request to produce an academic paper. Immutable once a pipeline run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingRequest {
    pub topic: String,
    pub instructions: String,
    pub word_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_file_url: Option<String>,
}

impl WritingRequest {
    /// Rejects empty topic/instructions and non-positive word counts before
    /// the pipeline spends a provider call on them.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.topic.trim().is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }
        if self.instructions.trim().is_empty() {
            return Err(AppError::Validation(
                "instructions cannot be empty".to_string(),
            ));
        }
        if self.word_count == 0 {
            return Err(AppError::Validation(
                "wordCount must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GeneratedDocument
// ────────────────────────────────────────────────────────────────────────────

/// The finished document. `word_count` and `estimated_reading_time` are always
/// derived from `humanized_content` — never trusted from the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub content: String,
    pub humanized_content: String,
    pub word_count: usize,
    /// Minutes, at 200 wpm, rounded up.
    pub estimated_reading_time: usize,
}

impl GeneratedDocument {
    pub fn from_contents(content: String, humanized_content: String) -> Self {
        let word_count = humanized_content.split_whitespace().count();
        let estimated_reading_time = word_count.div_ceil(READING_SPEED_WPM);
        Self {
            content,
            humanized_content,
            word_count,
            estimated_reading_time,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// QualityReport
// ────────────────────────────────────────────────────────────────────────────

/// Qualitative bucket for a numeric quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIndicators {
    pub originality_level: QualityLevel,
    pub human_like_score: QualityLevel,
    pub academic_quality: QualityLevel,
}

/// Produced once per pipeline run, after humanization. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub plagiarism_score: f64,
    pub ai_detection_score: f64,
    pub readability_score: f64,
    pub quality_indicators: QualityIndicators,
}

// ────────────────────────────────────────────────────────────────────────────
// Chat
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One turn of the advisory chat. Append-only on the client side; the server
/// only ever reads a trailing window of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

//! Pipeline Orchestrator — sequences the content pipeline for one request.
//!
//! Flow: validate → generate draft → humanize → quality estimate.
//! Stages run strictly sequentially; each stage is announced to the observer
//! before its work starts. Any stage failure discards all partial results and
//! surfaces a single `Generation` error — no retries, no partial documents.
//!
//! The orchestrator holds no cross-request state: each run owns its
//! `WritingRequest`, `GeneratedDocument`, and `QualityReport` exclusively.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::writing::models::{GeneratedDocument, QualityReport, WritingRequest};
use crate::writing::prompts::{build_academic_prompt, build_humanize_prompt};
use crate::writing::quality::QualityEstimator;

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

/// The linear pipeline progression. `Failed` is terminal and reachable from
/// any non-idle stage; there is no branching and no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Idle,
    Generating,
    Humanizing,
    Checking,
    Complete,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Generating => "generating",
            PipelineStage::Humanizing => "humanizing",
            PipelineStage::Checking => "checking",
            PipelineStage::Complete => "complete",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Receives stage transitions for progress display. Each stage is announced
/// before the corresponding work begins; `Complete`/`Failed` on exit.
pub trait ProgressObserver: Send + Sync {
    fn on_stage(&self, stage: PipelineStage);
}

/// Default observer: transitions go to the structured log.
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_stage(&self, stage: PipelineStage) {
        info!("Pipeline stage: {stage}");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Result of a completed pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    #[serde(flatten)]
    pub document: GeneratedDocument,
    pub quality: QualityReport,
}

/// One pipeline instance per request. Borrows its collaborators from
/// `AppState`; owns nothing across runs.
pub struct Pipeline<'a> {
    generator: &'a dyn TextGenerator,
    estimator: &'a dyn QualityEstimator,
    observer: &'a dyn ProgressObserver,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        generator: &'a dyn TextGenerator,
        estimator: &'a dyn QualityEstimator,
        observer: &'a dyn ProgressObserver,
    ) -> Self {
        Self {
            generator,
            estimator,
            observer,
        }
    }

    /// Runs the full pipeline for one request.
    ///
    /// Validation failures are rejected before the pipeline starts (the
    /// observer never sees a stage). Provider failures on either call
    /// transition to `Failed` and discard everything produced so far.
    pub async fn run(&self, request: &WritingRequest) -> Result<PipelineOutcome, AppError> {
        request.validate()?;

        self.observer.on_stage(PipelineStage::Generating);
        let academic_prompt = build_academic_prompt(request);
        let draft = self
            .generator
            .generate(&academic_prompt)
            .await
            .map_err(|e| self.fail(format!("Draft generation call failed: {e}")))?;
        info!(
            "Draft generated for topic '{}' ({} chars)",
            request.topic,
            draft.len()
        );

        self.observer.on_stage(PipelineStage::Humanizing);
        let humanize_prompt = build_humanize_prompt(&draft);
        let humanized = self
            .generator
            .generate(&humanize_prompt)
            .await
            .map_err(|e| self.fail(format!("Humanization call failed: {e}")))?;

        self.observer.on_stage(PipelineStage::Checking);
        let document = GeneratedDocument::from_contents(draft, humanized);
        let quality = self.estimator.estimate(&document.humanized_content).await;

        info!(
            "Pipeline complete: {} words, ~{} min read",
            document.word_count, document.estimated_reading_time
        );
        self.observer.on_stage(PipelineStage::Complete);

        Ok(PipelineOutcome { document, quality })
    }

    fn fail(&self, message: String) -> AppError {
        self.observer.on_stage(PipelineStage::Failed);
        AppError::Generation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::writing::quality::SimulatedEstimator;

    /// Provider stub that replays a scripted sequence of responses.
    struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        stages: Mutex<Vec<PipelineStage>>,
    }

    impl RecordingObserver {
        fn seen(&self) -> Vec<PipelineStage> {
            self.stages.lock().unwrap().clone()
        }
    }

    impl ProgressObserver for RecordingObserver {
        fn on_stage(&self, stage: PipelineStage) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    fn request() -> WritingRequest {
        WritingRequest {
            topic: "Climate Change".to_string(),
            instructions: "APA style, 3 sources".to_string(),
            word_count: 1000,
            reference_file_url: None,
        }
    }

    fn provider_error() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        }
    }

    #[test]
    fn test_stage_names_match_wire_format() {
        for (stage, expected) in [
            (PipelineStage::Idle, "idle"),
            (PipelineStage::Generating, "generating"),
            (PipelineStage::Humanizing, "humanizing"),
            (PipelineStage::Checking, "checking"),
            (PipelineStage::Complete, "complete"),
            (PipelineStage::Failed, "failed"),
        ] {
            assert_eq!(stage.to_string(), expected);
            assert_eq!(
                serde_json::to_string(&stage).unwrap(),
                format!("\"{expected}\"")
            );
        }
    }

    #[tokio::test]
    async fn test_successful_run_walks_all_stages_in_order() {
        let generator = ScriptedGenerator::new(vec![
            Ok("# Introduction\n\nDraft body of the paper.".to_string()),
            Ok("# Introduction\n\nA more natural version of the paper.".to_string()),
        ]);
        let estimator = SimulatedEstimator::with_delay(Duration::ZERO);
        let observer = RecordingObserver::default();
        let pipeline = Pipeline::new(&generator, &estimator, &observer);

        let outcome = pipeline.run(&request()).await.unwrap();

        assert_eq!(
            observer.seen(),
            vec![
                PipelineStage::Generating,
                PipelineStage::Humanizing,
                PipelineStage::Checking,
                PipelineStage::Complete,
            ]
        );
        assert_eq!(
            outcome.document.content,
            "# Introduction\n\nDraft body of the paper."
        );
        assert_eq!(
            outcome.document.word_count,
            outcome
                .document
                .humanized_content
                .split_whitespace()
                .count()
        );
    }

    #[tokio::test]
    async fn test_draft_failure_transitions_to_failed() {
        let generator = ScriptedGenerator::new(vec![Err(provider_error())]);
        let estimator = SimulatedEstimator::with_delay(Duration::ZERO);
        let observer = RecordingObserver::default();
        let pipeline = Pipeline::new(&generator, &estimator, &observer);

        let result = pipeline.run(&request()).await;

        assert!(matches!(result, Err(AppError::Generation(_))));
        assert_eq!(
            observer.seen(),
            vec![PipelineStage::Generating, PipelineStage::Failed]
        );
    }

    #[tokio::test]
    async fn test_humanize_failure_discards_draft() {
        // First call succeeds, second fails: the draft must not leak out.
        let generator = ScriptedGenerator::new(vec![
            Ok("A perfectly good draft".to_string()),
            Err(provider_error()),
        ]);
        let estimator = SimulatedEstimator::with_delay(Duration::ZERO);
        let observer = RecordingObserver::default();
        let pipeline = Pipeline::new(&generator, &estimator, &observer);

        let result = pipeline.run(&request()).await;

        assert!(matches!(result, Err(AppError::Generation(_))));
        assert_eq!(
            observer.seen(),
            vec![
                PipelineStage::Generating,
                PipelineStage::Humanizing,
                PipelineStage::Failed,
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_any_stage() {
        let generator = ScriptedGenerator::new(vec![]);
        let estimator = SimulatedEstimator::with_delay(Duration::ZERO);
        let observer = RecordingObserver::default();
        let pipeline = Pipeline::new(&generator, &estimator, &observer);

        let mut bad = request();
        bad.topic = String::new();
        let result = pipeline.run(&bad).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(observer.seen().is_empty(), "no stage may be announced");
    }
}

//! Quality Estimation — pluggable, trait-based estimator producing a
//! `QualityReport` for finished content.
//!
//! Default: `SimulatedEstimator` (synthetic scores, fixed bucket thresholds).
//! The trait isolates the placeholder so a genuine plagiarism/AI detector can
//! be swapped in without touching the orchestrator or handlers.
//!
//! `AppState` holds an `Arc<dyn QualityEstimator>`.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::writing::models::{QualityIndicators, QualityLevel, QualityReport};

/// Latency of the simulated analysis pass. Real detectors take seconds;
/// keeping the delay makes the progress UI honest.
const SIMULATED_ANALYSIS_DELAY: Duration = Duration::from_secs(3);

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The quality estimator trait. Infallible: every invocation yields a report.
#[async_trait]
pub trait QualityEstimator: Send + Sync {
    async fn estimate(&self, content: &str) -> QualityReport;
}

// ────────────────────────────────────────────────────────────────────────────
// Bucketing
// ────────────────────────────────────────────────────────────────────────────

/// Maps a numeric score to its qualitative bucket.
///
/// `reverse = true` means lower is better (plagiarism, AI detection):
///   <10 excellent, <20 good, <35 fair, else poor.
/// `reverse = false` means higher is better (readability):
///   >85 excellent, >70 good, >55 fair, else poor.
pub fn level(score: f64, reverse: bool) -> QualityLevel {
    if reverse {
        if score < 10.0 {
            QualityLevel::Excellent
        } else if score < 20.0 {
            QualityLevel::Good
        } else if score < 35.0 {
            QualityLevel::Fair
        } else {
            QualityLevel::Poor
        }
    } else if score > 85.0 {
        QualityLevel::Excellent
    } else if score > 70.0 {
        QualityLevel::Good
    } else if score > 55.0 {
        QualityLevel::Fair
    } else {
        QualityLevel::Poor
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// SimulatedEstimator — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Synthetic estimator standing in for a real analysis service.
/// Scores are independently drawn per call; content length is not consulted.
pub struct SimulatedEstimator {
    delay: Duration,
}

impl SimulatedEstimator {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_ANALYSIS_DELAY,
        }
    }

    /// Zero-delay variant for tests.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    fn draw_report() -> QualityReport {
        let mut rng = rand::thread_rng();

        let plagiarism_score = round_one_decimal(rng.gen_range(0.0..15.0));
        let ai_detection_score = round_one_decimal(rng.gen_range(0.0..25.0));
        let readability_score = round_one_decimal(rng.gen_range(75.0..95.0));

        QualityReport {
            plagiarism_score,
            ai_detection_score,
            readability_score,
            quality_indicators: QualityIndicators {
                originality_level: level(plagiarism_score, true),
                human_like_score: level(ai_detection_score, true),
                academic_quality: level(readability_score, false),
            },
        }
    }
}

impl Default for SimulatedEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QualityEstimator for SimulatedEstimator {
    async fn estimate(&self, _content: &str) -> QualityReport {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Self::draw_report()
    }
}

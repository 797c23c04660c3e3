//! Export Dispatcher — renders final content for delivery and requests the
//! (simulated) send.
//!
//! The delivery channel is pluggable: `AppState` holds an
//! `Arc<dyn DeliveryChannel>`. The default `SimulatedDelivery` stands in for
//! a real mail/PDF pipeline and succeeds unconditionally after a fixed delay;
//! a real implementation swaps in behind the same trait. Channel errors are
//! mapped to a generic failure outcome — the pipeline result that produced
//! the content is unaffected, since export happens after completion.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::export::html::render_for_delivery;

/// Latency of the simulated render-and-send.
const SIMULATED_DELIVERY_DELAY: Duration = Duration::from_secs(2);

const DELIVERY_FAILURE_MESSAGE: &str =
    "Failed to export and send document. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

/// Consumed once per export; no record is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub content: String,
    pub title: String,
    pub email: String,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
}

/// The delivery channel trait. Returns the user-facing success message;
/// errors are translated by `dispatch` into a failure outcome.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn deliver(
        &self,
        request: &ExportRequest,
        html_document: &str,
    ) -> Result<String, AppError>;
}

/// Simulated send: no document is rendered to PDF/DOCX and no email leaves
/// the process. Explicitly a stub — see DESIGN.md.
pub struct SimulatedDelivery {
    delay: Duration,
}

impl SimulatedDelivery {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_DELIVERY_DELAY,
        }
    }

    /// Zero-delay variant for tests.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryChannel for SimulatedDelivery {
    async fn deliver(
        &self,
        request: &ExportRequest,
        _html_document: &str,
    ) -> Result<String, AppError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        info!(
            "Simulated {:?} delivery of '{}' to {}",
            request.format, request.title, request.email
        );
        Ok(format!(
            "Academic paper \"{}\" has been generated and sent to {}",
            request.title, request.email
        ))
    }
}

/// Renders the content as HTML and hands it to the channel.
/// Never propagates channel errors: failures become a generic outcome.
pub async fn dispatch(channel: &dyn DeliveryChannel, request: &ExportRequest) -> ExportOutcome {
    let html_document = render_for_delivery(&request.content, &request.title);

    match channel.deliver(request, &html_document).await {
        Ok(message) => ExportOutcome {
            success: true,
            message,
        },
        Err(e) => {
            warn!("Delivery failed for '{}': {e}", request.title);
            ExportOutcome {
                success: false,
                message: DELIVERY_FAILURE_MESSAGE.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingDelivery;

    #[async_trait]
    impl DeliveryChannel for FailingDelivery {
        async fn deliver(
            &self,
            _request: &ExportRequest,
            _html_document: &str,
        ) -> Result<String, AppError> {
            Err(AppError::Delivery("smtp connection refused".to_string()))
        }
    }

    fn export_request() -> ExportRequest {
        ExportRequest {
            content: "# Conclusion\n\nFinal thoughts.".to_string(),
            title: "Climate Change".to_string(),
            email: "user@example.com".to_string(),
            format: ExportFormat::Pdf,
        }
    }

    #[tokio::test]
    async fn test_simulated_delivery_names_title_and_destination() {
        let channel = SimulatedDelivery::with_delay(Duration::ZERO);
        let outcome = dispatch(&channel, &export_request()).await;
        assert!(outcome.success);
        assert!(outcome.message.contains("Climate Change"));
        assert!(outcome.message.contains("user@example.com"));
    }

    #[tokio::test]
    async fn test_channel_failure_yields_generic_outcome() {
        let request = export_request();
        let outcome = dispatch(&FailingDelivery, &request).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, DELIVERY_FAILURE_MESSAGE);
        // The request itself is untouched by the failure.
        assert_eq!(request.title, "Climate Change");
    }

    #[test]
    fn test_export_format_wire_values() {
        assert_eq!(serde_json::to_string(&ExportFormat::Pdf).unwrap(), "\"pdf\"");
        let parsed: ExportFormat = serde_json::from_str("\"docx\"").unwrap();
        assert_eq!(parsed, ExportFormat::Docx);
    }
}

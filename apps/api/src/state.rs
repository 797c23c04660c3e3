use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::export::dispatcher::DeliveryChannel;
use crate::llm_client::GeminiClient;
use crate::writing::quality::QualityEstimator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub llm: GeminiClient,
    pub config: Config,
    /// Pluggable estimator. Default: SimulatedEstimator — swap in a real
    /// detector behind the same trait.
    pub estimator: Arc<dyn QualityEstimator>,
    /// Pluggable delivery channel. Default: SimulatedDelivery.
    pub delivery: Arc<dyn DeliveryChannel>,
}

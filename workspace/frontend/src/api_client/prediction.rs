use common::{PredictionError, PredictionRequest, PredictionResult};

use crate::api_client;
use crate::settings;

/// Ask the configured endpoint for a prediction.
pub async fn request_prediction(
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictionError> {
    let settings = settings::get_settings();
    log::trace!(
        "Requesting prediction for {} from {}",
        request.symbol,
        settings.endpoint_url
    );

    let result = api_client::post::<PredictionResult, _>(
        &settings.endpoint_url,
        request,
        settings.request_timeout_ms,
    )
    .await;

    match &result {
        Ok(prediction) => log::info!("Received prediction for {}", prediction.symbol),
        Err(e) => log::error!("Failed to fetch prediction for {}: {}", request.symbol, e),
    }

    result
}

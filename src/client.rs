use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use common::{PanelState, PredictionError, PredictionRequest, PredictionResult};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

/// Anything that can answer a prediction request
pub trait PredictionClient {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, PredictionError>> + Send;
}

/// Run one full panel submission against `client`.
///
/// Returns `false` when the panel refused to submit (blank symbol or a request
/// already in flight); the panel is untouched in that case.
pub async fn submit_prediction<C: PredictionClient>(panel: &mut PanelState, client: &C) -> bool {
    let Some(submission) = panel.begin_submission() else {
        return false;
    };

    let outcome = client.predict(&submission.request).await;
    panel.complete(submission.token, outcome)
}

/// Answer of the service root
#[derive(Debug, Deserialize)]
struct ServiceStatus {
    message: Option<String>,
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect timeout for a request budget of `timeout_ms`; none when unbounded.
fn connect_timeout_for(timeout_ms: u64) -> Option<Duration> {
    if timeout_ms == 0 {
        return None;
    }
    Some(CONNECT_TIMEOUT.min(Duration::from_millis(timeout_ms)))
}

/// reqwest-backed client for the prediction endpoint
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    endpoint_url: String,
    timeout_ms: u64,
}

impl HttpPredictionClient {
    /// Build a client; `timeout_ms == 0` disables the request timeout.
    pub fn new(endpoint_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(connect_timeout) = connect_timeout_for(timeout_ms) {
            builder = builder.connect_timeout(connect_timeout);
        }
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            endpoint_url: endpoint_url.into(),
            timeout_ms,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Root of the service hosting the prediction endpoint.
    pub fn service_root(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint_url)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint_url))?;
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Probe the service root and return its status message.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<String> {
        let url = self.service_root()?;
        debug!("GET request to: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;

        let status: ServiceStatus = response.json().await.context("Failed to parse response")?;
        Ok(status
            .message
            .unwrap_or_else(|| "Service is up".to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> PredictionError {
        // A connect timeout is a connection failure, not the request budget.
        if err.is_connect() {
            error!("POST {} - Connection failed: {}", self.endpoint_url, err);
            return PredictionError::Transport(err.to_string());
        }
        if err.is_timeout() {
            warn!(timeout_ms = self.timeout_ms, "Prediction request timed out");
            PredictionError::Timeout {
                after_ms: self.timeout_ms,
            }
        } else {
            error!("POST {} - Request failed: {}", self.endpoint_url, err);
            PredictionError::Transport(err.to_string())
        }
    }
}

impl PredictionClient for HttpPredictionClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint_url, symbol = %request.symbol))]
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        debug!("POST request to: {}", self.endpoint_url);

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("POST {} - Non-OK response: {}", self.endpoint_url, status);
            let body = response.text().await.unwrap_or_default();
            let err = PredictionError::from_error_body(status.as_u16(), &body);
            error!("POST {} - {}", self.endpoint_url, err);
            return Err(err);
        }

        let result = response.json::<PredictionResult>().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                error!("POST {} - Failed to parse response: {}", self.endpoint_url, e);
                PredictionError::Decode(e.to_string())
            }
        })?;

        info!("POST {} - Success", self.endpoint_url);
        Ok(result)
    }
}

pub mod prediction;

use common::PredictionError;
use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};

/// Common POST request handler
///
/// Posts `body` as JSON to `url` and decodes the JSON answer. Non-2xx answers
/// become [`PredictionError::Server`] carrying the body's `error` field when
/// there is one. With a non-zero `timeout_ms` the call is abandoned after that
/// many milliseconds.
pub async fn post<T, B>(url: &str, body: &B, timeout_ms: u32) -> Result<T, PredictionError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    if timeout_ms == 0 {
        return send_post(url, body).await;
    }

    let request = send_post::<T, B>(url, body);
    let timeout = TimeoutFuture::new(timeout_ms);
    pin_mut!(request);
    pin_mut!(timeout);

    match select(request, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::error!("POST {} - Timed out after {} ms", url, timeout_ms);
            Err(PredictionError::Timeout {
                after_ms: u64::from(timeout_ms),
            })
        }
    }
}

async fn send_post<T, B>(url: &str, body: &B) -> Result<T, PredictionError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    log::debug!("POST request to: {}", url);

    let response = Request::post(url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", url, error_msg);
            PredictionError::Transport(error_msg)
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", url, e);
            PredictionError::Transport(e.to_string())
        })?;

    if !response.ok() {
        let status = response.status();
        log::warn!("POST {} - Non-OK response: {}", url, status);
        let body = response.text().await.unwrap_or_default();
        let err = PredictionError::from_error_body(status, &body);
        log::error!("POST {} - {}", url, err);
        return Err(err);
    }

    log::trace!("POST {} - Response received, parsing JSON", url);
    let data = response.json::<T>().await.map_err(|e| {
        log::error!("POST {} - Failed to parse response: {}", url, e);
        PredictionError::Decode(e.to_string())
    })?;

    log::info!("POST {} - Success", url);
    Ok(data)
}

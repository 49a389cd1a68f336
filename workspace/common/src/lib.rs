//! Common types shared between the browser panel and the terminal front ends.
//! The structs mirror the prediction service's request/response payloads, and
//! the panel state machine plus its rendering live here so that every front end
//! behaves the same way.

mod error;
pub mod panel;
pub mod render;

pub use error::{PredictionError, FALLBACK_ERROR_MESSAGE, TIMEOUT_ERROR_MESSAGE};
pub use panel::{PanelState, RequestToken, Submission};
pub use render::{PanelBody, PanelView, ResultView, Section, SectionKind};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default address of the prediction endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/predict";

// ===================== Request =====================

/// Request body for the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRequest {
    /// Uppercased ticker symbol
    pub symbol: String,
}

// ===================== Response =====================

/// Prediction payload returned by the service.
///
/// Only `symbol` is guaranteed. Every other field may be missing or `null`,
/// and both cases deserialize to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictionResult {
    pub symbol: String,
    /// Closing prices keyed by date, in the order the service sent them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_10_days: Option<IndexMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_trend: Option<Vec<TrendPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow_prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Probability of an upward move, in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_prediction_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
    /// Per-feature contribution; `None` values were not calculated by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<IndexMap<String, Option<f64>>>,
}

/// One intraday close.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub time: String,
    pub close: f64,
}

/// Model summary attached to a prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Explanation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_return: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_up: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Set instead of the numbers when the model could not be trained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body the service may attach to a non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

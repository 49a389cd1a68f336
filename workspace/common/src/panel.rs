//! State machine behind the predictor panel.
//!
//! A submission is split into [`PanelState::begin_submission`], which flips the
//! panel into its loading state and hands back the request to send, and
//! [`PanelState::complete`], which applies the outcome. The front end owns the
//! asynchronous call in between.

use tracing::{debug, trace};

use crate::render::{render_panel, PanelView};
use crate::{PredictionError, PredictionRequest, PredictionResult};

/// Identifies one submission so late completions can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A request that has been accepted and is waiting for the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub token: RequestToken,
    pub request: PredictionRequest,
}

/// All UI state of the predictor panel.
///
/// `result` and `error` are never both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    symbol: String,
    result: Option<PredictionResult>,
    loading: bool,
    error: Option<String>,
    in_flight: Option<Submission>,
    next_token: u64,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<&Submission> {
        self.in_flight.as_ref()
    }

    /// Store the uppercased form of the raw input text.
    pub fn update_symbol(&mut self, text: &str) {
        self.symbol = text.to_uppercase();
        trace!(symbol = %self.symbol, "Symbol updated");
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching any state when the symbol is blank or a
    /// request is already in flight. Otherwise enters the loading state, clears
    /// the previous result and error, and returns the request to send.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.symbol.trim().is_empty() {
            trace!("Ignoring submission of blank symbol");
            return None;
        }
        if self.loading {
            debug!(symbol = %self.symbol, "Ignoring submission while a request is in flight");
            return None;
        }

        self.next_token += 1;
        let submission = Submission {
            token: RequestToken(self.next_token),
            request: PredictionRequest {
                symbol: self.symbol.clone(),
            },
        };

        self.loading = true;
        self.error = None;
        self.result = None;
        self.in_flight = Some(submission.clone());

        debug!(
            symbol = %submission.request.symbol,
            token = submission.token.value(),
            "Prediction submission started"
        );
        Some(submission)
    }

    /// Apply the outcome of the submission identified by `token`.
    ///
    /// Returns `false` and leaves the state untouched when `token` is not the
    /// in-flight submission.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> bool {
        match &self.in_flight {
            Some(submission) if submission.token == token => {}
            _ => {
                debug!(token = token.value(), "Discarding stale prediction outcome");
                return false;
            }
        }

        self.in_flight = None;
        self.loading = false;

        match outcome {
            Ok(result) => {
                debug!(symbol = %result.symbol, "Prediction received");
                self.error = None;
                self.result = Some(result);
            }
            Err(err) => {
                debug!(error = %err, "Prediction failed");
                self.result = None;
                self.error = Some(err.user_message());
            }
        }
        true
    }

    /// Render the current state.
    pub fn view(&self) -> PanelView {
        render_panel(self)
    }
}

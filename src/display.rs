//! Plain-text drawing of the predictor panel for the terminal front ends.

use std::fmt::Write;

use common::render::BUSY_LABEL;
use common::{PanelBody, PanelView, ResultView, Section, SectionKind};

/// Draw the panel body; an idle panel draws nothing.
pub fn render_text(view: &PanelView) -> String {
    match &view.body {
        PanelBody::Empty if view.submit_disabled => BUSY_LABEL.to_string(),
        PanelBody::Empty => String::new(),
        PanelBody::Error(message) => format!("⚠️ {}", message),
        PanelBody::Result(result) => render_result_text(result),
    }
}

fn render_result_text(result: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📈 {}", result.heading());

    let mut prediction_started = false;
    for section in &result.sections {
        let is_prediction = !matches!(
            section.kind(),
            SectionKind::LastTenDays | SectionKind::TodayTrend | SectionKind::News
        );
        if is_prediction && !prediction_started {
            prediction_started = true;
            let _ = writeln!(out);
            let _ = writeln!(out, "🤖 AI Prediction");
        }

        match section {
            Section::List { kind, items } => {
                let _ = writeln!(out, "{}:", kind.title());
                for item in items {
                    let _ = writeln!(out, "  - {}", item);
                }
            }
            Section::Label { kind, value } => {
                let _ = writeln!(out, "{}: {}", kind.title(), value);
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PanelState, PredictionError, PredictionResult};

    #[test]
    fn test_idle_and_loading() {
        let mut panel = PanelState::new();
        panel.update_symbol("tcs");
        assert_eq!(render_text(&panel.view()), "");

        panel.begin_submission().unwrap();
        assert_eq!(render_text(&panel.view()), "Analyzing...");
    }

    #[test]
    fn test_error_text() {
        let mut panel = PanelState::new();
        panel.update_symbol("tcs");
        let submission = panel.begin_submission().unwrap();
        panel.complete(
            submission.token,
            Err(PredictionError::Server {
                status: 400,
                message: Some("Please provide a valid stock symbol".into()),
            }),
        );

        assert_eq!(
            render_text(&panel.view()),
            "⚠️ Please provide a valid stock symbol"
        );
    }

    #[test]
    fn test_result_text() {
        let result: PredictionResult = serde_json::from_value(serde_json::json!({
            "symbol": "TCS",
            "last_10_days": {"2024-01-01": 3500},
            "news": ["TCS wins deal"],
            "tomorrow_prediction": "Up",
            "suggestion": "Buy",
            "raw_prediction_value": 0.7321,
            "feature_importance": {"Return": null}
        }))
        .unwrap();

        let mut panel = PanelState::new();
        panel.update_symbol("TCS");
        let submission = panel.begin_submission().unwrap();
        panel.complete(submission.token, Ok(result));

        let expected = "\
📈 Stock Overview — TCS
Last 10 Days (₹):
  - 2024-01-01 — ₹3500
Latest News:
  - TCS wins deal

🤖 AI Prediction
Tomorrow's Trend: Up
Suggestion: Buy
Probability of Rise: 73.21%
Feature Importance:
  - Return: Not calculated";
        assert_eq!(render_text(&panel.view()), expected);
    }
}

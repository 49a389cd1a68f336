//! Rendering contract for the predictor panel.
//!
//! Everything here is a pure function of [`PanelState`]. The browser and the
//! terminal front ends only decide how a [`PanelView`] is drawn.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{Explanation, PanelState, PredictionResult};

pub const SUBMIT_LABEL: &str = "Predict";
pub const BUSY_LABEL: &str = "Analyzing...";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_CALCULATED: &str = "Not calculated";
pub const CURRENCY: &str = "₹";

/// Everything needed to draw the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub symbol: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    /// Idle or loading: nothing below the input
    Empty,
    Error(String),
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub symbol: String,
    pub sections: Vec<Section>,
}

impl ResultView {
    /// Header line above the sections.
    pub fn heading(&self) -> String {
        format!("Stock Overview — {}", self.symbol)
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind() == kind)
    }
}

/// Result sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    LastTenDays,
    TodayTrend,
    News,
    TomorrowTrend,
    Suggestion,
    ProbabilityOfRise,
    Explanation,
    FeatureImportance,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::LastTenDays => "Last 10 Days (₹)",
            SectionKind::TodayTrend => "Today's Trend",
            SectionKind::News => "Latest News",
            SectionKind::TomorrowTrend => "Tomorrow's Trend",
            SectionKind::Suggestion => "Suggestion",
            SectionKind::ProbabilityOfRise => "Probability of Rise",
            SectionKind::Explanation => "Model Explanation",
            SectionKind::FeatureImportance => "Feature Importance",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// A titled list of lines
    List { kind: SectionKind, items: Vec<String> },
    /// A single highlighted value
    Label { kind: SectionKind, value: String },
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::List { kind, .. } | Section::Label { kind, .. } => *kind,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    /// Text lines of the section; a label yields its value alone.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Section::List { items, .. } => items.iter().map(String::as_str).collect(),
            Section::Label { value, .. } => vec![value.as_str()],
        }
    }
}

pub fn render_panel(state: &PanelState) -> PanelView {
    let (submit_label, submit_disabled) = if state.is_loading() {
        (BUSY_LABEL, true)
    } else {
        (SUBMIT_LABEL, false)
    };

    let body = match (state.error(), state.result()) {
        (Some(error), _) => PanelBody::Error(error.to_string()),
        (None, Some(result)) => PanelBody::Result(render_result(result)),
        (None, None) => PanelBody::Empty,
    };

    PanelView {
        symbol: state.symbol().to_string(),
        submit_label,
        submit_disabled,
        body,
    }
}

pub fn render_result(result: &PredictionResult) -> ResultView {
    let mut sections = Vec::new();

    if let Some(days) = result.last_10_days.as_ref().filter(|days| !days.is_empty()) {
        let items = days
            .iter()
            .map(|(date, price)| format!("{} — {}", format_date(date), format_price(*price)))
            .collect();
        sections.push(Section::List {
            kind: SectionKind::LastTenDays,
            items,
        });
    }

    if let Some(trend) = result.today_trend.as_ref().filter(|trend| !trend.is_empty()) {
        let items = trend
            .iter()
            .map(|point| {
                format!(
                    "{} — {}",
                    format_timestamp(&point.time),
                    format_price(point.close)
                )
            })
            .collect();
        sections.push(Section::List {
            kind: SectionKind::TodayTrend,
            items,
        });
    }

    if let Some(news) = result.news.as_ref().filter(|news| !news.is_empty()) {
        sections.push(Section::List {
            kind: SectionKind::News,
            items: news.clone(),
        });
    }

    if let Some(label) = result.tomorrow_prediction.as_ref().filter(|s| !s.is_empty()) {
        sections.push(Section::Label {
            kind: SectionKind::TomorrowTrend,
            value: label.clone(),
        });
    }

    if let Some(label) = result.suggestion.as_ref().filter(|s| !s.is_empty()) {
        sections.push(Section::Label {
            kind: SectionKind::Suggestion,
            value: label.clone(),
        });
    }

    if let Some(probability) = result.raw_prediction_value {
        sections.push(Section::Label {
            kind: SectionKind::ProbabilityOfRise,
            value: format_percent(probability),
        });
    }

    if let Some(explanation) = &result.explanation {
        sections.push(Section::List {
            kind: SectionKind::Explanation,
            items: explanation_lines(explanation),
        });
    }

    if let Some(features) = result
        .feature_importance
        .as_ref()
        .filter(|features| !features.is_empty())
    {
        let items = features
            .iter()
            .map(|(name, value)| format!("{}: {}", name, format_importance(*value)))
            .collect();
        sections.push(Section::List {
            kind: SectionKind::FeatureImportance,
            items,
        });
    }

    ResultView {
        symbol: result.symbol.clone(),
        sections,
    }
}

fn explanation_lines(explanation: &Explanation) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Latest Return: {}",
            explanation
                .latest_return
                .map(format_return)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
        format!(
            "Probability (Up): {}",
            explanation
                .probability_up
                .map(format_percent)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
        format!(
            "Model Type: {}",
            explanation.model_type.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
    ];
    if let Some(reason) = &explanation.reason {
        lines.push(format!("Reason: {}", reason));
    }
    lines
}

/// Price with currency sign, unrounded.
pub fn format_price(price: f64) -> String {
    format!("{}{}", CURRENCY, price)
}

/// Probability in [0, 1] as a percentage with two decimals.
pub fn format_percent(probability: f64) -> String {
    format!("{}%", fixed(probability * 100.0, 2))
}

pub fn format_return(value: f64) -> String {
    fixed(value, 4)
}

pub fn format_importance(value: Option<f64>) -> String {
    match value {
        Some(value) => fixed(value, 4),
        None => NOT_CALCULATED.to_string(),
    }
}

/// Fixed decimals with ties rounded away from zero.
///
/// `format!` alone rounds ties to even, so `0.03125` would come out as
/// `0.0312` instead of `0.0313`.
fn fixed(value: f64, digits: i32) -> String {
    let factor = 10f64.powi(digits);
    format!("{:.*}", digits as usize, (value * factor).round() / factor)
}

/// `YYYY-MM-DD` when the string carries a recognizable date, else unchanged.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `YYYY-MM-DD HH:MM` when the string carries a recognizable time, else unchanged.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

// Offsets are kept as sent: the exchange's local time is what matters here.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(ts.naive_local());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PredictionError, TrendPoint};
    use indexmap::IndexMap;

    fn sample_result() -> PredictionResult {
        serde_json::from_value(serde_json::json!({
            "symbol": "TCS",
            "last_10_days": {"2024-01-01": 3500},
            "today_trend": [],
            "news": [],
            "tomorrow_prediction": "Up",
            "suggestion": "Buy",
            "raw_prediction_value": 0.7321
        }))
        .unwrap()
    }

    #[test]
    fn test_probability_text() {
        let view = render_result(&sample_result());
        let section = view.section(SectionKind::ProbabilityOfRise).unwrap();
        assert_eq!(section.lines(), vec!["73.21%"]);
    }

    #[test]
    fn test_sections_follow_display_order_and_skip_empty() {
        let view = render_result(&sample_result());
        let kinds: Vec<SectionKind> = view.sections.iter().map(Section::kind).collect();

        assert_eq!(
            kinds,
            vec![
                SectionKind::LastTenDays,
                SectionKind::TomorrowTrend,
                SectionKind::Suggestion,
                SectionKind::ProbabilityOfRise,
            ]
        );
        assert_eq!(view.heading(), "Stock Overview — TCS");
    }

    #[test]
    fn test_price_history_lines() {
        let view = render_result(&sample_result());
        let section = view.section(SectionKind::LastTenDays).unwrap();
        assert_eq!(section.lines(), vec!["2024-01-01 — ₹3500"]);
    }

    #[test]
    fn test_prices_are_not_rounded() {
        assert_eq!(format_price(3512.456789), "₹3512.456789");
        assert_eq!(format_price(12.5), "₹12.5");
    }

    #[test]
    fn test_intraday_trend_lines() {
        let result = PredictionResult {
            symbol: "INFY".into(),
            today_trend: Some(vec![
                TrendPoint {
                    time: "2024-01-05 09:15:00+05:30".into(),
                    close: 1520.25,
                },
                TrendPoint {
                    time: "not a time".into(),
                    close: 1521.0,
                },
            ]),
            ..Default::default()
        };

        let view = render_result(&result);
        let section = view.section(SectionKind::TodayTrend).unwrap();
        assert_eq!(
            section.lines(),
            vec!["2024-01-05 09:15 — ₹1520.25", "not a time — ₹1521"]
        );
    }

    #[test]
    fn test_feature_importance_lines() {
        let mut features = IndexMap::new();
        features.insert("momentum".to_string(), Some(0.1234));
        features.insert("volume".to_string(), None);
        let result = PredictionResult {
            symbol: "TCS".into(),
            feature_importance: Some(features),
            ..Default::default()
        };

        let view = render_result(&result);
        let section = view.section(SectionKind::FeatureImportance).unwrap();
        assert_eq!(
            section.lines(),
            vec!["momentum: 0.1234", "volume: Not calculated"]
        );
    }

    #[test]
    fn test_explanation_missing_values_render_na() {
        let result = PredictionResult {
            symbol: "TCS".into(),
            explanation: Some(Explanation {
                latest_return: Some(-0.012345),
                probability_up: None,
                model_type: None,
                reason: None,
            }),
            ..Default::default()
        };

        let view = render_result(&result);
        let section = view.section(SectionKind::Explanation).unwrap();
        assert_eq!(
            section.lines(),
            vec![
                "Latest Return: -0.0123",
                "Probability (Up): N/A",
                "Model Type: N/A",
            ]
        );
    }

    #[test]
    fn test_explanation_full_and_reason() {
        let result = PredictionResult {
            symbol: "TCS".into(),
            explanation: Some(Explanation {
                latest_return: Some(0.0),
                probability_up: Some(0.61),
                model_type: Some("LogisticRegression (returns-based)".into()),
                reason: Some("Not enough data".into()),
            }),
            ..Default::default()
        };

        let view = render_result(&result);
        let section = view.section(SectionKind::Explanation).unwrap();
        assert_eq!(
            section.lines(),
            vec![
                "Latest Return: 0.0000",
                "Probability (Up): 61.00%",
                "Model Type: LogisticRegression (returns-based)",
                "Reason: Not enough data",
            ]
        );
    }

    #[test]
    fn test_absent_probability_is_not_rendered() {
        let result = PredictionResult {
            symbol: "TCS".into(),
            ..Default::default()
        };
        let view = render_result(&result);
        assert!(view.sections.is_empty());
    }

    #[test]
    fn test_panel_view_states() {
        let mut panel = PanelState::new();
        panel.update_symbol("tcs");

        let idle = panel.view();
        assert_eq!(idle.symbol, "TCS");
        assert_eq!(idle.submit_label, SUBMIT_LABEL);
        assert!(!idle.submit_disabled);
        assert_eq!(idle.body, PanelBody::Empty);

        let submission = panel.begin_submission().unwrap();
        let loading = panel.view();
        assert_eq!(loading.submit_label, BUSY_LABEL);
        assert!(loading.submit_disabled);
        assert_eq!(loading.body, PanelBody::Empty);

        panel.complete(
            submission.token,
            Err(PredictionError::Server {
                status: 404,
                message: Some("No valid data found for TCS".into()),
            }),
        );
        assert_eq!(
            panel.view().body,
            PanelBody::Error("No valid data found for TCS".into())
        );

        let submission = panel.begin_submission().unwrap();
        panel.complete(submission.token, Ok(sample_result()));
        match panel.view().body {
            PanelBody::Result(view) => assert_eq!(view.symbol, "TCS"),
            other => panic!("expected result body, got {:?}", other),
        }
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_return(0.03125), "0.0313");
        assert_eq!(format_return(-0.03125), "-0.0313");
        assert_eq!(format_importance(Some(-0.03125)), "-0.0313");
        assert_eq!(format_importance(Some(0.0)), "0.0000");
        assert_eq!(format_percent(0.7321), "73.21%");
        assert_eq!(format_percent(0.5), "50.00%");
    }

    #[test]
    fn test_empty_labels_are_skipped() {
        let result = PredictionResult {
            symbol: "TCS".into(),
            tomorrow_prediction: Some(String::new()),
            suggestion: Some(String::new()),
            ..Default::default()
        };
        let view = render_result(&result);
        assert!(view.section(SectionKind::TomorrowTrend).is_none());
        assert!(view.section(SectionKind::Suggestion).is_none());
        assert!(view.sections.is_empty());
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date("2024-01-01"), "2024-01-01");
        assert_eq!(format_date("2024-01-01 00:00:00"), "2024-01-01");
        assert_eq!(format_date("2024-01-01T00:00:00+05:30"), "2024-01-01");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_timestamp("2024-01-01T10:30:00Z"), "2024-01-01 10:30");
    }
}

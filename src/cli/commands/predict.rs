use std::process::ExitCode;

use anyhow::Result;
use common::PanelState;
use tracing::{info, trace, warn};

use crate::client::{submit_prediction, HttpPredictionClient};
use crate::config::Settings;
use crate::display::render_text;

pub async fn predict(settings: &Settings, symbol: &str, json: bool) -> Result<ExitCode> {
    trace!("Entering predict function");
    let client = HttpPredictionClient::new(&settings.endpoint_url, settings.request_timeout_ms)?;

    let mut panel = PanelState::new();
    panel.update_symbol(symbol);

    info!("Requesting prediction for {}", panel.symbol());
    if !submit_prediction(&mut panel, &client).await {
        warn!("Nothing to submit: symbol is blank");
        eprintln!("Please enter a stock symbol");
        return Ok(ExitCode::FAILURE);
    }

    if let Some(error) = panel.error() {
        eprintln!("{}", render_text(&panel.view()));
        info!("Prediction failed: {}", error);
        return Ok(ExitCode::FAILURE);
    }

    match (json, panel.result()) {
        (true, Some(result)) => println!("{}", serde_json::to_string_pretty(result)?),
        _ => println!("{}", render_text(&panel.view())),
    }
    Ok(ExitCode::SUCCESS)
}

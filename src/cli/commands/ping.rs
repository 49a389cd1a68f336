use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, error};

use crate::client::HttpPredictionClient;
use crate::config::Settings;

pub async fn ping(settings: &Settings) -> Result<ExitCode> {
    let client = HttpPredictionClient::new(&settings.endpoint_url, settings.request_timeout_ms)?;
    debug!("Probing service behind {}", client.endpoint_url());

    match client.ping().await {
        Ok(message) => {
            println!("{}", message);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Service check failed: {:#}", e);
            eprintln!("Prediction service unreachable: {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::Settings;
use commands::{interactive, ping, predict, serve};

#[derive(Parser)]
#[command(name = "smartfin")]
#[command(about = "SmartFin stock predictor: terminal client and web frontend host")]
#[command(version)]
pub struct Cli {
    /// Prediction endpoint URL
    ///
    /// Overrides `endpoint_url` from smartfin.toml and SMARTFIN_ENDPOINT_URL.
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds (0 waits forever)
    #[arg(short, long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a prediction for one symbol and print it
    ///
    /// Exits with a non-zero status when the prediction fails.
    Predict {
        /// Ticker symbol (e.g., TCS, INFY, RELIANCE)
        symbol: String,

        /// Print the raw prediction as JSON instead of the formatted panel
        #[arg(long)]
        json: bool,
    },
    /// Read symbols from standard input, one prediction per line
    Interactive,
    /// Check that the prediction service is reachable
    Ping,
    /// Serve the built web frontend
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:8080, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Directory with the built frontend (index.html and wasm bundle)
        #[arg(short, long)]
        assets_dir: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let settings = Settings::load()?.with_overrides(self.endpoint, self.timeout_ms);

        match self.command {
            Commands::Predict { symbol, json } => predict(&settings, &symbol, json).await,
            Commands::Interactive => interactive(&settings).await,
            Commands::Ping => ping(&settings).await,
            Commands::Serve {
                bind_address,
                assets_dir,
            } => {
                let bind_address = bind_address.unwrap_or_else(|| settings.bind_address.clone());
                let assets_dir = assets_dir.unwrap_or_else(|| settings.assets_dir.clone());
                serve(&bind_address, &assets_dir).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

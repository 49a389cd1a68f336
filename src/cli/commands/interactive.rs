use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use common::PanelState;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::client::{submit_prediction, HttpPredictionClient, PredictionClient};
use crate::config::Settings;
use crate::display::render_text;

const PROMPT: &str = "symbol> ";

/// Counts of one interactive session
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub submitted: usize,
    pub failed: usize,
}

pub async fn interactive(settings: &Settings) -> Result<ExitCode> {
    let client = HttpPredictionClient::new(&settings.endpoint_url, settings.request_timeout_ms)?;
    info!("Interactive session against {}", client.endpoint_url());

    let stdin = BufReader::new(tokio::io::stdin());
    let summary = run_session(stdin, std::io::stdout(), &client).await?;

    info!(
        submitted = summary.submitted,
        failed = summary.failed,
        "Interactive session finished"
    );
    Ok(ExitCode::SUCCESS)
}

/// Drive one panel from line-oriented input.
///
/// Each line replaces the symbol and submits it; blank lines are skipped by the
/// panel itself. The panel is kept between lines, so every answer replaces the
/// previous result or error. A line that is not valid UTF-8 is reported and
/// skipped without ending the session.
pub async fn run_session<R, W, C>(mut reader: R, mut out: W, client: &C) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    C: PredictionClient,
{
    let mut panel = PanelState::new();
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();

    write!(out, "{}", PROMPT)?;
    out.flush()?;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                warn!("Skipping input line that is not valid UTF-8: {}", e);
                writeln!(out, "⚠️ Input is not valid UTF-8")?;
                write!(out, "{}", PROMPT)?;
                out.flush()?;
                continue;
            }
        };
        panel.update_symbol(line);

        if submit_prediction(&mut panel, client).await {
            summary.submitted += 1;
            if panel.error().is_some() {
                summary.failed += 1;
            }
            writeln!(out, "{}", render_text(&panel.view()))?;
        } else {
            debug!("Skipping blank input");
        }

        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }
    writeln!(out)?;

    Ok(summary)
}

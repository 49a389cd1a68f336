use anyhow::Result;
use common::DEFAULT_ENDPOINT_URL;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the `smartfin` binary
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Full URL of the prediction endpoint
    pub endpoint_url: String,
    /// Upper bound on a prediction request, 0 waits forever
    pub request_timeout_ms: u64,
    /// Bind address for `serve`
    pub bind_address: String,
    /// Directory holding the built frontend
    pub assets_dir: String,
}

impl Settings {
    /// Load configuration
    ///
    /// Layers, lowest precedence first: built-in defaults, an optional
    /// `smartfin.toml` in the working directory, then `SMARTFIN_*` environment
    /// variables (after `.env` has been applied).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_file(Some("smartfin"))
    }

    pub(crate) fn from_file(file: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("endpoint_url", DEFAULT_ENDPOINT_URL)?
            .set_default("request_timeout_ms", 30000)?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("assets_dir", "workspace/frontend/dist")?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("SMARTFIN"))
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, endpoint_url: Option<String>, request_timeout_ms: Option<u64>) -> Self {
        if let Some(endpoint_url) = endpoint_url {
            self.endpoint_url = endpoint_url;
        }
        if let Some(request_timeout_ms) = request_timeout_ms {
            self.request_timeout_ms = request_timeout_ms;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::from_file(None).unwrap();
        assert_eq!(settings.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(settings.assets_dir, "workspace/frontend/dist");
    }

    #[test]
    fn test_missing_file_is_optional() {
        let settings = Settings::from_file(Some("does-not-exist-smartfin")).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_file(None)
            .unwrap()
            .with_overrides(Some("http://10.0.0.5:5000/predict".into()), Some(0));

        assert_eq!(settings.endpoint_url, "http://10.0.0.5:5000/predict");
        assert_eq!(settings.request_timeout_ms, 0);

        let untouched = settings.clone().with_overrides(None, None);
        assert_eq!(untouched, settings);
    }
}

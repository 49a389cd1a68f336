use common::DEFAULT_ENDPOINT_URL;
use log::Level;
use wasm_bindgen::JsValue;
use web_sys::{window, UrlSearchParams};

const ENDPOINT_KEY: &str = "smartfin_endpoint_url";
const LOG_LEVEL_KEY: &str = "smartfin_log_level";
const TIMEOUT_KEY: &str = "smartfin_request_timeout_ms";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Full URL of the prediction endpoint
    pub endpoint_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Request timeout in milliseconds, 0 waits forever
    pub request_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            log_level: Level::Info,
            request_timeout_ms: 30000,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    ///
    /// Precedence: `?endpoint=` query parameter, then localStorage, then defaults.
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(endpoint)) = storage.get_item(ENDPOINT_KEY) {
                if !endpoint.trim().is_empty() {
                    settings.endpoint_url = endpoint;
                }
            }

            if let Ok(Some(log_level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = parse_log_level(&log_level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(timeout)) = storage.get_item(TIMEOUT_KEY) {
                if let Ok(timeout_val) = timeout.parse::<u32>() {
                    settings.request_timeout_ms = timeout_val;
                }
            }
        }

        if let Ok(search) = window.location().search() {
            if let Ok(params) = UrlSearchParams::new_with_str(&search) {
                if let Some(endpoint) = params.get("endpoint").filter(|e| !e.trim().is_empty()) {
                    settings.endpoint_url = endpoint;
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(ENDPOINT_KEY, &self.endpoint_url)?;
                storage.set_item(LOG_LEVEL_KEY, &format!("{:?}", self.log_level).to_lowercase())?;
                storage.set_item(TIMEOUT_KEY, &self.request_timeout_ms.to_string())?;
            }
        }
        Ok(())
    }
}

fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_service() {
        let settings = AppSettings::default();
        assert_eq!(settings.endpoint_url, "http://127.0.0.1:5000/predict");
        assert_eq!(settings.request_timeout_ms, 30000);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_log_level(" warn "), Some(Level::Warn));
        assert_eq!(parse_log_level("loud"), None);
    }

    #[test]
    fn test_update_settings() {
        update_settings(|s| s.endpoint_url = "https://predict.example.com/predict".into());
        assert_eq!(
            get_settings().endpoint_url,
            "https://predict.example.com/predict"
        );
    }
}

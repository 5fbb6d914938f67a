use log::Level;
use web_sys::window;

const API_URL_KEY: &str = "powercast_api_url";
const LOG_LEVEL_KEY: &str = "powercast_log_level";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend base URL (e.g., "http://localhost:5001"). Empty means same
    /// origin, which goes through the dev server's proxy.
    pub api_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Upper bound on the health check in milliseconds
    pub health_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            log_level: Level::Info,
            health_timeout_ms: compute::HEALTH_TIMEOUT_MS,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(api_url)) = storage.get_item(API_URL_KEY) {
                settings.api_url = api_url.trim_end_matches('/').to_string();
            }
            if let Ok(Some(level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }
        }

        settings
    }

    /// Full URL for an endpoint path
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url, endpoint)
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
    fn test_level_names() {
        assert_eq!(parse_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_level("warn"), Some(Level::Warn));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_empty_base_is_same_origin() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_url("/api/health"), "/api/health");
        let settings = AppSettings {
            api_url: "http://localhost:5001".into(),
            ..Default::default()
        };
        assert_eq!(settings.api_url("/upload"), "http://localhost:5001/upload");
    }
}

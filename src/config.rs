use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Settings of the dev server and the headless commands.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the forecasting backend
    pub backend_url: String,
    /// Address `serve` listens on
    pub bind_address: String,
    /// Built frontend served by `serve`
    pub dist_dir: String,
    pub health_timeout_ms: u32,
}

impl Settings {
    /// Defaults, then `powercast.toml` if present, then `POWERCAST_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from("powercast")
    }

    pub fn load_from(file_stem: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("backend_url", "http://localhost:5001")?
            .set_default("bind_address", "0.0.0.0:5173")?
            .set_default("dist_dir", "workspace/frontend/dist")?
            .set_default("health_timeout_ms", i64::from(compute::HEALTH_TIMEOUT_MS))?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("POWERCAST"))
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Backend URL without a trailing slash.
    pub fn backend_base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("does-not-exist-powercast").unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:5173");
        assert_eq!(settings.dist_dir, "workspace/frontend/dist");
        assert_eq!(settings.health_timeout_ms, 5000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("powercast-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        std::fs::write(
            &path,
            "backend_url = \"http://backend:9000/\"\nhealth_timeout_ms = 750\n",
        )
        .unwrap();

        let stem = dir.join("custom");
        let settings = Settings::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(settings.backend_base(), "http://backend:9000");
        assert_eq!(settings.health_timeout_ms, 750);
        assert_eq!(settings.bind_address, "0.0.0.0:5173");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

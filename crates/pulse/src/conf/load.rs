//! Load — config loading from file and environment variables.

use std::path::Path;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;

use super::model::PulseConfig;

const DEFAULT_CONFIG_PATH: &str = "/etc/pulse/pulse.toml";

impl PulseConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("PULSE_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: PulseConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults overridden by whatever `PULSE_*` variables are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        override_from_env("PULSE_SIMILARITY_THRESHOLD", &mut self.similarity_threshold);
        override_from_env("PULSE_DETOUR_WINDOW", &mut self.detour_window);
        override_from_env("PULSE_CHANNEL_CAPACITY", &mut self.channel_capacity);
        override_from_env("PULSE_MAX_POOL_SIZE", &mut self.max_pool_size);
        override_from_env("PULSE_MAX_LINE_LEN", &mut self.max_line_len);
        override_from_env("PULSE_OUTPUT", &mut self.output);
    }
}

/// Unparseable values are ignored with a warning.
fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!("Ignoring invalid {}={:?}", key, raw),
        }
    }
}

use std::env;

use serde::{Deserialize, Serialize};

use self::overlay::OverlayConfig;
use self::translator::TranslatorConfig;

pub mod overlay;
pub mod preferences;
pub mod translator;

pub use preferences::{Preferences, SettingsFile};

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub overlay: OverlayConfig,

    /// Preferences file, platform config dir when unset
    pub preferences_path: Option<String>,
    /// tracing filter directive, `RUST_LOG` wins over it
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            overlay: OverlayConfig::default(),
            preferences_path: None,
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

impl Config {
    /// Defaults overridden by the environment
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Parse a JSON profile, then let the environment override it
    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(data)?;
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.translator.apply_env();

        if let Ok(path) = env::var("TEXTRA_PREFERENCES") {
            self.preferences_path = Some(path);
        }
        if let Ok(filter) = env::var("TEXTRA_LOG") {
            self.log_filter = filter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"translator":{"region":"westeurope"},"overlay":{"width":520}}"#)
                .unwrap();

        assert_eq!(config.translator.region, "westeurope");
        assert_eq!(config.translator.api_version, "3.0");
        assert_eq!(
            config.translator.endpoint,
            "https://api.cognitive.microsofttranslator.com/translate"
        );
        assert_eq!(config.overlay.width, 520);
        assert_eq!(config.overlay.height, 300);
        assert_eq!(config.log_filter, "info");
        assert!(!config.translator.has_credentials());
    }
}

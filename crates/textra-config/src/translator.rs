use std::env;

use serde::{Deserialize, Serialize};

fn default_provider() -> String {
    "azure".to_string()
}

fn default_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com/translate".to_string()
}

fn default_api_version() -> String {
    "3.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Subscription key, usually supplied through the environment
    #[serde(default)]
    pub api_key: String,
    /// Subscription region, header is skipped when empty
    #[serde(default)]
    pub region: String,
    /// Per request timeout, 0 disables it
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            api_key: String::new(),
            region: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TranslatorConfig {
    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var("TEXTRA_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(key) = env::var("AZURE_TRANSLATOR_KEY") {
            self.api_key = key;
        }
        if let Ok(region) = env::var("AZURE_TRANSLATOR_REGION") {
            self.region = region;
        }
        if let Some(timeout) = env::var("TEXTRA_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_LANG: &str = "en";
pub const DEFAULT_OUTPUT_LANG: &str = "vi";

fn default_input_lang() -> String {
    DEFAULT_INPUT_LANG.to_string()
}

fn default_output_lang() -> String {
    DEFAULT_OUTPUT_LANG.to_string()
}

/// Language pair the user picked in the settings surface
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_input_lang")]
    pub input_lang: String,
    #[serde(default = "default_output_lang")]
    pub output_lang: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            input_lang: default_input_lang(),
            output_lang: default_output_lang(),
        }
    }
}

impl Preferences {
    /// Replace blank or unsupported codes with the defaults
    pub fn resolve(self, is_supported: impl Fn(&str) -> bool) -> Self {
        let pick = |code: String, fallback: &str| {
            let trimmed = code.trim();
            if !trimmed.is_empty() && is_supported(trimmed) {
                trimmed.to_string()
            } else {
                fallback.to_string()
            }
        };

        Self {
            input_lang: pick(self.input_lang, DEFAULT_INPUT_LANG),
            output_lang: pick(self.output_lang, DEFAULT_OUTPUT_LANG),
        }
    }
}

/// Settings namespace as it is stored on disk
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsFile {
    pub settings: Preferences,
}

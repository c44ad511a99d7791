use serde::{Deserialize, Serialize};

fn default_width() -> u32 {
    400
}

fn default_height() -> u32 {
    300
}

fn default_gap() -> f64 {
    10.0
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Vertical distance between the selection and the overlay
    #[serde(default = "default_gap")]
    pub anchor_gap: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            anchor_gap: default_gap(),
        }
    }
}

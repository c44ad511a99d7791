use std::sync::{Arc, Mutex};

use serde::Serialize;
use textra_types::{OverlayId, Position};

use crate::component::OverlayDescription;

/// Changes a UI layer has to reflect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceUpdate {
    Mounted { overlay: OverlayDescription },
    TextUpdated { overlay_id: OverlayId, text: String },
    Moved { overlay_id: OverlayId, position: Position },
    Unmounted { overlay_id: OverlayId },
}

/// Whatever actually draws overlays
pub trait OverlaySurface: Send {
    fn apply(&mut self, update: SurfaceUpdate) -> anyhow::Result<()>;
}

/// Keeps every update in memory, handy for headless runs and tests
#[derive(Clone, Default)]
pub struct MemorySurface {
    updates: Arc<Mutex<Vec<SurfaceUpdate>>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<SurfaceUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }
}

impl OverlaySurface for MemorySurface {
    fn apply(&mut self, update: SurfaceUpdate) -> anyhow::Result<()> {
        self.updates
            .lock()
            .map_err(|_| anyhow::anyhow!("surface log poisoned"))?
            .push(update);
        Ok(())
    }
}

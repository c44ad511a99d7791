use kanal::AsyncReceiver;
use textra_types::AppEvent;

pub mod bridge;
pub mod component;
pub mod drag;
pub mod events;
pub mod presenter;
pub mod state;
pub mod surface;

pub use bridge::{Relay, RelayBridge, RelayClient, RelayRequest, RelayServer};
pub use component::OverlayDescription;
pub use events::{UiContext, handle_events};
pub use presenter::{Overlay, OverlayEffect, RETRANSLATION_FAILED};
pub use state::{OverlayState, UiState};
pub use surface::{MemorySurface, OverlaySurface, SurfaceUpdate};

/// Overlay loop: mounts overlays and routes user interaction to them
pub async fn ui_loop<S: OverlaySurface>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    context: UiContext,
    mut surface: S,
) -> anyhow::Result<()> {
    let mut ui = UiState::new();

    tracing::info!("[UI] Overlay loop started");
    while let Ok(event) = app_to_ui_rx.recv().await {
        if !handle_events(event, &mut ui, &mut surface, &context)? {
            break;
        }
    }
    if ui.is_empty() {
        tracing::info!("[UI] Overlay loop stopped");
    } else {
        tracing::info!("[UI] Overlay loop stopped with {} overlay(s) open", ui.len());
    }

    Ok(())
}

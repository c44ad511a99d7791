use std::sync::Arc;

use kanal::AsyncSender;
use textra_config::overlay::OverlayConfig;
use textra_types::AppEvent;

use crate::bridge::Relay;
use crate::presenter::{Overlay, OverlayEffect, RetranslateRequest};
use crate::state::UiState;
use crate::surface::{OverlaySurface, SurfaceUpdate};

/// Shared dependencies of the overlay loop
#[derive(Clone)]
pub struct UiContext {
    pub relay: Arc<dyn Relay>,
    /// Sender into the overlay loop's own queue, relay answers come back through it
    pub ui_tx: AsyncSender<AppEvent>,
    pub languages: &'static [(&'static str, &'static str)],
    pub config: OverlayConfig,
}

/// Returns false once the loop should stop
pub fn handle_events<S: OverlaySurface + ?Sized>(
    event: AppEvent,
    ui: &mut UiState,
    surface: &mut S,
    context: &UiContext,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::ShowOverlay(payload) => {
            let overlay = Overlay::open(&payload, context.languages, &context.config);
            tracing::debug!(
                "[UI] Mounting overlay {} for tab {:?} ({} -> {})",
                overlay.id(),
                payload.tab_id,
                payload.source_language,
                payload.target_language
            );
            surface.apply(SurfaceUpdate::Mounted {
                overlay: overlay.description().clone(),
            })?;
            ui.insert(overlay);
        }
        AppEvent::Overlay { overlay_id, event } => {
            let Some(id) = ui.resolve(overlay_id) else {
                tracing::debug!("[UI] No live overlay for {:?}, event ignored", overlay_id);
                return Ok(true);
            };
            let Some(overlay) = ui.get_mut(&id) else {
                return Ok(true);
            };

            if let Some(effect) = overlay.handle(event) {
                apply_effect(id, effect, ui, surface, context)?;
            }
        }
        AppEvent::RetranslationFinished {
            overlay_id,
            seq,
            result,
        } => {
            let Some(overlay) = ui.get_mut(&overlay_id) else {
                tracing::debug!("[UI] Overlay {} closed before its translation arrived", overlay_id);
                return Ok(true);
            };

            if let Some(effect) = overlay.finish_retranslation(seq, result) {
                apply_effect(overlay_id, effect, ui, surface, context)?;
            }
        }
        AppEvent::Shutdown => {
            tracing::info!("[UI] Shutdown requested");
            return Ok(false);
        }
        AppEvent::MenuClicked(_) => {
            // Handled by the background event loop
        }
    }

    Ok(true)
}

fn apply_effect<S: OverlaySurface + ?Sized>(
    overlay_id: textra_types::OverlayId,
    effect: OverlayEffect,
    ui: &mut UiState,
    surface: &mut S,
    context: &UiContext,
) -> anyhow::Result<()> {
    match effect {
        OverlayEffect::Retranslate(request) => {
            spawn_retranslation(request, context);
        }
        OverlayEffect::TextReplaced(text) => {
            surface.apply(SurfaceUpdate::TextUpdated { overlay_id, text })?;
        }
        OverlayEffect::Moved(position) => {
            surface.apply(SurfaceUpdate::Moved {
                overlay_id,
                position,
            })?;
        }
        OverlayEffect::Dismissed => {
            ui.remove(&overlay_id);
            surface.apply(SurfaceUpdate::Unmounted { overlay_id })?;
            tracing::debug!("[UI] Overlay {} dismissed, {} left", overlay_id, ui.len());
        }
    }

    Ok(())
}

fn spawn_retranslation(request: RetranslateRequest, context: &UiContext) {
    let relay = context.relay.clone();
    let ui_tx = context.ui_tx.clone();

    tokio::spawn(async move {
        let RetranslateRequest {
            overlay_id,
            seq,
            message,
        } = request;
        let result = relay.request(message).await;

        if let Err(e) = ui_tx
            .send(AppEvent::RetranslationFinished {
                overlay_id,
                seq,
                result,
            })
            .await
        {
            tracing::error!("Failed to hand translation back to the overlay: {}", e);
        }
    });
}

use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use textra_translator::TranslationPipeline;
use textra_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod retranslate;
pub mod selection;

use selection::handle_menu_click;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    pipeline: TranslationPipeline,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    // One task per selection, a slow batch must not hold back the next click
    let mut selections = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            Some(joined) = selections.join_next(), if !selections.is_empty() => {
                log_selection(joined);
                continue;
            }
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );
        if !handle_events(&state, &pipeline, &app_to_ui_tx, &mut selections, &cancel, event).await? {
            break;
        }
    }
    tracing::info!(
        "[EVENT_LOOP] Stopped, abandoning {} selection(s)",
        selections.len()
    );

    Ok(())
}

/// Returns false once the loop should stop
async fn handle_events(
    state: &Arc<AppState>,
    pipeline: &TranslationPipeline,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    selections: &mut JoinSet<anyhow::Result<()>>,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::MenuClicked(click) => {
            selections.spawn(handle_menu_click(
                state.clone(),
                pipeline.clone(),
                click,
                app_to_ui_tx.clone(),
            ));
        }
        AppEvent::Shutdown => {
            // Selections clicked before shutdown still get their overlay
            // unless a hard cancel comes first
            tracing::info!("[EVENT_LOOP] Draining {} selection(s)", selections.len());
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(false),
                    joined = selections.join_next() => match joined {
                        Some(joined) => log_selection(joined),
                        None => break,
                    },
                }
            }
            app_to_ui_tx.send(AppEvent::Shutdown).await?;
            return Ok(false);
        }
        event @ (AppEvent::ShowOverlay(_)
        | AppEvent::Overlay { .. }
        | AppEvent::RetranslationFinished { .. }) => {
            app_to_ui_tx.send(event).await?;
        }
    }

    Ok(true)
}

fn log_selection(joined: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match joined {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("[EVENT_LOOP] Selection failed: {:#}", e),
        Err(e) => tracing::error!("[EVENT_LOOP] Selection task panicked: {}", e),
    }
}

use std::sync::Arc;

use kanal::AsyncSender;
use textra_translator::{TranslationPipeline, TranslationRequest, languages};
use textra_types::{AppEvent, MenuClick, OverlayPayload};

use crate::state::AppState;

/// Context menu click: resolve preferences, translate, open an overlay
pub async fn handle_menu_click(
    state: Arc<AppState>,
    pipeline: TranslationPipeline,
    click: MenuClick,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(text) = state.menus.selection_for(&click) else {
        tracing::debug!("Ignoring click on '{}'", click.menu_item_id);
        return Ok(());
    };

    let preferences = match state.preferences.load().await {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::warn!("Failed to load preferences, using defaults: {:#}", e);
            Default::default()
        }
    }
    .resolve(languages::is_supported);

    tracing::info!(
        "Translating selection from tab {:?}: {} chars, {} -> {}",
        click.tab_id,
        text.len(),
        preferences.input_lang,
        preferences.output_lang
    );

    let request = TranslationRequest::new(text, &preferences.input_lang, &preferences.output_lang);
    let translated = pipeline.translate_or_fallback(&request).await;

    app_to_ui_tx
        .send(AppEvent::ShowOverlay(OverlayPayload {
            translated_text: translated,
            original_text: request.text,
            source_language: request.source_language,
            target_language: request.target_language,
            tab_id: click.tab_id,
            anchor: click.anchor,
            scroll: click.scroll,
        }))
        .await?;

    Ok(())
}

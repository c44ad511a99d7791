use textra_overlay::{RelayRequest, RelayServer};
use textra_translator::{TranslationPipeline, TranslationRequest};
use textra_types::RelayMessage;
use tokio_util::sync::CancellationToken;

/// Background side of the relay: every message runs the pipeline on its own task
pub async fn relay_loop(
    server: RelayServer,
    pipeline: TranslationPipeline,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[RELAY] Waiting for overlay messages");
    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => break,
            request = server.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        let pipeline = pipeline.clone();
        tokio::spawn(handle_relay_request(request, pipeline));
    }
    tracing::info!("[RELAY] Stopped");

    Ok(())
}

pub async fn handle_relay_request(request: RelayRequest, pipeline: TranslationPipeline) {
    let RelayMessage::Retranslate { text, from, to } = request.message.clone();
    tracing::debug!("[RELAY] retranslate {} chars {} -> {}", text.len(), from, to);

    let translated = pipeline
        .translate_or_fallback(&TranslationRequest::new(text, from, to))
        .await;
    request.respond(translated);
}

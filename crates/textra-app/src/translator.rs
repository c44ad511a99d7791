use std::sync::Arc;
use std::time::Duration;

use textra_config::translator::TranslatorConfig;
use textra_translator::{AzureTranslator, TranslationPipeline, Translator};

/// Provider named in the config, wrapped in the paragraph pipeline
pub fn build_pipeline(config: &TranslatorConfig) -> anyhow::Result<TranslationPipeline> {
    let translator: Arc<dyn Translator> = match config.provider.as_str() {
        "azure" => Arc::new(
            AzureTranslator::new(
                config.api_key.clone(),
                config.region.clone(),
                config.endpoint.clone(),
            )
            .with_api_version(config.api_version.clone())
            .with_timeout(Duration::from_secs(config.timeout_seconds))?,
        ),
        other => anyhow::bail!("Unknown translation provider: {}", other),
    };

    if !config.has_credentials() {
        tracing::warn!("No translator API key configured, translations will fall back");
    }
    tracing::info!("Using {}", translator.metadata().name);

    Ok(TranslationPipeline::new(translator))
}

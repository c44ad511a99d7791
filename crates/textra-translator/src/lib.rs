pub mod azure;
pub mod languages;
pub mod pipeline;

pub use azure::AzureTranslator;
pub use pipeline::{
    PARAGRAPH_PLACEHOLDER, PARAGRAPH_SEPARATOR, TRANSLATION_FALLBACK, TranslationPipeline,
    TranslationRequest, split_paragraphs,
};

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate one unit of text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Code and display name of every language the provider accepts
    fn supported_languages(&self) -> &'static [(&'static str, &'static str)] {
        languages::SUPPORTED_LANGUAGES
    }

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

/// Failure of a single provider call
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call completed but the body carried no translation
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing API credentials")]
    MissingCredentials,
}

/// Failure of a whole pipeline call
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(LanguageCode),

    #[error("Paragraph {index} failed: {source}")]
    Paragraph {
        index: usize,
        #[source]
        source: TranslateError,
    },
}

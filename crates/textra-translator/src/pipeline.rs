use std::sync::{Arc, LazyLock};

use futures::future::join_all;
use regex::Regex;

use crate::languages;
use crate::{LanguageCode, TranslateError, TranslationError, Translator};

/// Substituted for a paragraph whose response carried no translation
pub const PARAGRAPH_PLACEHOLDER: &str = "Translation error or unsupported language";
/// Returned to callers when the whole batch failed
pub const TRANSLATION_FALLBACK: &str = "Error in translation";
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)+").expect("paragraph pattern is valid"));

/// Split on runs of line breaks. Leading and trailing empty paragraphs are kept.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK.split(text).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<LanguageCode>,
        target_language: impl Into<LanguageCode>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Fans a text out to one provider call per paragraph and joins the results in order
#[derive(Clone)]
pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
}

impl TranslationPipeline {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        for code in [&request.source_language, &request.target_language] {
            if !languages::is_supported(code) {
                return Err(TranslationError::UnsupportedLanguage(code.clone()));
            }
        }

        let paragraphs = split_paragraphs(&request.text);
        tracing::debug!(
            "Translating {} paragraph(s) {} -> {}",
            paragraphs.len(),
            request.source_language,
            request.target_language
        );

        let calls = paragraphs.iter().map(|paragraph| {
            self.translator.translate(
                paragraph,
                request.source_language.clone(),
                request.target_language.clone(),
            )
        });

        // Every call settles before any result is inspected
        let settled = join_all(calls).await;

        let mut segments = Vec::with_capacity(settled.len());
        for (index, outcome) in settled.into_iter().enumerate() {
            match outcome {
                Ok(translation) => segments.push(translation.text),
                Err(TranslateError::MalformedResponse(reason)) => {
                    tracing::warn!("Paragraph {} has no translation: {}", index, reason);
                    segments.push(PARAGRAPH_PLACEHOLDER.to_string());
                }
                Err(source) => return Err(TranslationError::Paragraph { index, source }),
            }
        }

        Ok(segments.join(PARAGRAPH_SEPARATOR))
    }

    /// Same as [`translate`](Self::translate) but degrades to [`TRANSLATION_FALLBACK`]
    pub async fn translate_or_fallback(&self, request: &TranslationRequest) -> String {
        match self.translate(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Translation API error: {}", e);
                TRANSLATION_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{ProviderMetadata, Translation};

    /// Returns the input unchanged. Paragraphs listed in `malformed` or `broken`
    /// fail the matching way; `delay_ms` makes early paragraphs finish last.
    #[derive(Default)]
    struct MockTranslator {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        finished: Mutex<Vec<String>>,
        malformed: Vec<&'static str>,
        broken: Vec<&'static str>,
        delay_ms: Option<u64>,
    }

    async fn transport_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err()
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            let position = self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(text.to_string());

            if let Some(base) = self.delay_ms {
                let wait = base.saturating_sub(position as u64 * 10);
                tokio::time::sleep(Duration::from_millis(wait)).await;
            }
            self.finished.lock().unwrap().push(text.to_string());

            if self.malformed.iter().any(|m| *m == text) {
                return Err(TranslateError::MalformedResponse("no translations".to_string()));
            }
            if self.broken.iter().any(|b| *b == text) {
                return Err(TranslateError::Transport(transport_error().await));
            }

            Ok(Translation {
                text: text.to_string(),
                from,
                to,
                provider: "mock".to_string(),
            })
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "mock".to_string(),
                requires_api_key: false,
            }
        }
    }

    fn pipeline(mock: MockTranslator) -> (TranslationPipeline, Arc<MockTranslator>) {
        let mock = Arc::new(mock);
        (TranslationPipeline::new(mock.clone()), mock)
    }

    #[test]
    fn splits_on_runs_of_line_breaks() {
        assert_eq!(split_paragraphs("a\n\n\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_paragraphs("a\r\n\r\nb"), vec!["a", "b"]);
        assert_eq!(split_paragraphs("\nfirst"), vec!["", "first"]);
        assert_eq!(split_paragraphs("last\n"), vec!["last", ""]);
        assert_eq!(split_paragraphs(""), vec![""]);
        assert_eq!(split_paragraphs("no breaks"), vec!["no breaks"]);
    }

    #[tokio::test]
    async fn echo_round_trip_keeps_paragraphs() {
        let (pipeline, mock) = pipeline(MockTranslator::default());
        let request = TranslationRequest::new("Hello\n\nWorld", "en", "en");

        let result = pipeline.translate(&request).await.unwrap();

        assert_eq!(result, "Hello\n\nWorld");
        assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn one_call_per_paragraph_joined_by_blank_line() {
        let (pipeline, mock) = pipeline(MockTranslator::default());
        let request = TranslationRequest::new("one\ntwo\n\n\nthree", "en", "vi");

        let result = pipeline.translate(&request).await.unwrap();

        assert_eq!(mock.calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.split(PARAGRAPH_SEPARATOR).collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn order_follows_input_not_completion() {
        let (pipeline, mock) = pipeline(MockTranslator {
            delay_ms: Some(60),
            ..Default::default()
        });
        let request = TranslationRequest::new("p1\np2\np3\np4", "en", "fr");

        let result = pipeline.translate(&request).await.unwrap();

        assert_eq!(result, "p1\n\np2\n\np3\n\np4");
        let finished = mock.finished.lock().unwrap().clone();
        assert_eq!(finished.first().map(String::as_str), Some("p4"));
        assert_eq!(finished.last().map(String::as_str), Some("p1"));
    }

    #[tokio::test]
    async fn malformed_paragraph_gets_placeholder() {
        let (pipeline, _) = pipeline(MockTranslator {
            malformed: vec!["bad"],
            ..Default::default()
        });
        let request = TranslationRequest::new("good\nbad\nfine", "en", "de");

        let result = pipeline.translate(&request).await.unwrap();

        let segments: Vec<_> = result.split(PARAGRAPH_SEPARATOR).collect();
        assert_eq!(segments, vec!["good", PARAGRAPH_PLACEHOLDER, "fine"]);
    }

    #[tokio::test]
    async fn transport_failure_aborts_batch() {
        let (pipeline, mock) = pipeline(MockTranslator {
            broken: vec!["two"],
            ..Default::default()
        });
        let request = TranslationRequest::new("one\ntwo\nthree", "en", "ja");

        let err = pipeline.translate(&request).await.unwrap_err();
        assert!(matches!(err, TranslationError::Paragraph { index: 1, .. }));
        // the barrier still waited for every call
        assert_eq!(mock.finished.lock().unwrap().len(), 3);

        let text = pipeline.translate_or_fallback(&request).await;
        assert_eq!(text, TRANSLATION_FALLBACK);
    }

    #[tokio::test]
    async fn malformed_and_transport_failures_stay_distinct() {
        let (pipeline, _) = pipeline(MockTranslator {
            malformed: vec!["odd"],
            broken: vec!["dead"],
            ..Default::default()
        });

        let partial = TranslationRequest::new("odd\nok", "en", "ko");
        assert_eq!(
            pipeline.translate_or_fallback(&partial).await,
            format!("{}\n\nok", PARAGRAPH_PLACEHOLDER)
        );

        let fatal = TranslationRequest::new("odd\ndead", "en", "ko");
        assert_eq!(pipeline.translate_or_fallback(&fatal).await, TRANSLATION_FALLBACK);
    }

    #[tokio::test]
    async fn unknown_language_is_rejected_without_calls() {
        let (pipeline, mock) = pipeline(MockTranslator::default());
        let request = TranslationRequest::new("Hello", "en", "xx");

        let err = pipeline.translate(&request).await.unwrap_err();

        assert!(matches!(err, TranslationError::UnsupportedLanguage(code) if code == "xx"));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.translate_or_fallback(&request).await, TRANSLATION_FALLBACK);
    }

    #[tokio::test]
    async fn empty_paragraphs_are_still_sent() {
        let (pipeline, mock) = pipeline(MockTranslator::default());
        let request = TranslationRequest::new("\nbody\n", "en", "vi");

        let result = pipeline.translate(&request).await.unwrap();

        assert_eq!(*mock.seen.lock().unwrap(), vec!["", "body", ""]);
        assert_eq!(result, "\n\nbody\n\n");
    }
}

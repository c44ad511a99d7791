use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

#[derive(Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

/// Azure Cognitive Services translator, one text item per request
#[derive(Clone)]
pub struct AzureTranslator {
    client: reqwest::Client,
    api_key: String,
    region: String,
    endpoint: String,
    api_version: String,
}

impl AzureTranslator {
    pub fn new(api_key: String, region: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            region,
            endpoint,
            api_version: "3.0".to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    /// Rebuild the HTTP client with a request timeout. Zero keeps calls unbounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, TranslateError> {
        if !timeout.is_zero() {
            self.client = reqwest::Client::builder().timeout(timeout).build()?;
        }
        Ok(self)
    }

    fn request(&self, text: &str, from: &str, to: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("api-version", self.api_version.as_str()),
                ("from", from),
                ("to", to),
            ])
            .header(KEY_HEADER, &self.api_key);

        if !self.region.is_empty() {
            request = request.header(REGION_HEADER, &self.region);
        }

        request.json(&[TextItem { text }])
    }
}

/// Pull `[0].translations[0].text` out of a response body
pub(crate) fn extract_translation(body: &serde_json::Value) -> Option<&str> {
    body.get(0)?
        .get("translations")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredentials);
        }

        let response = self.request(text, &from, &to).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let json: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            TranslateError::MalformedResponse(format!("HTTP {}: unreadable body: {}", status, e))
        })?;

        let translated = extract_translation(&json).ok_or_else(|| {
            TranslateError::MalformedResponse(format!("HTTP {}: no translation in response", status))
        })?;

        Ok(Translation {
            text: translated.to_string(),
            from,
            to,
            provider: "azure".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Azure Translator".to_string(),
            requires_api_key: true,
        }
    }
}

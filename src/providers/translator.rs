use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::TranslatorConfig;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::Translator;

/// HTTP client for a translation service
///
/// Speaks the LibreTranslate-style contract: `POST {endpoint}/translate`
/// with `{"q", "source", "target"}`, returning `{"translatedText"}`.
#[derive(Debug)]
pub struct HttpTranslator {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication (optional)
    api_key: String,
    /// Service endpoint URL
    endpoint: String,
}

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language code
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// API key, included in the body as LibreTranslate expects
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// Translation response body
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl HttpTranslator {
    /// Create a new translator client from configuration
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&TranslateRequest {
                q: text,
                source,
                target,
                api_key: &self.api_key,
            })
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translator API error ({}): {}", status, error_text);

            // 400 on a language pair the service does not support
            if status.as_u16() == 400 && error_text.contains("not supported") {
                return Err(TranslationError::UnsupportedPair {
                    source_lang: source.to_string(),
                    target: target.to_string(),
                });
            }

            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            }
            .into());
        }

        let translated = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(translated.translated_text)
    }
}

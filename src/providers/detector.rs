use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::DetectorConfig;
use crate::errors::{DetectionError, ProviderError};
use crate::language_utils;
use crate::providers::LanguageDetector;

/// HTTP client for a language-detection service
///
/// Expects a `POST {endpoint}/detect` endpoint taking `{"text": ...}` and
/// returning `{"language": ..., "confidence": ...}`. Detections below the
/// configured confidence floor are rejected rather than guessed at.
#[derive(Debug)]
pub struct HttpDetector {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication (optional)
    api_key: String,
    /// Service endpoint URL
    endpoint: String,
    /// Minimum acceptable detection confidence
    min_confidence: f32,
}

/// Detection request body
#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    /// The text to detect the language of
    text: &'a str,
}

/// Detection response body
#[derive(Debug, Deserialize)]
struct DetectResponse {
    /// Detected language code
    language: String,
    /// Confidence of the detection, in [0, 1]
    #[serde(default)]
    confidence: Option<f32>,
}

impl HttpDetector {
    /// Create a new detector client from configuration
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            min_confidence: config.min_confidence,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/detect", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageDetector for HttpDetector {
    async fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let mut request = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&DetectRequest { text });

        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Detector API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            }
            .into());
        }

        let detected = response
            .json::<DetectResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(confidence) = detected.confidence {
            if confidence < self.min_confidence {
                return Err(DetectionError::LowConfidence {
                    confidence,
                    minimum: self.min_confidence,
                });
            }
        }

        let code = language_utils::normalize_to_part1(&detected.language)
            .map_err(|_| DetectionError::Unsupported(detected.language.clone()))?;

        debug!("Detected language: {}", code);
        Ok(code)
    }
}

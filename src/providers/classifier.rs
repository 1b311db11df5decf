use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::ClassifierConfig;
use crate::errors::{ClassificationError, ProviderError};
use crate::providers::{LabelScore, ZeroShotClassifier};

/// HTTP client for a zero-shot classification service
///
/// Speaks the Hugging Face inference contract for zero-shot pipelines:
/// `POST {endpoint}/models/{model}` with `{"inputs", "parameters":
/// {"candidate_labels", "multi_label"}}`, returning parallel `labels` and
/// `scores` arrays ranked descending by score.
#[derive(Debug)]
pub struct HttpClassifier {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication (optional)
    api_key: String,
    /// Service endpoint URL
    endpoint: String,
    /// Model identifier
    model: String,
}

/// Classification request body
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    /// The text to classify
    inputs: &'a str,
    /// Zero-shot parameters
    parameters: ClassifyParameters<'a>,
}

/// Zero-shot classification parameters
#[derive(Debug, Serialize)]
struct ClassifyParameters<'a> {
    /// Candidate labels to score the text against
    candidate_labels: &'a [String],
    /// Score each label independently rather than as a softmax
    multi_label: bool,
}

/// Classification response body
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    /// Labels ranked descending by score
    labels: Vec<String>,
    /// Scores aligned with `labels`
    scores: Vec<f32>,
}

impl HttpClassifier {
    /// Create a new classifier client from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ZeroShotClassifier for HttpClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassificationError> {
        let mut request = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&ClassifyRequest {
                inputs: text,
                parameters: ClassifyParameters {
                    candidate_labels: labels,
                    multi_label: true,
                },
            });

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
            error!("Classifier API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            }
            .into());
        }

        let classified = response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if classified.labels.len() != classified.scores.len() {
            return Err(ClassificationError::LabelScoreMismatch {
                labels: classified.labels.len(),
                scores: classified.scores.len(),
            });
        }

        debug!(
            "Classifier scored {} labels for a {}-char text",
            classified.labels.len(),
            text.len()
        );

        Ok(classified
            .labels
            .into_iter()
            .zip(classified.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect())
    }
}

/*!
 * Collaborator adapters for the external services the pipeline consumes.
 *
 * This module defines the traits the pipeline is written against and the
 * HTTP client implementations for each collaborator:
 * - `detector`: language-detection service client
 * - `translator`: translation service client
 * - `classifier`: zero-shot classification service client
 * - `mock`: in-memory collaborators for testing
 */

use async_trait::async_trait;
use futures::future::join_all;
use log::warn;
use std::fmt::Debug;

use crate::errors::{ClassificationError, DetectionError, TranslationError};

/// A single (label, score) pair from the classifier.
///
/// Scores are independent per label and need not sum to 1; the classifier
/// ranks multi-label, not mutually-exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// Candidate label
    pub label: String,
    /// Confidence score in [0, 1]
    pub score: f32,
}

/// Language detection collaborator
#[async_trait]
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of a text, returning a lowercase ISO 639-1 code
    async fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Translation collaborator
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a text between two ISO 639-1 language codes
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;

    /// Translate a batch of texts, falling back to the original text for
    /// any item whose translation fails.
    ///
    /// Items are translated concurrently and re-joined in input order.
    /// Implementations backed by a collaborator with native batch support
    /// may override this with a single round trip.
    async fn translate_lenient(
        &self,
        texts: Vec<String>,
        source: &str,
        target: &str,
    ) -> Vec<String> {
        let futures = texts.iter().map(|text| self.translate(text, source, target));
        let results = join_all(futures).await;

        results
            .into_iter()
            .zip(texts)
            .map(|(result, original)| match result {
                Ok(translated) => translated,
                Err(e) => {
                    warn!("Lenient translation fell back to source text: {}", e);
                    original
                }
            })
            .collect()
    }
}

/// Zero-shot classification collaborator
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync + Debug {
    /// Score a text against a set of candidate labels.
    ///
    /// Returns one score per input label, ranked descending by score.
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassificationError>;
}

pub mod classifier;
pub mod detector;
pub mod mock;
pub mod translator;

// Re-export client types
pub use classifier::HttpClassifier;
pub use detector::HttpDetector;
pub use translator::HttpTranslator;

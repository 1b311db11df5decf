/*!
 * The request pipeline: the end-to-end transformation from a raw complaint
 * message to a response payload.
 *
 * Stages, in order: noise filter, language detection, conditional
 * Hindi-to-English translation, zero-shot classification against the
 * taxonomy, score-threshold filtering, per-label record fan-out, and
 * conditional re-translation of the resolved records back to Hindi.
 *
 * Failure semantics are deliberately asymmetric: detection and
 * classification failures degrade to `NoMatch`, while a failure of the
 * mandatory input translation propagates — classification cannot proceed
 * on untranslated Hindi text against an English-only taxonomy.
 */

use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::database::{CategoryRecord, CategoryRepository};
use crate::errors::PipelineError;
use crate::language_utils::{self, ENGLISH, HINDI};
use crate::providers::{LanguageDetector, Translator, ZeroShotClassifier};
use crate::taxonomy::Taxonomy;

/// Minimum number of whitespace-separated tokens a message must have
const MIN_MESSAGE_TOKENS: usize = 2;

/// An inbound classification request
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    /// Free-text complaint message
    pub message: String,
}

/// The payload returned for a matched request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsePayload {
    /// Detected language of the original message
    pub original_language: String,
    /// Labels that passed the score threshold, in classifier rank order
    pub matched_categories: Vec<String>,
    /// Resolved section records, translated if the input was Hindi
    pub sections: Vec<CategoryRecord>,
}

/// Outcome of a pipeline run.
///
/// `NoMatch` covers every short-circuit: noise input, detection failure,
/// classification failure, and an empty post-threshold label set. The
/// caller cannot distinguish these; the internal reason is logged.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The message matched at least one category
    Matched(ResponsePayload),
    /// The pipeline short-circuited with no result
    NoMatch,
}

impl PipelineOutcome {
    /// Whether this outcome carries a payload
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Orchestrates the collaborators for one request at a time.
///
/// Holds no mutable state; collaborator handles and the taxonomy are fixed
/// at construction and shared read-only across in-flight requests.
pub struct RequestPipeline {
    /// Language detection collaborator
    detector: Arc<dyn LanguageDetector>,
    /// Translation collaborator
    translator: Arc<dyn Translator>,
    /// Zero-shot classification collaborator
    classifier: Arc<dyn ZeroShotClassifier>,
    /// Section store
    repository: CategoryRepository,
    /// Fixed candidate label set
    taxonomy: Taxonomy,
    /// Acceptance threshold for classifier scores (inclusive)
    score_threshold: f32,
}

impl RequestPipeline {
    /// Create a new pipeline over the given collaborators
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        classifier: Arc<dyn ZeroShotClassifier>,
        repository: CategoryRepository,
        taxonomy: Taxonomy,
        score_threshold: f32,
    ) -> Self {
        Self {
            detector,
            translator,
            classifier,
            repository,
            taxonomy,
            score_threshold,
        }
    }

    /// Process one complaint message end to end.
    ///
    /// Every external call is attempted at most once; there are no retries.
    pub async fn process(&self, message: &str) -> Result<PipelineOutcome, PipelineError> {
        // Noise filter: single-word or blank input is not worth a
        // detection or classification round trip
        let message = message.trim();
        if message.split_whitespace().count() < MIN_MESSAGE_TOKENS {
            debug!("Short-circuit: message has fewer than {} tokens", MIN_MESSAGE_TOKENS);
            return Ok(PipelineOutcome::NoMatch);
        }

        // Detection failure degrades to no result, it is not an error
        let language = match self.detector.detect(message).await {
            Ok(language) => language,
            Err(e) => {
                warn!("Short-circuit: language detection failed: {}", e);
                return Ok(PipelineOutcome::NoMatch);
            }
        };

        let hindi_input = language_utils::is_hindi(&language);
        debug!(
            "Detected language {:?} ({})",
            language,
            language_utils::get_language_name(&language)
                .unwrap_or_else(|_| "unknown".to_string())
        );

        // Mandatory input translation; failure here propagates
        let classification_text = if hindi_input {
            self.translator.translate(message, HINDI, ENGLISH).await?
        } else {
            message.to_string()
        };

        // Classification failure degrades to no result
        let scored = match self
            .classifier
            .classify(&classification_text, self.taxonomy.labels())
            .await
        {
            Ok(scored) => scored,
            Err(e) => {
                warn!("Short-circuit: classification failed: {}", e);
                return Ok(PipelineOutcome::NoMatch);
            }
        };

        // Threshold filter, inclusive boundary; classifier rank order kept
        let matched_categories: Vec<String> = scored
            .into_iter()
            .filter(|ls| ls.score >= self.score_threshold)
            .map(|ls| ls.label)
            .collect();

        if matched_categories.is_empty() {
            debug!("Short-circuit: no label scored at or above {}", self.score_threshold);
            return Ok(PipelineOutcome::NoMatch);
        }

        // Fan-out with per-label isolation, no deduplication
        let sections = self.repository.resolve(&matched_categories).await;

        let sections = if hindi_input {
            self.translate_records(sections).await
        } else {
            sections
        };

        info!(
            "Matched {} categor(ies), {} section(s), language {:?}",
            matched_categories.len(),
            sections.len(),
            language
        );

        Ok(PipelineOutcome::Matched(ResponsePayload {
            original_language: language,
            matched_categories,
            sections,
        }))
    }

    /// Translate every record's text fields back to Hindi.
    ///
    /// Per-field best effort: a failed field stays English while its
    /// siblings are translated. Records are translated concurrently and
    /// re-joined in input order.
    async fn translate_records(&self, records: Vec<CategoryRecord>) -> Vec<CategoryRecord> {
        let translations = records.iter().map(|record| {
            let fields: Vec<String> = record
                .text_fields()
                .iter()
                .map(|f| f.to_string())
                .collect();
            self.translator.translate_lenient(fields, ENGLISH, HINDI)
        });

        join_all(translations)
            .await
            .into_iter()
            .zip(&records)
            .map(|(translated, record)| {
                let fields: [String; 5] = translated
                    .try_into()
                    .unwrap_or_else(|_| record.text_fields().map(String::from));
                record.with_text_fields(fields)
            })
            .collect()
    }
}

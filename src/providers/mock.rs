/*!
 * Mock collaborator implementations for testing.
 *
 * This module provides mock collaborators that simulate different behaviors:
 * - `MockDetector::returning("hi")` - always detects the given language
 * - `MockDetector::failing()` - always fails detection
 * - `MockDetector::slow(...)` - answers after a delay (for deadline testing)
 * - `MockTranslator::working()` - echoes text with a translation marker
 * - `MockClassifier::with_scores(...)` - returns a fixed ranking
 *
 * Call counts and recorded calls let tests assert which pipeline stages ran.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{ClassificationError, DetectionError, ProviderError, TranslationError};
use crate::providers::{LabelScore, LanguageDetector, Translator, ZeroShotClassifier};

/// A recorded translation call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCall {
    /// Text that was passed in
    pub text: String,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

/// Mock language detector
#[derive(Debug)]
pub struct MockDetector {
    /// Language to report, or None to fail every call
    language: Option<String>,
    /// Delay before answering, if any
    delay: Option<Duration>,
    /// Number of detect calls made
    call_count: Arc<AtomicUsize>,
}

impl MockDetector {
    /// Create a detector that always reports the given language
    pub fn returning(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a detector that always fails
    pub fn failing() -> Self {
        Self {
            language: None,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a detector that answers after a delay (for deadline testing)
    pub fn slow(language: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            language: Some(language.into()),
            delay: Some(Duration::from_millis(delay_ms)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of detect calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the call counter, for asserting after a move into the pipeline
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.call_count.clone()
    }
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.language {
            Some(language) => Ok(language.clone()),
            None => Err(DetectionError::Unsupported("mock failure".to_string())),
        }
    }
}

/// Mock translator
///
/// `working()` produces `"{text} [{source}->{target}]"` so tests can see
/// both that a translation happened and with which language pair.
#[derive(Debug)]
pub struct MockTranslator {
    /// Whether calls succeed
    working: bool,
    /// Texts for which translation fails even in working mode
    fail_on: Vec<String>,
    /// Every call made, in order
    calls: Arc<Mutex<Vec<TranslationCall>>>,
}

impl MockTranslator {
    /// Create a translator that always succeeds
    pub fn working() -> Self {
        Self {
            working: true,
            fail_on: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a translator that always fails
    pub fn failing() -> Self {
        Self {
            working: false,
            fail_on: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working translator that fails for specific input texts
    pub fn failing_on(texts: Vec<String>) -> Self {
        Self {
            working: true,
            fail_on: texts,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Recorded calls, in order
    pub fn calls(&self) -> Vec<TranslationCall> {
        self.calls.lock().expect("mock translator lock poisoned").clone()
    }

    /// Handle to the call log, for asserting after a move into the pipeline
    pub fn call_log(&self) -> Arc<Mutex<Vec<TranslationCall>>> {
        self.calls.clone()
    }

    /// The marker a working mock appends to translated text
    pub fn marker(source: &str, target: &str) -> String {
        format!(" [{}->{}]", source, target)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .expect("mock translator lock poisoned")
            .push(TranslationCall {
                text: text.to_string(),
                source: source.to_string(),
                target: target.to_string(),
            });

        if !self.working {
            return Err(ProviderError::RequestFailed("mock failure".to_string()).into());
        }

        if self.fail_on.iter().any(|t| t == text) {
            return Err(ProviderError::RequestFailed(format!("mock failure for {:?}", text)).into());
        }

        Ok(format!("{}{}", text, Self::marker(source, target)))
    }
}

/// Mock zero-shot classifier
#[derive(Debug)]
pub struct MockClassifier {
    /// Fixed ranking to return, or None to fail every call
    scores: Option<Vec<LabelScore>>,
    /// Last text passed to classify
    last_input: Arc<Mutex<Option<String>>>,
    /// Number of classify calls made
    call_count: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Create a classifier that returns a fixed (label, score) ranking
    pub fn with_scores(scores: Vec<(&str, f32)>) -> Self {
        Self {
            scores: Some(
                scores
                    .into_iter()
                    .map(|(label, score)| LabelScore {
                        label: label.to_string(),
                        score,
                    })
                    .collect(),
            ),
            last_input: Arc::new(Mutex::new(None)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a classifier that always fails
    pub fn failing() -> Self {
        Self {
            scores: None,
            last_input: Arc::new(Mutex::new(None)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The text passed to the most recent classify call
    pub fn last_input(&self) -> Option<String> {
        self.last_input
            .lock()
            .expect("mock classifier lock poisoned")
            .clone()
    }

    /// Handle to the last-input cell, for asserting after a move into the pipeline
    pub fn input_cell(&self) -> Arc<Mutex<Option<String>>> {
        self.last_input.clone()
    }

    /// Number of classify calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZeroShotClassifier for MockClassifier {
    async fn classify(
        &self,
        text: &str,
        _labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassificationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_input
            .lock()
            .expect("mock classifier lock poisoned") = Some(text.to_string());

        match &self.scores {
            Some(scores) => Ok(scores.clone()),
            None => Err(ProviderError::RequestFailed("mock failure".to_string()).into()),
        }
    }
}

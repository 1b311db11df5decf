/*!
 * Error types for the nyayasetu service.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to an external collaborator API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during language detection
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Error from the detection service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The detector could not determine the language with enough confidence
    #[error("Detection confidence {confidence} below minimum {minimum}")]
    LowConfidence {
        /// Confidence reported by the detector
        confidence: f32,
        /// Configured minimum confidence
        minimum: f32,
    },

    /// The detector does not support the given text
    #[error("Unsupported text: {0}")]
    Unsupported(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the translation service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The requested language pair is not supported
    #[error("Unsupported language pair: {source_lang} -> {target}")]
    UnsupportedPair {
        /// Source language code
        source_lang: String,
        /// Target language code
        target: String,
    },
}

/// Errors that can occur during zero-shot classification
#[derive(Error, Debug)]
pub enum ClassificationError {
    /// Error from the classification service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The classifier returned a score list that does not line up with the labels
    #[error("Classifier returned {scores} scores for {labels} labels")]
    LabelScoreMismatch {
        /// Number of labels sent
        labels: usize,
        /// Number of scores received
        scores: usize,
    },
}

/// Errors that can occur in the category store
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Error from the underlying database
    #[error("Database error: {0}")]
    Database(String),

    /// Error reading or parsing a seed file
    #[error("Seed file error: {0}")]
    SeedFile(String),
}

/// Errors that can escape the request pipeline to the caller.
///
/// Detection and classification failures are swallowed inside the pipeline
/// and degrade to an empty result; only the mandatory input translation
/// (and the request deadline) surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The mandatory Hindi-to-English input translation failed
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// The per-request deadline expired
    #[error("Request deadline of {0}s expired")]
    DeadlineExpired(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a collaborator API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the category store
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Error from the request pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

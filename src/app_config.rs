use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Language detection service settings
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Translation service settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Zero-shot classification service settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Category store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Pipeline behavior settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    // @field: Bind host
    #[serde(default = "default_host")]
    pub host: String,

    // @field: Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    // @field: Per-request deadline in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Language detection service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectorConfig {
    // @field: Service URL
    #[serde(default = "default_detector_endpoint")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Minimum detection confidence
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslatorConfig {
    // @field: Service URL
    #[serde(default = "default_translator_endpoint")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Zero-shot classification service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifierConfig {
    // @field: Service URL
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Model name
    #[serde(default = "default_classifier_model")]
    pub model: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Category store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    // @field: Path to the sqlite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

/// Pipeline behavior configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    // @field: Minimum classifier score for a label to match
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,

    // @field: Path to the taxonomy JSON file
    #[serde(default = "default_taxonomy_path")]
    pub taxonomy_path: String,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Corresponding log crate level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_detector_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_translator_endpoint() -> String {
    "http://localhost:5001".to_string()
}

fn default_classifier_endpoint() -> String {
    "http://localhost:5002".to_string()
}

fn default_classifier_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_database_path() -> String {
    "nyayasetu.db".to_string()
}

fn default_score_threshold() -> f32 {
    0.1
}

fn default_taxonomy_path() -> String {
    "data/ipc_categories.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_detector_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translator_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_classifier_endpoint(),
            api_key: String::new(),
            model: default_classifier_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            taxonomy_path: default_taxonomy_path(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            detector: DetectorConfig::default(),
            translator: TranslatorConfig::default(),
            classifier: ClassifierConfig::default(),
            store: StoreConfig::default(),
            pipeline: PipelineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file if it exists, otherwise use defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate collaborator endpoints
        for (name, endpoint) in [
            ("detector", &self.detector.endpoint),
            ("translator", &self.translator.endpoint),
            ("classifier", &self.classifier.endpoint),
        ] {
            if endpoint.is_empty() {
                return Err(anyhow!("Endpoint for {} cannot be empty", name));
            }
            Url::parse(endpoint)
                .with_context(|| format!("Invalid {} endpoint: {}", name, endpoint))?;
        }

        if !(0.0..=1.0).contains(&self.pipeline.score_threshold) {
            return Err(anyhow!(
                "Score threshold must be in [0, 1], got {}",
                self.pipeline.score_threshold
            ));
        }

        if !(0.0..=1.0).contains(&self.detector.min_confidence) {
            return Err(anyhow!(
                "Detector min_confidence must be in [0, 1], got {}",
                self.detector.min_confidence
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least 1 second"));
        }

        Ok(())
    }
}

/*!
 * Taxonomy of penal-code category labels.
 *
 * The taxonomy is the fixed, ordered list of candidate labels handed to the
 * zero-shot classifier on every request. It is loaded once at startup and
 * never written again.
 */

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// The fixed candidate label set used for classification.
///
/// Cheap to clone; the label list is shared behind an Arc because every
/// in-flight request borrows it for the classifier call.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    labels: Arc<Vec<String>>,
}

impl Taxonomy {
    /// Build a taxonomy from an explicit label list
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(anyhow!("Taxonomy cannot be empty"));
        }
        Ok(Self {
            labels: Arc::new(labels),
        })
    }

    /// Load the taxonomy from a JSON file containing an array of strings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open taxonomy file: {}", path.display()))?;
        let labels: Vec<String> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse taxonomy file: {}", path.display()))?;
        Self::new(labels)
    }

    /// The ordered candidate labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels in the taxonomy
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the taxonomy has no labels (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/*!
 * Row types for the section store.
 */

use serde::{Deserialize, Serialize};

/// A penal-code section record.
///
/// `category` is the lookup key; the five remaining fields are the
/// translatable text surface returned to the caller. The stored record is
/// never mutated; bilingual responses carry a derived copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Category label the record is filed under
    pub category: String,
    /// Section title
    pub title: String,
    /// Description of the offence
    pub description: String,
    /// Punishment prescribed by the section
    pub punishment: String,
    /// Bailable / non-bailable classification
    pub bail_type: String,
    /// Time limit for bail, if any
    pub bail_time_limit: String,
}

impl CategoryRecord {
    /// The five translatable text fields, in canonical order
    pub fn text_fields(&self) -> [&str; 5] {
        [
            &self.title,
            &self.description,
            &self.punishment,
            &self.bail_type,
            &self.bail_time_limit,
        ]
    }

    /// Build a derived copy with the five text fields replaced.
    ///
    /// The lookup key is carried over untouched.
    pub fn with_text_fields(&self, fields: [String; 5]) -> Self {
        let [title, description, punishment, bail_type, bail_time_limit] = fields;
        Self {
            category: self.category.clone(),
            title,
            description,
            punishment,
            bail_type,
            bail_time_limit,
        }
    }
}

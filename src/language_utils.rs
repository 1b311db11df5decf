use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The pipeline routes on a single distinction: Hindi input gets translated
/// to English before classification and the response is translated back,
/// everything else is classified as-is. Detector output is normalized here
/// so the rest of the crate only ever sees lowercase ISO 639-1 codes.
/// ISO 639-1 code for Hindi
pub const HINDI: &str = "hi";

/// ISO 639-1 code for English
pub const ENGLISH: &str = "en";

/// Normalize a language code to lowercase ISO 639-1 (2-letter) format.
///
/// Accepts 2-letter ISO 639-1 and 3-letter ISO 639-3 codes; some detectors
/// report regional variants like `zh-cn`, which are truncated to their
/// primary subtag before validation.
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    // Strip a regional subtag if present (e.g. "zh-cn" -> "zh")
    let primary = normalized.split('-').next().unwrap_or(&normalized);

    if primary.len() == 2 {
        if let Some(lang) = Language::from_639_1(primary) {
            if let Some(part1) = lang.to_639_1() {
                return Ok(part1.to_string());
            }
        }
    } else if primary.len() == 3 {
        if let Some(lang) = Language::from_639_3(primary) {
            if let Some(part1) = lang.to_639_1() {
                return Ok(part1.to_string());
            }
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check whether a detected language code means Hindi.
///
/// Tolerant of un-normalized detector output; any code that does not
/// resolve to Hindi counts as non-Hindi for routing purposes.
pub fn is_hindi(code: &str) -> bool {
    matches!(normalize_to_part1(code).as_deref(), Ok(HINDI))
}

/// Get the English name of a language from its code, for logging
pub fn get_language_name(code: &str) -> Result<String> {
    let part1 = normalize_to_part1(code)?;
    let lang = Language::from_639_1(&part1)
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))?;
    Ok(lang.to_name().to_string())
}

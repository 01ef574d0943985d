//! Language codes as clients send them.
//!
//! Request bodies pass their `language` field through [`deserialize`], so
//! everything downstream can compare against plain lowercase codes.

use crate::cuisine::Language;
use serde::{Deserialize, Deserializer};

pub const DEFAULT_LANGUAGE: &str = "vi";

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Trim and lowercase a code. Blank means the default; unknown codes are
/// kept so that per-language tables simply have no entry for them.
pub fn normalize_code(raw: &str) -> String {
    let code = raw.trim().to_ascii_lowercase();
    match Language::from_code(&code) {
        Some(language) => language.code().to_string(),
        None if code.is_empty() => default_language(),
        None => code,
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_code(&raw))
}

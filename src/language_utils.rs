use isolang::Language;

use crate::errors::GlossaryError;

/// Language utilities for glossary language codes
///
/// Glossary languages follow the DeepL convention: an ISO 639-1 base code,
/// optionally followed by a region or script variant (`EN-GB`, `PT-BR`,
/// `ZH-HANS`). Codes are kept in upper case throughout the application.
/// Normalize a language code to its canonical form (trimmed, upper case)
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Split a code into its base language and optional variant
fn split_variant(code: &str) -> (&str, Option<&str>) {
    match code.split_once('-') {
        Some((base, variant)) => (base, Some(variant)),
        None => (code, None),
    }
}

/// Look up the ISO language for the base part of a code
fn base_language(code: &str) -> Option<Language> {
    let (base, _) = split_variant(code);
    let base = base.to_lowercase();

    match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
}

/// Validate a language code and return its normalized form
///
/// The base part must be a known ISO 639-1 or ISO 639-3 code, and a variant,
/// if present, must be a non-empty alphanumeric tag.
pub fn validate_language_code(code: &str) -> Result<String, GlossaryError> {
    let normalized = normalize_code(code);

    let (_, variant) = split_variant(&normalized);
    let variant_ok = variant.is_none_or(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric()));

    if base_language(&normalized).is_some() && variant_ok {
        Ok(normalized)
    } else {
        Err(GlossaryError::InvalidLanguageCode(code.to_string()))
    }
}

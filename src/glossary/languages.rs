use crate::providers::LanguagePair;

/// Derive the distinct glossary languages from language pairs
///
/// Every source language comes first (in first-seen order), followed by the
/// target languages not already listed. Empty codes are skipped.
pub fn extract_languages(pairs: &[LanguagePair]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();

    let sources = pairs.iter().map(|p| p.source.as_str());
    let targets = pairs.iter().map(|p| p.target.as_str());

    for language in sources.chain(targets) {
        if !language.is_empty() && !languages.iter().any(|l| l == language) {
            languages.push(language.to_string());
        }
    }

    languages
}

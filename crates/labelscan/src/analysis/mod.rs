mod normalizer;
mod report;
mod resolver;
mod score;

pub mod ocr;

pub use report::{
    AnalysisItem, AnalysisResult, AnalysisSummary, EnvironmentCounts, HealthCounts, LevelTally,
};
pub use resolver::DEFAULT_FUZZY_THRESHOLD;

use crate::lexicon::LexiconStore;
use std::collections::HashSet;

/// Request payload for one analysis, resolved up front into exactly two
/// shapes instead of sniffing keys on a loose map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// An already-separated ingredient list, e.g. from a structured form.
    IngredientList(Vec<String>),
    /// Label text with ingredients separated by commas, semicolons, or
    /// line breaks, e.g. straight out of OCR.
    FreeText(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no image or ingredients provided")]
    Missing,
    #[error("uploaded file is empty")]
    EmptyUpload,
}

/// Runs the full pipeline over one request: normalize and tokenize the
/// input, resolve each token against the lexicon, deduplicate by
/// canonical id, and derive the summary counts and scores.
pub fn analyze(store: &LexiconStore, input: &AnalysisInput) -> AnalysisResult {
    analyze_with_threshold(store, input, DEFAULT_FUZZY_THRESHOLD)
}

pub fn analyze_with_threshold(
    store: &LexiconStore,
    input: &AnalysisInput,
    threshold: f64,
) -> AnalysisResult {
    let tokens = normalizer::tokenize(input);
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut items: Vec<AnalysisItem> = Vec::new();

    for token in &tokens {
        let Some(matched) = resolver::resolve(store, token, threshold) else {
            // Unresolved tokens are dropped from the output; see the
            // contract note on AnalysisResult.
            continue;
        };
        if !seen_ids.insert(matched.record.id.clone()) {
            // First alias and confidence per canonical id win.
            continue;
        }
        items.push(AnalysisItem::from_match(token, matched));
    }

    let summary = report::summarize(&items);
    AnalysisResult {
        analysis: items,
        summary,
    }
}

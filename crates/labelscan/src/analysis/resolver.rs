use crate::lexicon::{HazardRecord, LexiconStore};
use std::collections::BTreeSet;

/// Minimum token-set similarity (as a 0-1 ratio) a fuzzy candidate must
/// reach to count as a match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.86;

pub(crate) const EXACT_MATCH_CONFIDENCE: f64 = 0.99;

/// A normalized token resolved to a canonical record.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedMatch<'a> {
    pub(crate) record: &'a HazardRecord,
    pub(crate) matched_alias: String,
    pub(crate) confidence: f64,
}

/// Exact alias hit first, fuzzy scan second. `None` means the token is
/// unresolved, which is a valid terminal outcome rather than an error.
pub(crate) fn resolve<'a>(
    store: &'a LexiconStore,
    token: &str,
    threshold: f64,
) -> Option<ResolvedMatch<'a>> {
    resolve_exact(store, token).or_else(|| resolve_fuzzy(store, token, threshold))
}

pub(crate) fn resolve_exact<'a>(
    store: &'a LexiconStore,
    token: &str,
) -> Option<ResolvedMatch<'a>> {
    let id = store.alias_target(token)?;
    let record = store.record(id)?;
    Some(ResolvedMatch {
        record,
        matched_alias: token.to_string(),
        confidence: EXACT_MATCH_CONFIDENCE,
    })
}

/// Scores every alias with the token-set ratio and takes the arg-max with
/// a pinned tie-break: the scan keeps the incumbent unless a candidate is
/// strictly better, so equal scores resolve to the first alias in the
/// store's stable sorted order.
pub(crate) fn resolve_fuzzy<'a>(
    store: &'a LexiconStore,
    token: &str,
    threshold: f64,
) -> Option<ResolvedMatch<'a>> {
    let mut best: Option<(&String, f64)> = None;
    for alias in store.aliases() {
        let score = token_set_ratio(token, alias);
        match best {
            Some((_, incumbent)) if score <= incumbent => {}
            _ => best = Some((alias, score)),
        }
    }

    let (alias, score) = best?;
    let confidence = score / 100.0;
    if confidence < threshold {
        return None;
    }

    let id = store.alias_target(alias)?;
    let record = store.record(id)?;
    Some(ResolvedMatch {
        record,
        matched_alias: alias.clone(),
        confidence,
    })
}

/// Order-independent token overlap ratio on a 0-100 scale.
///
/// Both strings are split into token sets, and the ratio is the best
/// normalized edit similarity among intersection vs intersection+diff on
/// either side and the two combined forms. A query whose tokens are a
/// subset of an alias therefore scores 100, as does a reordering of the
/// same tokens.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a
        .intersection(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_a = tokens_a
        .difference(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_b = tokens_b
        .difference(&tokens_a)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let combined_a = join_tokens(&intersection, &only_a);
    let combined_b = join_tokens(&intersection, &only_b);

    let ratio = strsim::normalized_levenshtein(&intersection, &combined_a)
        .max(strsim::normalized_levenshtein(&intersection, &combined_b))
        .max(strsim::normalized_levenshtein(&combined_a, &combined_b));
    ratio * 100.0
}

fn join_tokens(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

use super::AnalysisInput;

/// Canonicalizes a raw ingredient string for alias lookup: lowercase,
/// every maximal run of characters outside `[a-z0-9]` collapsed to a
/// single space, no leading or trailing space. Idempotent.
pub fn normalize(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(ch);
        } else {
            pending_space = true;
        }
    }
    normalized
}

/// Turns the request payload into normalized tokens, preserving order and
/// dropping entries that normalize to nothing. Free text splits on runs
/// of commas, semicolons, and line breaks before normalization.
pub fn tokenize(input: &AnalysisInput) -> Vec<String> {
    match input {
        AnalysisInput::IngredientList(entries) => entries
            .iter()
            .map(|entry| normalize(entry))
            .filter(|token| !token.is_empty())
            .collect(),
        AnalysisInput::FreeText(text) => text
            .split([',', ';', '\n', '\r'])
            .map(normalize)
            .filter(|token| !token.is_empty())
            .collect(),
    }
}

//! Batch input normalization.

use std::collections::HashSet;

/// Prefixes `https://` unless the entry already names an HTTP scheme.
pub fn normalize_url(entry: &str) -> String {
    if entry.starts_with("http://") || entry.starts_with("https://") {
        entry.to_string()
    } else {
        format!("https://{entry}")
    }
}

/// Splits raw batch text into the URLs to walk.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. They are trimmed, blank lines
/// dropped and duplicates removed while keeping first-seen order. Entries that
/// will not parse are kept: they come back as failed results rather than
/// disappearing from the batch.
pub fn normalize_batch(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(normalize_url)
        .collect()
}

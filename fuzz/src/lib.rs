use arbitrary::Arbitrary;
use mycroft_i18n_helpers::catalog::Entry;

/// Wrapper for generating arbitrary catalog entries with a reference.
#[derive(Arbitrary, Debug)]
pub struct FuzzEntry {
    pub id: String,
    pub translated: String,
    pub file: String,
    pub line_number: u8,
}

/// Generate random entries for fuzzing. Every entry references
/// `tags/v1/<file>:<line_number>`.
pub fn create_entries(entries: Vec<FuzzEntry>) -> Vec<Entry> {
    entries
        .into_iter()
        .map(|entry| Entry {
            id: entry.id,
            translated: entry.translated,
            reference_comment: format!("tags/v1/{}:{}", entry.file, entry.line_number),
        })
        .collect()
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use mycroft_i18n_helpers::projection::project;
use mycroft_i18n_helpers::references::parse;
use mycroft_i18n_helpers_fuzz::{create_entries, FuzzEntry};

fuzz_target!(|entries: Vec<FuzzEntry>| {
    let entries = create_entries(entries);
    // Err(_) happens for file names which are not valid references.
    if let Ok(projections) = project(&entries) {
        // Every reference adds exactly one line, nothing is overwritten.
        let references: usize = entries
            .iter()
            .map(|entry| parse(&entry.reference_comment).map_or(0, |refs| refs.len()))
            .sum();
        let lines: usize = projections.values().map(|p| p.lines().len()).sum();
        assert_eq!(lines, references);
    }
});

// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rebuild the content of resource files from catalog entries.

use std::collections::BTreeMap;

use log::debug;

use crate::catalog::Entry;
use crate::error::Result;
use crate::references;

/// The reconstructed lines of one resource file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    lines: Vec<String>,
    // The line number each entry of `lines` was inserted with.
    positions: Vec<usize>,
}

impl Projection {
    /// Insert `text` at line `line_number` (1-based).
    ///
    /// Lines at or after that position move down by one, nothing is
    /// overwritten. A position past the end appends. Lines inserted
    /// earlier with the same line number stay in front of `text`.
    pub fn insert(&mut self, line_number: usize, text: &str) {
        let mut idx = line_number.saturating_sub(1).min(self.lines.len());
        while self.positions.get(idx) == Some(&line_number) {
            idx += 1;
        }
        self.lines.insert(idx, String::from(text));
        self.positions.insert(idx, line_number);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether writing this projection would produce any text.
    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|line| !line.is_empty())
    }
}

/// Build the projection of every file referenced by `entries`.
///
/// Entries are applied in order. An entry with an undecodable
/// reference fails the whole catalog.
pub fn project(entries: &[Entry]) -> Result<BTreeMap<String, Projection>> {
    let mut projections = BTreeMap::<String, Projection>::new();
    for entry in entries {
        let text = entry.emitted_text();
        for reference in references::parse(&entry.reference_comment)? {
            debug!(
                "{}:{} <- {:?}",
                reference.target_file, reference.line_number, text
            );
            projections
                .entry(reference.target_file)
                .or_default()
                .insert(reference.line_number, text);
        }
    }
    Ok(projections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn entry(reference_comment: &str, id: &str, translated: &str) -> Entry {
        Entry {
            id: String::from(id),
            translated: String::from(translated),
            reference_comment: String::from(reference_comment),
        }
    }

    fn lines_of<'a>(projections: &'a BTreeMap<String, Projection>, file: &str) -> Vec<&'a str> {
        projections[file].lines().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_project_positions() {
        let projections = project(&[
            entry("vocab/a.voc:1", "one", "u"),
            entry("vocab/a.voc:2", "two", "dos"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["u", "dos"]);
    }

    #[test]
    fn test_project_out_of_order_positions() {
        let projections = project(&[
            entry("vocab/a.voc:2", "two", "dos"),
            entry("vocab/a.voc:1", "one", "u"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["u", "dos"]);
    }

    #[test]
    fn test_project_collision_keeps_both() {
        let projections = project(&[
            entry("vocab/a.voc:1", "x", "X"),
            entry("vocab/a.voc:1", "y", "Y"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["X", "Y"]);
    }

    #[test]
    fn test_project_collision_after_gap_keeps_catalog_order() {
        let projections = project(&[
            entry("vocab/a.voc:3", "x", "X"),
            entry("vocab/a.voc:3", "y", "Y"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["X", "Y"]);
    }

    #[test]
    fn test_project_repeated_position_keeps_catalog_order() {
        let projections = project(&[
            entry("vocab/a.voc:1", "one", "u"),
            entry("vocab/a.voc:2", "three", "tres"),
            entry("vocab/a.voc:2", "more three", "més tres"),
            entry("vocab/a.voc:2", "two", "dos"),
        ])
        .unwrap();
        assert_eq!(
            lines_of(&projections, "a.voc"),
            vec!["u", "tres", "més tres", "dos"]
        );
    }

    #[test]
    fn test_project_insert_shifts_later_lines() {
        let projections = project(&[
            entry("vocab/a.voc:1", "one", "u"),
            entry("vocab/a.voc:3", "three", "tres"),
            entry("vocab/a.voc:2", "two", "dos"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["u", "dos", "tres"]);
    }

    #[test]
    fn test_project_gap_appends() {
        let projections = project(&[
            entry("vocab/a.voc:5", "five", "cinc"),
            entry("vocab/a.voc:9", "nine", "nou"),
        ])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["cinc", "nou"]);
    }

    #[test]
    fn test_project_fallback_for_all_references() {
        let projections = project(&[entry(
            "tags/v1/a.voc:1\ntags/v1/b.dialog:1",
            "Hello",
            "",
        )])
        .unwrap();
        assert_eq!(lines_of(&projections, "a.voc"), vec!["Hello"]);
        assert_eq!(lines_of(&projections, "b.dialog"), vec!["Hello"]);
    }

    #[test]
    fn test_project_entry_without_references() {
        let projections = project(&[entry("", "orphan", "orfe")]).unwrap();
        assert!(projections.is_empty());
    }

    #[test]
    fn test_project_malformed_reference() {
        assert!(matches!(
            project(&[entry("vocab/a.voc:first", "x", "X")]),
            Err(Error::MalformedReference { .. })
        ));
    }

    #[test]
    fn test_has_content() {
        let mut projection = Projection::default();
        assert!(!projection.has_content());
        projection.insert(1, "");
        assert!(!projection.has_content());
        projection.insert(2, "text");
        assert!(projection.has_content());
    }
}

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

//! Translation catalogs and the index of exported PO files.

use std::collections::BTreeSet;
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use polib::catalog::Catalog;
use polib::message::MessageView;
use polib::po_file;
use regex::Regex;

use crate::error::{Error, Result};

/// One message of a catalog, reduced to what the projection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The source text (`msgid`).
    pub id: String,
    /// The translated text (`msgstr`), possibly empty.
    pub translated: String,
    /// The raw reference block.
    pub reference_comment: String,
}

impl Entry {
    /// The text to emit for this entry: the translation, or the
    /// source text if the entry is untranslated.
    pub fn emitted_text(&self) -> &str {
        if self.translated.is_empty() {
            &self.id
        } else {
            &self.translated
        }
    }

    fn from_message(message: &dyn MessageView) -> Self {
        let translated = if message.is_plural() {
            String::new()
        } else {
            String::from(message.msgstr().unwrap_or_default())
        };
        // Only the `#:` lines hold references. Extracted `#.` comments
        // are notes for translators.
        Entry {
            id: String::from(message.msgid()),
            translated,
            reference_comment: String::from(message.source()),
        }
    }
}

/// Convert a parsed catalog into entries, in catalog order.
///
/// The header message (empty `msgid`) is not part of the result.
pub fn entries(catalog: &Catalog) -> Vec<Entry> {
    catalog
        .messages()
        .filter(|message| !message.msgid().is_empty())
        .map(|message| Entry::from_message(message))
        .collect()
}

/// Header fields which `polib` requires to be present.
const REQUIRED_HEADER_FIELDS: &[&str] = &[
    "Project-Id-Version",
    "POT-Creation-Date",
    "PO-Revision-Date",
    "Language-Team",
    "Language",
    "MIME-Version",
    "Content-Type",
    "Content-Transfer-Encoding",
    "Plural-Forms",
];

/// Find the required fields missing from the header of a PO file.
///
/// Files which do not start with a header are left for the parser to
/// reject.
fn missing_header_fields(content: &str) -> Vec<&'static str> {
    let header = content
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty() || line.starts_with('#'))
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>();
    if header.first() != Some(&"msgid \"\"") {
        return Vec::new();
    }
    let keys = header[1..]
        .iter()
        .map(|line| line.trim_start_matches("msgstr").trim_start().trim_start_matches('"'))
        .filter_map(|line| line.split_once(':').map(|(key, _)| key))
        .collect::<Vec<_>>();
    REQUIRED_HEADER_FIELDS
        .iter()
        .copied()
        .filter(|field| !keys.contains(field))
        .collect()
}

/// Parse the PO file at `path` into entries.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    let catalog_error = |message: String| Error::Catalog {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|err| catalog_error(err.to_string()))?;
    let missing = missing_header_fields(&content);
    if !missing.is_empty() {
        return Err(catalog_error(format!(
            "missing header fields: {}",
            missing.join(", ")
        )));
    }
    // `polib` panics on some malformed headers instead of failing.
    let catalog = panic::catch_unwind(|| po_file::parse(path))
        .map_err(|_| catalog_error(String::from("malformed catalog header")))?
        .map_err(|err| catalog_error(err.to_string()))?;
    Ok(entries(&catalog))
}

/// The set of PO files available for this run.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    files: BTreeSet<PathBuf>,
}

impl CatalogIndex {
    /// Index all `.po` files directly inside `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut files = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(|err| Error::io(dir, err))? {
            let path = entry.map_err(|err| Error::io(dir, err))?.path();
            if path.is_file() && path.extension() == Some("po".as_ref()) {
                files.insert(path);
            }
        }
        Ok(CatalogIndex { files })
    }

    pub fn from_paths<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        CatalogIndex {
            files: paths.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find the catalog of the skill in directory `skill_name`.
    ///
    /// The export names the catalog of `mycroft-foo.mycroftai` as
    /// `skill-foo-<language>.po` and the catalog of `foo.mycroftai`
    /// as `foo-<language>.po`. Skills with other names have no
    /// catalog.
    pub fn lookup(&self, skill_name: &str, language: &str) -> Option<&Path> {
        let file_name = catalog_file_name(skill_name, language)?;
        self.files
            .iter()
            .find(|path| path.file_name() == Some(file_name.as_ref()))
            .map(PathBuf::as_path)
    }
}

fn catalog_file_name(skill_name: &str, language: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(?<official>mycroft-)?(?<name>.*)\.mycroftai$").expect("well-formed regex")
    });

    let captures = re.captures(skill_name)?;
    let name = &captures["name"];
    if captures.name("official").is_some() {
        Some(format!("skill-{name}-{language}.po"))
    } else {
        Some(format!("{name}-{language}.po"))
    }
}

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

//! Decide where a reconstructed resource file is written.
//!
//! Skills come in two layouts. Newer skills keep every resource in
//! `locale/<locale>/`. Older skills split them by category into
//! `dialog/<locale>/`, `vocab/<locale>/` and `regex/<locale>/`, and
//! the file extension selects the category.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory holding all resources of a skill in the locale layout.
pub const LOCALE_DIR: &str = "locale";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<skill>/locale/<locale>/<file>`
    Locale,
    /// `<skill>/<category>/<locale>/<file>`
    Flat,
}

impl Layout {
    /// Detect the layout of the skill in `skill_dir`.
    pub fn detect(skill_dir: &Path) -> Self {
        if skill_dir.join(LOCALE_DIR).is_dir() {
            Layout::Locale
        } else {
            Layout::Flat
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Layout::Locale => write!(f, "locale"),
            Layout::Flat => write!(f, "flat"),
        }
    }
}

/// A resource category of the flat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Dialog,
    Vocab,
    Regex,
}

impl Category {
    /// All categories, in the order they are processed.
    pub const ALL: [Category; 3] = [Category::Dialog, Category::Vocab, Category::Regex];

    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Dialog => "dialog",
            Category::Vocab => "vocab",
            Category::Regex => "regex",
        }
    }

    /// Extensions of the files kept in this category.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Category::Dialog => &["dialog", "value", "template", "list"],
            Category::Vocab => &["vocab", "voc", "intent", "entity"],
            Category::Regex => &["regex", "rx"],
        }
    }

    pub fn accepts(self, file_name: &str) -> bool {
        let extension = file_name.rsplit('.').next().unwrap_or(file_name);
        self.extensions().contains(&extension)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameKind {
    /// Replace a file name equal to `from`.
    Exact,
    /// Replace the suffix `from` of a file name.
    Suffix,
}

/// A legacy file name exception for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenameRule {
    /// Directory name of the skill.
    pub skill: String,
    /// Restrict the rule to one layout. Applies to both if unset.
    #[serde(default)]
    pub layout: Option<Layout>,
    pub kind: RenameKind,
    pub from: String,
    pub to: String,
}

impl RenameRule {
    fn applies_to(&self, skill: &str, layout: Layout) -> bool {
        self.skill == skill && self.layout.map_or(true, |l| l == layout)
    }

    fn apply(&self, file_name: &str) -> Option<String> {
        match self.kind {
            RenameKind::Exact => (file_name == self.from).then(|| self.to.clone()),
            RenameKind::Suffix => file_name
                .strip_suffix(self.from.as_str())
                .map(|stem| format!("{stem}{}", self.to)),
        }
    }
}

/// The rename exceptions needed by the official skills.
pub fn default_renames() -> Vec<RenameRule> {
    vec![
        RenameRule {
            skill: String::from("mycroft-stop.mycroftai"),
            layout: Some(Layout::Locale),
            kind: RenameKind::Exact,
            from: String::from("StopKeyword.voc"),
            to: String::from("Stop.voc"),
        },
        RenameRule {
            skill: String::from("mycroft-mark-1-demo.mycroftai"),
            layout: None,
            kind: RenameKind::Suffix,
            from: String::from("Keyword.voc"),
            to: String::from(".intent"),
        },
    ]
}

/// Where one resource file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// The category directory, `None` in the locale layout.
    pub category: Option<Category>,
    pub file_name: String,
}

impl Destination {
    pub fn path(&self, skill_dir: &Path, locale: &str) -> PathBuf {
        locale_dir(skill_dir, self.category, locale).join(&self.file_name)
    }
}

/// The directory holding the `locale` resources of `category`.
pub fn locale_dir(skill_dir: &Path, category: Option<Category>, locale: &str) -> PathBuf {
    match category {
        Some(category) => skill_dir.join(category.dir_name()).join(locale),
        None => skill_dir.join(LOCALE_DIR).join(locale),
    }
}

/// Routes the resource files of one skill.
#[derive(Debug, Clone)]
pub struct Router<'a> {
    layout: Layout,
    renames: Vec<&'a RenameRule>,
}

impl<'a> Router<'a> {
    pub fn new(skill: &'a str, layout: Layout, renames: &'a [RenameRule]) -> Self {
        let renames = renames
            .iter()
            .filter(|rule| rule.applies_to(skill, layout))
            .collect();
        Router { layout, renames }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn rename(&self, target_file: &str) -> String {
        self.renames
            .iter()
            .fold(String::from(target_file), |name, rule| {
                rule.apply(&name).unwrap_or(name)
            })
    }

    /// Compute every destination of `target_file`.
    ///
    /// In the flat layout a file goes to each category accepting its
    /// extension, which can be none at all.
    pub fn route(&self, target_file: &str) -> Vec<Destination> {
        let categories = match self.layout {
            Layout::Locale => vec![None],
            Layout::Flat => Category::ALL
                .into_iter()
                .filter(|category| category.accepts(target_file))
                .map(Some)
                .collect(),
        };
        categories
            .into_iter()
            .map(|category| Destination {
                category,
                file_name: self.rename(target_file),
            })
            .collect()
    }

    /// Like [`Router::route`], restricted to one category.
    pub fn route_to(&self, target_file: &str, category: Option<Category>) -> Option<Destination> {
        self.route(target_file)
            .into_iter()
            .find(|destination| destination.category == category)
    }
}

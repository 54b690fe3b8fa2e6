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

//! Settings for an update run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::routing::{default_renames, RenameRule};

/// Parameters of an update run.
///
/// They can be read from a TOML file.
///
/// ## Example
///
/// ```toml
/// skills-dir = "/opt/mycroft/skills"
/// po-dir = "export/ca/mycroft-skills"
/// locale = "ca-es"
/// catalog-language = "ca"
/// skip-skills = ["mycroft-broken.mycroftai"]
///
/// [[renames]]
/// skill = "mycroft-stop.mycroftai"
/// layout = "locale"
/// kind = "exact"
/// from = "StopKeyword.voc"
/// to = "Stop.voc"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory containing one directory per installed skill.
    #[serde(default = "default_skills_dir")]
    pub skills_dir: PathBuf,
    /// Directory containing the extracted PO files. Defaults to the
    /// location used by the export of `catalog_language`.
    #[serde(default)]
    pub po_dir: Option<PathBuf>,
    /// Locale code of the output directories, e.g. `ca-es`.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Language code used in the PO file names, e.g. `ca`.
    #[serde(default = "default_catalog_language")]
    pub catalog_language: String,
    /// Skills which are never updated.
    #[serde(default)]
    pub skip_skills: Vec<String>,
    /// File name exceptions. Replaces the built-in table when given.
    #[serde(default = "default_renames")]
    pub renames: Vec<RenameRule>,
}

fn default_skills_dir() -> PathBuf {
    PathBuf::from("/opt/mycroft/skills")
}

fn default_locale() -> String {
    String::from("ca-es")
}

fn default_catalog_language() -> String {
    String::from("ca")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            skills_dir: default_skills_dir(),
            po_dir: None,
            locale: default_locale(),
            catalog_language: default_catalog_language(),
            skip_skills: Vec::new(),
            renames: default_renames(),
        }
    }
}

impl Config {
    /// Read the configuration from the TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The directory to search for PO files.
    pub fn catalog_dir(&self) -> PathBuf {
        match &self.po_dir {
            Some(po_dir) => po_dir.clone(),
            None => {
                let language = &self.catalog_language;
                PathBuf::from(format!(
                    "tmp/{language}-mycroft-skills/{language}/mycroft-skills"
                ))
            }
        }
    }

    pub fn is_skipped(&self, skill: &str) -> bool {
        self.skip_skills.iter().any(|skipped| skipped == skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Layout, RenameKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_gives_defaults() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("config.toml");
        fs::write(&path, "")?;

        assert_eq!(Config::from_file(&path)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_read_config() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            skills-dir = "skills"
            po-dir = "po"
            locale = "es-es"
            catalog-language = "es"
            skip-skills = ["mycroft-broken.mycroftai"]

            [[renames]]
            skill = "mycroft-alarm.mycroftai"
            kind = "suffix"
            from = "Keyword.voc"
            to = ".intent"
            "#,
        )?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.skills_dir, PathBuf::from("skills"));
        assert_eq!(config.catalog_dir(), PathBuf::from("po"));
        assert_eq!(config.locale, "es-es");
        assert_eq!(config.catalog_language, "es");
        assert!(config.is_skipped("mycroft-broken.mycroftai"));
        assert!(!config.is_skipped("mycroft-alarm.mycroftai"));
        assert_eq!(
            config.renames,
            vec![RenameRule {
                skill: String::from("mycroft-alarm.mycroftai"),
                layout: None,
                kind: RenameKind::Suffix,
                from: String::from("Keyword.voc"),
                to: String::from(".intent"),
            }]
        );
        Ok(())
    }

    #[test]
    fn test_default_renames_include_stop_exception() {
        let config = Config::default();
        assert!(config.renames.iter().any(|rule| {
            rule.skill == "mycroft-stop.mycroftai"
                && rule.layout == Some(Layout::Locale)
                && rule.from == "StopKeyword.voc"
                && rule.to == "Stop.voc"
        }));
    }

    #[test]
    fn test_default_catalog_dir() {
        assert_eq!(
            Config::default().catalog_dir(),
            PathBuf::from("tmp/ca-mycroft-skills/ca/mycroft-skills")
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("config.toml");
        fs::write(&path, "skill-dir = \"typo\"\n")?;

        assert!(matches!(
            Config::from_file(&path),
            Err(Error::Config { .. })
        ));
        Ok(())
    }
}

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

//! Write translated PO files back into installed Mycroft skills.
//!
//! This program reads the PO files of an extracted translation
//! export, one per skill, and replaces the `<locale>` resources of
//! each installed skill with the translated text. Skills with a
//! `locale/` directory get `locale/<locale>/<file>`. The others get
//! `dialog/<locale>/`, `vocab/<locale>/` and `regex/<locale>/`,
//! depending on the file extension.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use mycroft_i18n_helpers::catalog::CatalogIndex;
use mycroft_i18n_helpers::config::Config;
use mycroft_i18n_helpers::update::update_all;

#[derive(Clone, Debug, Parser)]
#[command(about, version)]
struct Cli {
    /// TOML file with the run configuration.
    #[arg(short, long, value_name = "config.toml")]
    config: Option<PathBuf>,
    /// Directory containing the installed skills.
    #[arg(short, long)]
    skills_dir: Option<PathBuf>,
    /// Directory containing the extracted PO files.
    #[arg(short, long)]
    po_dir: Option<PathBuf>,
    /// Locale code of the written resources, e.g. `ca-es`.
    #[arg(short, long)]
    locale: Option<String>,
    /// Language code of the PO file names, e.g. `ca`.
    #[arg(long)]
    catalog_language: Option<String>,
    /// Skill to leave untouched. Can be repeated.
    #[arg(long = "skip", value_name = "SKILL")]
    skip_skills: Vec<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Could not read configuration {path:?}"))?,
            None => Config::default(),
        };
        if let Some(skills_dir) = self.skills_dir {
            config.skills_dir = skills_dir;
        }
        if self.po_dir.is_some() {
            config.po_dir = self.po_dir;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(catalog_language) = self.catalog_language {
            config.catalog_language = catalog_language;
        }
        config.skip_skills.extend(self.skip_skills);
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let config = Cli::parse().into_config()?;

    let catalog_dir = config.catalog_dir();
    let index = CatalogIndex::from_dir(&catalog_dir)
        .with_context(|| format!("Could not list PO files in {catalog_dir:?}"))?;
    info!(
        "Found {} PO files in {}",
        index.len(),
        catalog_dir.display()
    );

    let report = update_all(&config, &index)
        .with_context(|| format!("Could not list skills in {:?}", config.skills_dir))?;
    info!("{report}");
    if !report.is_success() {
        let skills = report
            .failed
            .iter()
            .map(|(skill, _)| skill.as_str())
            .collect::<Vec<_>>();
        bail!("Could not update {}", skills.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_defaults() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "mycroft-update-translations",
            "--skills-dir",
            "skills",
            "--locale",
            "es-es",
            "--catalog-language",
            "es",
            "--skip",
            "mycroft-broken.mycroftai",
        ])?;
        let config = cli.into_config()?;
        assert_eq!(config.skills_dir, PathBuf::from("skills"));
        assert_eq!(config.locale, "es-es");
        assert_eq!(
            config.catalog_dir(),
            PathBuf::from("tmp/es-mycroft-skills/es/mycroft-skills")
        );
        assert!(config.is_skipped("mycroft-broken.mycroftai"));
        Ok(())
    }

    #[test]
    fn test_flags_override_config_file() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("config.toml");
        std::fs::write(&path, "locale = \"es-es\"\npo-dir = \"from-file\"\n")?;

        let cli = Cli::try_parse_from([
            "mycroft-update-translations",
            "--config",
            path.to_str().unwrap(),
            "--po-dir",
            "from-flag",
        ])?;
        let config = cli.into_config()?;
        assert_eq!(config.locale, "es-es");
        assert_eq!(config.catalog_dir(), PathBuf::from("from-flag"));
        Ok(())
    }
}

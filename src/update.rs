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

//! Update the translations of installed skills.
//!
//! This file contains main logic used by the binary
//! `mycroft-update-translations`.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use log::{debug, error, info, warn};

use crate::catalog::{self, CatalogIndex};
use crate::config::Config;
use crate::error::Result;
use crate::projection::{project, Projection};
use crate::routing::{locale_dir, Category, Layout, Router};
use crate::skills::{list_skills, skill_name};
use crate::writer::{flush, remove_old_translations};

/// What an update wrote for one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillSummary {
    pub files_written: usize,
    pub lines_written: usize,
}

/// Replace the `locale` resources of a skill with `projections`.
///
/// The old output of every directory this layout writes to is
/// removed first, so files no longer in the catalog disappear. If
/// renames send two files to the same destination, the later file in
/// name order wins.
pub fn write_translations(
    skill_dir: &Path,
    router: &Router,
    projections: &BTreeMap<String, Projection>,
    locale: &str,
) -> Result<SkillSummary> {
    let categories = match router.layout() {
        Layout::Locale => vec![None],
        Layout::Flat => Category::ALL.into_iter().map(Some).collect(),
    };

    let mut summary = SkillSummary::default();
    for category in categories {
        remove_old_translations(&locale_dir(skill_dir, category, locale));
        let mut seen = HashSet::new();
        for (target_file, projection) in projections {
            let Some(destination) = router.route_to(target_file, category) else {
                continue;
            };
            let path = destination.path(skill_dir, locale);
            if !seen.insert(path.clone()) {
                warn!(
                    "{} is written by more than one file, keeping {target_file}",
                    path.display()
                );
            }
            if flush(&path, projection.lines())? {
                debug!("Wrote {}", path.display());
                summary.files_written += 1;
                summary.lines_written += projection.lines().len();
            }
        }
    }
    Ok(summary)
}

/// Update one skill from the catalog at `catalog_path`.
///
/// The catalog is fully projected before anything on disk is touched.
pub fn update_skill(
    skill_dir: &Path,
    skill: &str,
    catalog_path: &Path,
    config: &Config,
) -> Result<SkillSummary> {
    let layout = Layout::detect(skill_dir);
    info!("Skill {skill} uses the {layout} layout");

    let entries = catalog::load(catalog_path)?;
    let projections = project(&entries)?;
    debug!(
        "Projected {} entries into {} files",
        entries.len(),
        projections.len()
    );

    let router = Router::new(skill, layout, &config.renames);
    write_translations(skill_dir, &router, &projections, &config.locale)
}

/// The outcome of updating all skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub updated: Vec<(String, SkillSummary)>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let files: usize = self
            .updated
            .iter()
            .map(|(_, summary)| summary.files_written)
            .sum();
        write!(
            f,
            "{} skills updated ({files} files), {} skipped, {} failed",
            self.updated.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// Update every skill found in the configured skills directory.
///
/// A failing skill is recorded in the report and does not stop the
/// remaining skills.
pub fn update_all(config: &Config, index: &CatalogIndex) -> Result<RunReport> {
    let mut report = RunReport::default();
    for skill_dir in list_skills(&config.skills_dir)? {
        let Some(skill) = skill_name(&skill_dir) else {
            info!("Skipping {}: not a valid skill name", skill_dir.display());
            report.skipped.push(skill_dir.display().to_string());
            continue;
        };
        info!("Working on {skill}");

        if config.is_skipped(skill) {
            info!("Skipping {skill}: listed in skip-skills");
            report.skipped.push(String::from(skill));
            continue;
        }
        let Some(catalog_path) = index.lookup(skill, &config.catalog_language) else {
            info!("Skipping {skill}: no catalog");
            report.skipped.push(String::from(skill));
            continue;
        };

        match update_skill(&skill_dir, skill, catalog_path, config) {
            Ok(summary) => {
                info!(
                    "Wrote {} files ({} lines) for {skill}",
                    summary.files_written, summary.lines_written
                );
                report.updated.push((String::from(skill), summary));
            }
            Err(err) => {
                error!("Could not update {skill}: {err}");
                report.failed.push((String::from(skill), err.to_string()));
            }
        }
    }
    Ok(report)
}

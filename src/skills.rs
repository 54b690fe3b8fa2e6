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

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// List the skill directories directly inside `skills_dir`, sorted.
pub fn list_skills(skills_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut skills = Vec::new();
    for entry in fs::read_dir(skills_dir).map_err(|err| Error::io(skills_dir, err))? {
        let path = entry.map_err(|err| Error::io(skills_dir, err))?.path();
        if path.is_dir() {
            skills.push(path);
        }
    }
    skills.sort();
    Ok(skills)
}

/// The name identifying a skill: its directory name.
pub fn skill_name(skill_dir: &Path) -> Option<&str> {
    skill_dir.file_name()?.to_str()
}

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

//! Write reconstructed resource files to disk.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};

/// Recursively delete `dir`, the output of a previous run.
///
/// A missing directory is not an error. Other failures are logged and
/// otherwise ignored. Returns `true` if something was removed.
pub fn remove_old_translations(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    info!("Removing {}", dir.display());
    match fs::remove_dir_all(dir) {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not remove {}: {err}", dir.display());
            false
        }
    }
}

/// Write `lines` to `path`, one per line.
///
/// Nothing is written, and no directory is created, unless at least
/// one line is non-empty. An existing file is truncated. Returns
/// whether the file was written.
pub fn flush(path: &Path, lines: &[String]) -> Result<bool> {
    if lines.iter().all(String::is_empty) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
    }
    let mut content = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).map_err(|err| Error::io(path, err))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| String::from(*line)).collect()
    }

    #[test]
    fn test_flush_writes_one_line_each() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("vocab/ca-es/Stop.voc");

        assert!(flush(&path, &lines(&["atura", "para"]))?);
        assert_eq!(fs::read_to_string(&path)?, "atura\npara\n");
        Ok(())
    }

    #[test]
    fn test_flush_truncates_existing_file() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("Stop.voc");
        fs::write(&path, "one\ntwo\nthree\n")?;

        flush(&path, &lines(&["u"]))?;
        assert_eq!(fs::read_to_string(&path)?, "u\n");
        Ok(())
    }

    #[test]
    fn test_flush_skips_empty_content() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path().join("dialog/ca-es");

        assert!(!flush(&dir.join("empty.dialog"), &[])?);
        assert!(!flush(&dir.join("blank.dialog"), &lines(&["", ""]))?);
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn test_flush_keeps_blank_lines_between_text() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("a.dialog");

        flush(&path, &lines(&["", "text"]))?;
        assert_eq!(fs::read_to_string(&path)?, "\ntext\n");
        Ok(())
    }

    #[test]
    fn test_flush_reports_write_failure() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        // A file where a directory is needed.
        let blocker = tmp_dir.path().join("vocab");
        fs::write(&blocker, "")?;

        let result = flush(&blocker.join("ca-es/Stop.voc"), &lines(&["atura"]));
        assert!(matches!(result, Err(Error::Io { .. })));
        Ok(())
    }

    #[test]
    fn test_remove_old_translations() -> anyhow::Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path().join("locale/ca-es");
        fs::create_dir_all(dir.join("nested"))?;
        fs::write(dir.join("nested/old.voc"), "old\n")?;

        assert!(remove_old_translations(&dir));
        assert!(!dir.exists());
        assert!(tmp_dir.path().join("locale").exists());
        assert!(!remove_old_translations(&dir));
        Ok(())
    }
}

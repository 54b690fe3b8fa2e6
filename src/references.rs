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

//! Decode the reference block attached to a catalog message.
//!
//! The translation export attaches references such as
//!
//! ```text
//! #: tags/v20.2/Stop.voc:1
//! #: tags/v20.2/Stop.voc:3
//! ```
//!
//! to every message. Each reference names a resource file of the
//! skill and the 1-based line where the message belongs.

use crate::error::{Error, Result};

/// A pointer from a catalog message to a line in a resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target_file: String,
    pub line_number: usize,
}

/// What to do with a segment which starts with a known prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenAction {
    /// Drop the prefix and start a new logical line with the rest.
    StartLine,
}

/// Prefixes with a special meaning. Segments without a matching prefix
/// are appended to the current logical line.
const PREFIX_RULES: &[(&str, TokenAction)] = &[("tags/", TokenAction::StartLine)];

fn classify(segment: &str) -> Option<(TokenAction, &str)> {
    PREFIX_RULES.iter().find_map(|(prefix, action)| {
        segment
            .strip_prefix(prefix)
            .map(|remainder| (*action, remainder))
    })
}

/// Split one line of a reference block before every space which is
/// followed by a known prefix.
fn segments(line: &str) -> Vec<&str> {
    let mut starts = vec![0];
    for (prefix, _) in PREFIX_RULES {
        let marker = format!(" {prefix}");
        starts.extend(line.match_indices(marker.as_str()).map(|(index, _)| index + 1));
    }
    starts.sort_unstable();
    starts.dedup();
    starts.push(line.len());
    starts
        .windows(2)
        .map(|bounds| line[bounds[0]..bounds[1]].trim())
        .collect()
}

/// Split a reference block into logical `<scope>/<file>:<line>` lines.
fn logical_lines(comment: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for segment in comment.lines().flat_map(segments) {
        if segment.is_empty() {
            continue;
        }
        match classify(segment) {
            Some((TokenAction::StartLine, remainder)) => {
                lines.push(std::mem::replace(&mut current, String::from(remainder)));
            }
            None => {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(segment);
            }
        }
    }
    lines.push(current);
    lines.retain(|line| !line.is_empty());
    lines
}

fn parse_line(line: &str) -> Result<Reference> {
    let malformed = |reason: &str| Error::MalformedReference {
        reference: String::from(line),
        reason: String::from(reason),
    };

    let (path, lineno) = line
        .rsplit_once(':')
        .ok_or_else(|| malformed("missing line number"))?;
    let line_number = lineno
        .parse::<usize>()
        .map_err(|_| malformed("line number is not a number"))?;
    if line_number == 0 {
        return Err(malformed("line numbers start at 1"));
    }
    if path.contains(':') {
        return Err(malformed("more than one reference on a line"));
    }
    let target_file = path
        .split('/')
        .nth(1)
        .filter(|file| !file.is_empty())
        .ok_or_else(|| malformed("missing file name"))?;

    Ok(Reference {
        target_file: String::from(target_file),
        line_number,
    })
}

/// Parse all references found in `comment`.
///
/// An empty comment yields no references. Any line which cannot be
/// decoded fails the whole comment with [`Error::MalformedReference`].
pub fn parse(comment: &str) -> Result<Vec<Reference>> {
    logical_lines(comment)
        .iter()
        .map(|line| parse_line(line))
        .collect()
}

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

//! Helpers for translating Mycroft skills.
//!
//! Community translations of the skills are exported as one Gettext
//! PO file per skill. Every message carries references to the lines
//! of the skill's resource files (vocabularies, dialogs, regular
//! expressions) where the source text came from. The functions here
//! rebuild those resource files from the translated messages and
//! write them into the locale directories of the installed skills.
//!
//! The pipeline for one skill is:
//!
//! 1. [`catalog::load`] reads the PO file,
//! 2. [`projection::project`] decodes the references with
//!    [`references::parse`] and rebuilds the lines of each file,
//! 3. [`routing::Router`] decides where each file belongs,
//! 4. [`writer::flush`] writes it.
//!
//! [`update::update_all`] runs this for every installed skill.

pub mod catalog;
pub mod config;
pub mod error;
pub mod projection;
pub mod references;
pub mod routing;
pub mod skills;
pub mod update;
pub mod writer;

pub use error::{Error, Result};

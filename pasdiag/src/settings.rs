// pasdiag - diagnostics for Pascal source files.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{
    fs::read_to_string,
    io::Error as IoError,
    path::{Path, PathBuf},
};

use bitflags::bitflags;
use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::identifier::ReservedWord;

/// Which words the scanner treats as reserved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `program`, `const`, `var`, `begin`, `end`, `for`, `case`, `of`, `if`,
    /// `then`, and `else`.
    Standard,

    /// The standard words plus `while`, `do`, `to`, and `downto`.
    #[default]
    Extended,
}

impl Dialect {
    /// Returns true if `word` is reserved in this dialect.
    pub fn reserves(self, word: ReservedWord) -> bool {
        self == Dialect::Extended || !word.is_extension()
    }
}

bitflags! {
    /// Line analysis rules that may be turned on or off.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Checks: u8 {
        /// `=` written where `:=` was intended.
        const ASSIGNMENT = 1 << 0;

        /// `...` written for a range.
        const RANGES = 1 << 1;

        /// Undeclared short names such as `x` and `i`.
        const UNKNOWN_IDENTIFIERS = 1 << 2;

        /// Case labels that are neither literals nor declared names.
        const CASE_LABELS = 1 << 3;

        /// `begin`/`case`/`record` ... `end` balance and `end` spelling.
        const BLOCKS = 1 << 4;

        /// `if`...`then`, `for`...`do`, `while`...`do`, and `case`...`of`.
        const PAIRED_KEYWORDS = 1 << 5;
    }
}

impl Default for Checks {
    fn default() -> Self {
        Checks::all() - Checks::PAIRED_KEYWORDS
    }
}

/// Analysis settings, usually read from a TOML file.
///
/// Every key is optional:
///
/// ```toml
/// dialect = "standard"
/// paired-keywords = true
/// unknown-identifiers = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    pub dialect: Dialect,
    pub paired_keywords: bool,
    pub assignment: bool,
    pub ranges: bool,
    pub unknown_identifiers: bool,
    pub case_labels: bool,
    pub blocks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            paired_keywords: false,
            assignment: true,
            ranges: true,
            unknown_identifiers: true,
            case_labels: true,
            blocks: true,
        }
    }
}

#[derive(ThisError, Debug)]
pub enum SettingsError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: IoError },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Settings {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads settings from the TOML file at `path`.
    pub fn load<P>(path: P) -> Result<Self, SettingsError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let contents = read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the enabled line analysis rules.
    pub fn checks(&self) -> Checks {
        let mut checks = Checks::empty();
        checks.set(Checks::ASSIGNMENT, self.assignment);
        checks.set(Checks::RANGES, self.ranges);
        checks.set(Checks::UNKNOWN_IDENTIFIERS, self.unknown_identifiers);
        checks.set(Checks::CASE_LABELS, self.case_labels);
        checks.set(Checks::BLOCKS, self.blocks);
        checks.set(Checks::PAIRED_KEYWORDS, self.paired_keywords);
        checks
    }
}

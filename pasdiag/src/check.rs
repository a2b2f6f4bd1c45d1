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
    ffi::OsStr,
    io::{Write, stdout},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use encoding_rs::Encoding;
use log::{info, warn};
use pasdiag::{
    engine::Engine,
    lex::source::SourceFile,
    settings::{Dialect, Settings},
};
use walkdir::WalkDir;

use crate::parse_encoding;

/// Report diagnostics for Pascal source files.
///
/// Exits with status 1 if any file has a diagnostic.
#[derive(Args, Clone, Debug)]
pub struct Check {
    /// Files and directories to check.  Directories are searched for files
    /// whose names end in `.pas`.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Search subdirectories too.
    #[arg(long, short = 'r')]
    recursive: bool,

    /// The encoding to use.  By default, each file's encoding is guessed
    /// from its contents.
    #[arg(long, value_parser = parse_encoding, help_heading = "Input file options")]
    encoding: Option<&'static Encoding>,

    /// Settings file, in TOML format.
    #[arg(long, help_heading = "Analysis options")]
    config: Option<PathBuf>,

    /// Check that `if`, `for`, `while`, and `case` have `then`, `do`, or
    /// `of`, with text on both sides.
    #[arg(long, help_heading = "Analysis options")]
    paired_keywords: bool,

    /// Set of reserved words, overriding the settings file.
    #[arg(long, value_enum, help_heading = "Analysis options")]
    dialect: Option<Dialect>,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Text, help_heading = "Output options")]
    format: Format,

    /// Also show the token codes for each line.
    #[arg(long, help_heading = "Output options")]
    tokens: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Source listing with a caret under each diagnostic.
    #[default]
    Text,

    /// One JSON object per file.
    Json,
}

impl Check {
    pub fn run(self) -> Result<ExitCode> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if self.paired_keywords {
            settings.paired_keywords = true;
        }
        if let Some(dialect) = self.dialect {
            settings.dialect = dialect;
        }
        let engine = Engine::new(settings);

        let files = self.files();
        if files.is_empty() {
            warn!("no `.pas` files found");
        }

        let mut stdout = stdout().lock();
        let mut any_errors = false;
        for path in files {
            let source = match SourceFile::for_file(&path, self.encoding) {
                Ok(source) => source,
                Err(error) => {
                    warn!("skipping {}", path.display());
                    eprintln!("{error}");
                    continue;
                }
            };
            let report = engine.check(&source);
            info!(
                "{}: {} error(s)",
                path.display(),
                report.diagnostics().len()
            );
            any_errors |= report.has_errors();

            match self.format {
                Format::Text => {
                    write!(stdout, "{report}")?;
                    if self.tokens {
                        writeln!(stdout)?;
                        write!(stdout, "{}", report.token_listing())?;
                    }
                    writeln!(stdout)?;
                }
                Format::Json => {
                    serde_json::to_writer(&mut stdout, &report.summary(self.tokens))
                        .with_context(|| format!("{}: writing JSON", path.display()))?;
                    writeln!(stdout)?;
                }
            }
        }

        Ok(if any_errors {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }

    /// Returns the files to check, in the order given on the command line.
    /// Files found in a directory are sorted by name.
    fn files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in &self.paths {
            if !path.is_dir() {
                files.push(path.clone());
                continue;
            }

            let max_depth = if self.recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(path)
                .max_depth(max_depth)
                .sort_by_file_name()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(error) => {
                        warn!("{error}");
                        continue;
                    }
                };
                if entry.file_type().is_file() && is_pascal_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }
        files
    }
}

fn is_pascal_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("pas"))
}

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
    io::{Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::Args;
use encoding_rs::Encoding;
use pasdiag::{
    lex::{scan::Scanner, source::SourceFile},
    message::DiagnosticSink,
    settings::Dialect,
};

use crate::parse_encoding;

/// Show the token codes on each line of a Pascal source file.
#[derive(Args, Clone, Debug)]
pub struct Tokens {
    /// File to scan.
    #[arg(required = true)]
    input: PathBuf,

    /// The encoding to use.
    #[arg(long, value_parser = parse_encoding, help_heading = "Input file options")]
    encoding: Option<&'static Encoding>,

    /// Set of reserved words.
    #[arg(long, value_enum, default_value_t = Dialect::Extended)]
    dialect: Dialect,

    /// Show each token's position and name along with its code.
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Tokens {
    pub fn run(self) -> Result<ExitCode> {
        let source = SourceFile::for_file(&self.input, self.encoding)?;
        let mut sink = DiagnosticSink::new();
        let mut stdout = stdout().lock();
        let mut current_line = None;
        for (position, token) in Scanner::new(source.lines(), self.dialect).tokens(&mut sink) {
            if self.verbose {
                writeln!(stdout, "{position}: {:3} {token}", token.code())?;
                continue;
            }
            if current_line != Some(position.line) {
                if current_line.is_some() {
                    writeln!(stdout)?;
                }
                write!(stdout, "{:4}:", position.line)?;
                current_line = Some(position.line);
            }
            write!(stdout, " {}", token.code())?;
        }
        if !self.verbose {
            writeln!(stdout)?;
        }
        for diagnostic in sink.all() {
            eprintln!("{diagnostic}");
        }
        Ok(ExitCode::SUCCESS)
    }
}


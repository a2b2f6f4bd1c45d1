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

//! Running both analysis passes over a source file and reporting the
//! results.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use enum_map::EnumMap;
use log::debug;
use serde::Serialize;
use unicode_width::UnicodeWidthChar;

use crate::{
    analyze::analyze,
    lex::{Token, scan::Scanner, source::SourceFile},
    message::{Category, DiagnosticSink},
    settings::Settings,
};

#[derive(Clone, Debug, Default)]
pub struct Engine {
    settings: Settings,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Scans and analyzes `source` and returns the results.
    ///
    /// The scanner and the line analyzer each make their own pass over the
    /// lines.  Their diagnostics are merged in one [DiagnosticSink].
    pub fn check<'a>(&self, source: &'a SourceFile) -> Report<'a> {
        let mut sink = DiagnosticSink::new();
        let mut tokens = BTreeMap::<usize, Vec<Token>>::new();
        for (position, token) in
            Scanner::new(source.lines(), self.settings.dialect).tokens(&mut sink)
        {
            tokens.entry(position.line).or_default().push(token);
        }
        analyze(source.lines(), self.settings.checks(), &mut sink);
        debug!(
            "{}: {} line(s), {} diagnostic(s)",
            source.file_name().unwrap_or("<input>"),
            source.len(),
            sink.len()
        );
        Report {
            source,
            sink,
            tokens,
        }
    }
}

/// The results of checking one [SourceFile].
///
/// The `Display` implementation lists the source with a caret under each
/// diagnostic, followed by a count of errors.
pub struct Report<'a> {
    source: &'a SourceFile,
    sink: DiagnosticSink,
    tokens: BTreeMap<usize, Vec<Token>>,
}

impl<'a> Report<'a> {
    pub fn source(&self) -> &'a SourceFile {
        self.source
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Returns the tokens that start on each line.  The final
    /// [Token::End] is on the line after the last line.
    pub fn tokens(&self) -> &BTreeMap<usize, Vec<Token>> {
        &self.tokens
    }

    pub fn has_errors(&self) -> bool {
        !self.sink.is_empty()
    }

    /// Returns a serializable summary.  If `include_tokens` is true, the
    /// summary includes the token codes for each line.
    pub fn summary(&self, include_tokens: bool) -> Summary<'a> {
        let diagnostics = self
            .sink
            .all()
            .map(|diagnostic| DiagnosticSummary {
                line: diagnostic.position.line,
                column: diagnostic.position.column,
                code: diagnostic.code.number(),
                category: diagnostic.code.category(),
                message: diagnostic
                    .message(self.source.line(diagnostic.position.line).unwrap_or_default()),
            })
            .collect();
        let tokens = include_tokens.then(|| {
            self.tokens
                .iter()
                .map(|(line, tokens)| (*line, tokens.iter().map(Token::code).collect()))
                .collect()
        });
        Summary {
            file: self.source.file_name(),
            encoding: self.source.encoding().name(),
            errors: self.sink.len(),
            counts: self.sink.counts(),
            diagnostics,
            tokens,
        }
    }

    /// Returns a value whose `Display` implementation lists the token codes
    /// that start on each line.
    pub fn token_listing(&self) -> TokenListing<'_> {
        TokenListing(&self.tokens)
    }
}

/// Returns the white space that positions a caret under the character at
/// `column` in `line`, when `line` is displayed starting at the same
/// position.
fn caret_padding(line: &str, column: usize) -> String {
    line.chars()
        .take(column)
        .map(|c| match c {
            '\t' => String::from("\t"),
            c => " ".repeat(c.width().unwrap_or(0)),
        })
        .collect()
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(file_name) = self.source.file_name() {
            writeln!(f, "File: {file_name}")?;
            writeln!(f, "{}", "=".repeat(50))?;
        }
        for (index, line) in self.source.lines().iter().enumerate() {
            let line_number = index + 1;
            writeln!(f, "{line_number:4}: {line}")?;
            for diagnostic in self.sink.line(line_number) {
                writeln!(
                    f,
                    "      {}^ {}",
                    caret_padding(line, diagnostic.position.column),
                    diagnostic.message(line)
                )?;
            }
        }
        for diagnostic in self
            .sink
            .all()
            .filter(|diagnostic| self.source.line(diagnostic.position.line).is_none())
        {
            writeln!(f, "{diagnostic}")?;
        }

        writeln!(f)?;
        write!(f, "Found {} error(s)", self.sink.len())?;
        let counts = self
            .sink
            .counts()
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(category, n)| format!("{n} {category}"))
            .collect::<Vec<_>>();
        if !counts.is_empty() {
            write!(f, " ({})", counts.join(", "))?;
        }
        writeln!(f)?;
        if self.source.file_name().is_some() {
            writeln!(f, "{}", "=".repeat(50))?;
        }
        Ok(())
    }
}

/// Token codes by line.  See [Report::token_listing].
pub struct TokenListing<'a>(&'a BTreeMap<usize, Vec<Token>>);

impl Display for TokenListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (line, tokens) in self.0 {
            write!(f, "{line:4}:")?;
            for token in tokens {
                write!(f, " {}", token.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serializable form of a [Report].
#[derive(Clone, Debug, Serialize)]
pub struct Summary<'a> {
    pub file: Option<&'a str>,
    pub encoding: &'static str,
    pub errors: usize,
    pub counts: EnumMap<Category, usize>,
    pub diagnostics: Vec<DiagnosticSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<BTreeMap<usize, Vec<u8>>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticSummary {
    pub line: usize,
    pub column: usize,
    pub code: u8,
    pub category: Category,
    pub message: String,
}

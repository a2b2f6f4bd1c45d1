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

//! Diagnostics and the per-run collection that holds them.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use enum_map::{Enum, EnumMap};
use serde::Serialize;
use thiserror::Error as ThisError;

use crate::identifier::IdentifierChar;

/// A line number and column number within a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// 1-based line number.
    ///
    /// One more than the number of lines in the source designates the
    /// position after the end of input.
    pub line: usize,

    /// 0-based column number, counted in characters.
    ///
    /// A column equal to the length of the line designates the implicit
    /// end-of-line character.
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// Broad classes of [ErrorCode].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Malformed lexemes found by the scanner.
    Lexical,

    /// Unbalanced blocks, comments, and string literals.
    Structural,

    /// Pattern-based guesses about likely mistakes.
    Heuristic,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lexical => "lexical",
            Category::Structural => "structural",
            Category::Heuristic => "heuristic",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of defect that a [Diagnostic] reports.
///
/// The discriminants are the numeric codes shown to users.  The `Display`
/// implementation gives the human-readable description.
#[derive(ThisError, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    #[error("Unrecognized character.")]
    UnknownSymbol = 100,

    #[error("Missing `of` after `case` selector.")]
    MissingOf = 8,

    #[error("A `for` loop header must assign the control variable with `:=`.")]
    ForWithoutAssignment = 51,

    #[error("Missing `then` after `if` condition.")]
    MissingThen = 52,

    #[error("Missing `do` after loop header.")]
    MissingDo = 54,

    #[error("Unterminated string literal.")]
    UnterminatedString = 76,

    #[error("Unterminated comment.")]
    UnterminatedComment = 86,

    #[error("Invalid character constant.")]
    InvalidCharConstant = 101,

    #[error("Use `:=` instead of `=` for assignment.")]
    AssignmentExpected = 103,

    #[error("Unknown identifier.")]
    UnknownIdentifier = 104,

    #[error("Case label must be a quoted character, numeric constant, or declared name.")]
    InvalidCaseLabel = 147,

    #[error("Invalid range syntax (use `..` instead of `...`).")]
    InvalidRange = 201,

    #[error("Malformed block terminator (use `end`, `end;`, or `end.`).")]
    MalformedEnd = 202,

    #[error("Invalid integer constant (must be between -32768 and 32767).")]
    InvalidNumber = 203,

    #[error("`end` without matching `begin`.")]
    UnmatchedEnd = 204,

    #[error("Block is not terminated before end of input.")]
    UnterminatedBlock = 205,

    #[error("Missing condition or selector expression.")]
    EmptyCondition = 206,

    #[error("Missing statement or alternatives after keyword.")]
    EmptyBody = 207,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        ErrorCode::UnknownSymbol,
        ErrorCode::MissingOf,
        ErrorCode::ForWithoutAssignment,
        ErrorCode::MissingThen,
        ErrorCode::MissingDo,
        ErrorCode::UnterminatedString,
        ErrorCode::UnterminatedComment,
        ErrorCode::InvalidCharConstant,
        ErrorCode::AssignmentExpected,
        ErrorCode::UnknownIdentifier,
        ErrorCode::InvalidCaseLabel,
        ErrorCode::InvalidRange,
        ErrorCode::MalformedEnd,
        ErrorCode::InvalidNumber,
        ErrorCode::UnmatchedEnd,
        ErrorCode::UnterminatedBlock,
        ErrorCode::EmptyCondition,
        ErrorCode::EmptyBody,
    ];

    /// Returns the numeric code.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable description, the same as `to_string()`.
    pub fn description(self) -> String {
        self.to_string()
    }

    pub fn category(self) -> Category {
        match self {
            ErrorCode::UnknownSymbol | ErrorCode::InvalidCharConstant | ErrorCode::InvalidNumber => {
                Category::Lexical
            }
            ErrorCode::UnterminatedString
            | ErrorCode::UnterminatedComment
            | ErrorCode::MalformedEnd
            | ErrorCode::UnmatchedEnd
            | ErrorCode::UnterminatedBlock => Category::Structural,
            ErrorCode::MissingOf
            | ErrorCode::ForWithoutAssignment
            | ErrorCode::MissingThen
            | ErrorCode::MissingDo
            | ErrorCode::AssignmentExpected
            | ErrorCode::UnknownIdentifier
            | ErrorCode::InvalidCaseLabel
            | ErrorCode::InvalidRange
            | ErrorCode::EmptyCondition
            | ErrorCode::EmptyBody => Category::Heuristic,
        }
    }
}

impl TryFrom<u8> for ErrorCode {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.number() == number)
            .ok_or(number)
    }
}

/// Returns the description for numeric error code `number`.
pub fn describe(number: u8) -> String {
    match ErrorCode::try_from(number) {
        Ok(code) => code.to_string(),
        Err(number) => format!("unrecognized error (code {number})"),
    }
}

/// A defect found at a particular position in the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    pub code: ErrorCode,
}

impl Diagnostic {
    /// Returns the message for this diagnostic, given the text of the line
    /// it is on.
    ///
    /// Messages for unknown identifiers name the identifier, which is
    /// recovered from `line` at the diagnostic's column.
    pub fn message(&self, line: &str) -> String {
        match self.code {
            ErrorCode::UnknownIdentifier => {
                let name = line
                    .chars()
                    .skip(self.position.column)
                    .take_while(|c| c.may_continue_id())
                    .collect::<String>();
                if name.is_empty() {
                    self.code.to_string()
                } else {
                    format!("Unknown identifier `{name}`.")
                }
            }
            code => code.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}: error {}: {}",
            self.position,
            self.code.number(),
            self.code
        )
    }
}

/// Diagnostics for a single analysis run, grouped by line.
///
/// Within a line, diagnostics are kept in column order.  Diagnostics at the
/// same column stay in the order they were recorded.  Nothing is ever
/// deduplicated.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSink {
    lines: BTreeMap<usize, Vec<Diagnostic>>,
    count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic with `code` at `position`.
    pub fn record(&mut self, code: ErrorCode, position: Position) {
        let diagnostics = self.lines.entry(position.line).or_default();
        let index = diagnostics.partition_point(|d| d.position.column <= position.column);
        diagnostics.insert(index, Diagnostic { position, code });
        self.count += 1;
    }

    /// Returns the diagnostics on 1-based line `line`, in column order.
    pub fn line(&self, line: usize) -> &[Diagnostic] {
        self.lines.get(&line).map_or(&[], Vec::as_slice)
    }

    /// Returns all of the diagnostics, ordered by line and then by column.
    pub fn all(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lines.values().flatten()
    }

    /// Returns the number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of diagnostics in each [Category].
    pub fn counts(&self) -> EnumMap<Category, usize> {
        let mut counts = EnumMap::default();
        for diagnostic in self.all() {
            counts[diagnostic.code.category()] += 1;
        }
        counts
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, DiagnosticSink, ErrorCode, Position, describe};

    #[test]
    fn sink_orders_by_line_then_column() {
        let mut sink = DiagnosticSink::new();
        sink.record(ErrorCode::InvalidRange, Position::new(3, 7));
        sink.record(ErrorCode::UnknownIdentifier, Position::new(1, 4));
        sink.record(ErrorCode::AssignmentExpected, Position::new(3, 2));
        sink.record(ErrorCode::UnknownIdentifier, Position::new(1, 0));

        let order = sink
            .all()
            .map(|d| (d.position.line, d.position.column, d.code))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                (1, 0, ErrorCode::UnknownIdentifier),
                (1, 4, ErrorCode::UnknownIdentifier),
                (3, 2, ErrorCode::AssignmentExpected),
                (3, 7, ErrorCode::InvalidRange),
            ]
        );
        assert_eq!(sink.len(), 4);
        assert!(sink.line(2).is_empty());
    }

    #[test]
    fn sink_keeps_ties_in_insertion_order_and_duplicates() {
        let mut sink = DiagnosticSink::new();
        sink.record(ErrorCode::InvalidRange, Position::new(1, 5));
        sink.record(ErrorCode::UnknownIdentifier, Position::new(1, 5));
        sink.record(ErrorCode::InvalidRange, Position::new(1, 5));
        let codes = sink.line(1).iter().map(|d| d.code).collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![
                ErrorCode::InvalidRange,
                ErrorCode::UnknownIdentifier,
                ErrorCode::InvalidRange
            ]
        );
    }

    #[test]
    fn counts_by_category() {
        let mut sink = DiagnosticSink::new();
        sink.record(ErrorCode::InvalidNumber, Position::new(1, 0));
        sink.record(ErrorCode::UnmatchedEnd, Position::new(2, 0));
        sink.record(ErrorCode::InvalidRange, Position::new(2, 3));
        sink.record(ErrorCode::AssignmentExpected, Position::new(2, 4));
        let counts = sink.counts();
        assert_eq!(counts[Category::Lexical], 1);
        assert_eq!(counts[Category::Structural], 1);
        assert_eq!(counts[Category::Heuristic], 2);

        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.all().count(), 0);
    }

    #[test]
    fn codes_round_trip_through_numbers() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.number()), Ok(code));
        }
        assert_eq!(ErrorCode::AssignmentExpected.number(), 103);
        assert_eq!(ErrorCode::InvalidCaseLabel.number(), 147);
        assert_eq!(ErrorCode::UnknownSymbol.number(), 100);
        assert_eq!(ErrorCode::try_from(6), Err(6));
    }

    #[test]
    fn describe_unknown_code() {
        assert_eq!(describe(255), "unrecognized error (code 255)");
        assert_eq!(describe(201), "Invalid range syntax (use `..` instead of `...`).");
    }

    #[test]
    fn unknown_identifier_message_names_identifier() {
        let diagnostic = super::Diagnostic {
            position: Position::new(1, 2),
            code: ErrorCode::UnknownIdentifier,
        };
        assert_eq!(diagnostic.message("  ch := 'a';"), "Unknown identifier `ch`.");
        assert_eq!(diagnostic.to_string(), "1.2: error 104: Unknown identifier.");
    }
}

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

use std::fmt::{Display, Formatter, Result as FmtResult};

use unicase::UniCase;

use crate::settings::Dialect;

pub trait IdentifierChar {
    /// Returns true if `self` may be the first character in an identifier.
    fn may_start_id(self) -> bool;

    /// Returns true if `self` may be a second or subsequent character in an
    /// identifier.
    fn may_continue_id(self) -> bool;
}

impl IdentifierChar for char {
    fn may_start_id(self) -> bool {
        self.is_alphabetic() || self == '_'
    }

    fn may_continue_id(self) -> bool {
        self.is_alphanumeric() || self == '_'
    }
}

/// Reserved words.
///
/// Reserved words are matched without regard to case.  `while`, `do`, `to`,
/// and `downto` are only reserved in [Dialect::Extended].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReservedWord {
    Program,
    Const,
    Var,
    Begin,
    End,
    For,
    Case,
    Of,
    If,
    Then,
    Else,
    While,
    Do,
    To,
    Downto,
}

impl ReservedWord {
    pub const ALL: [ReservedWord; 15] = [
        ReservedWord::Program,
        ReservedWord::Const,
        ReservedWord::Var,
        ReservedWord::Begin,
        ReservedWord::End,
        ReservedWord::For,
        ReservedWord::Case,
        ReservedWord::Of,
        ReservedWord::If,
        ReservedWord::Then,
        ReservedWord::Else,
        ReservedWord::While,
        ReservedWord::Do,
        ReservedWord::To,
        ReservedWord::Downto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservedWord::Program => "program",
            ReservedWord::Const => "const",
            ReservedWord::Var => "var",
            ReservedWord::Begin => "begin",
            ReservedWord::End => "end",
            ReservedWord::For => "for",
            ReservedWord::Case => "case",
            ReservedWord::Of => "of",
            ReservedWord::If => "if",
            ReservedWord::Then => "then",
            ReservedWord::Else => "else",
            ReservedWord::While => "while",
            ReservedWord::Do => "do",
            ReservedWord::To => "to",
            ReservedWord::Downto => "downto",
        }
    }

    /// Returns the token code for this reserved word.
    pub fn code(self) -> u8 {
        match self {
            ReservedWord::Program => 122,
            ReservedWord::Const => 116,
            ReservedWord::Var => 105,
            ReservedWord::Begin => 113,
            ReservedWord::End => 104,
            ReservedWord::For => 109,
            ReservedWord::Case => 31,
            ReservedWord::Of => 101,
            ReservedWord::If => 56,
            ReservedWord::Then => 52,
            ReservedWord::Else => 32,
            ReservedWord::While => 114,
            ReservedWord::Do => 54,
            ReservedWord::To => 103,
            ReservedWord::Downto => 118,
        }
    }

    /// Returns true if this word is reserved only in [Dialect::Extended].
    pub fn is_extension(self) -> bool {
        matches!(
            self,
            ReservedWord::While | ReservedWord::Do | ReservedWord::To | ReservedWord::Downto
        )
    }

    /// Looks up `s` as a reserved word in `dialect`.
    pub fn lookup(s: &str, dialect: Dialect) -> Option<Self> {
        let s = UniCase::new(s);
        Self::ALL
            .into_iter()
            .filter(|word| dialect.reserves(*word))
            .find(|word| UniCase::new(word.as_str()) == s)
    }
}

impl TryFrom<&str> for ReservedWord {
    type Error = ();

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::lookup(source, Dialect::Extended).ok_or(())
    }
}

impl Display for ReservedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

pub fn is_reserved_word(s: &str) -> bool {
    ReservedWord::try_from(s).is_ok()
}

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

use crate::identifier::ReservedWord;

/// A lexical category.
///
/// Tokens carry no text.  The text of a token can be recovered from the
/// source using the position where the scanner found it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Identifier.
    Id,

    /// Integer literal.
    Integer,

    /// Character literal, e.g. `'a'`.
    Char,

    /// Reserved word.
    Reserved(ReservedWord),

    /// Operators and punctuators.
    Punct(Punct),

    /// End of input.
    End,
}

impl Token {
    /// Returns the numeric code for this token.
    pub fn code(&self) -> u8 {
        match self {
            Token::Id => 2,
            Token::Integer => 15,
            Token::Char => 83,
            Token::Reserved(word) => word.code(),
            Token::Punct(punct) => punct.code(),
            Token::End => 0,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Token::Id => write!(f, "identifier"),
            Token::Integer => write!(f, "integer"),
            Token::Char => write!(f, "character"),
            Token::Reserved(word) => write!(f, "`{word}`"),
            Token::Punct(punct) => write!(f, "`{punct}`"),
            Token::End => write!(f, "end of input"),
        }
    }
}

/// Operators and punctuators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Punct {
    /// `;`.
    Semicolon,

    /// `:`.
    Colon,

    /// `=`.
    Equals,

    /// `:=`.
    Assign,

    /// `,`.
    Comma,

    /// `.`.
    Dot,

    /// `..`.
    Range,

    /// `(`.
    LParen,

    /// `)`.
    RParen,

    /// `[`.
    LSquare,

    /// `]`.
    RSquare,

    /// `<`.
    Lt,

    /// `>`.
    Gt,

    /// `<=`.
    Le,

    /// `>=`.
    Ge,

    /// `<>`.
    Ne,

    /// `+`.
    Plus,

    /// `-`.
    Dash,

    /// `*`.
    Asterisk,

    /// `/`.
    Slash,
}

impl Punct {
    /// Returns the punctuator spelled as the single character `c`, if any.
    ///
    /// Characters that can begin a two-character punctuator (`:`, `.`, `<`,
    /// `>`) are not recognized here.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ';' => Some(Self::Semicolon),
            '=' => Some(Self::Equals),
            ',' => Some(Self::Comma),
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            '[' => Some(Self::LSquare),
            ']' => Some(Self::RSquare),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Dash),
            '*' => Some(Self::Asterisk),
            '/' => Some(Self::Slash),
            _ => None,
        }
    }

    /// Returns the punctuator's spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Equals => "=",
            Self::Assign => ":=",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Range => "..",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LSquare => "[",
            Self::RSquare => "]",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Ne => "<>",
            Self::Plus => "+",
            Self::Dash => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
        }
    }

    /// Returns the numeric code for this punctuator.
    pub fn code(&self) -> u8 {
        match self {
            Self::Semicolon => 14,
            Self::Colon => 5,
            Self::Equals => 16,
            Self::Assign => 51,
            Self::Comma => 20,
            Self::Dot => 61,
            Self::Range => 75,
            Self::LParen => 9,
            Self::RParen => 4,
            Self::LSquare => 11,
            Self::RSquare => 12,
            Self::Lt => 65,
            Self::Gt => 66,
            Self::Le => 67,
            Self::Ge => 68,
            Self::Ne => 69,
            Self::Plus => 70,
            Self::Dash => 71,
            Self::Asterisk => 21,
            Self::Slash => 60,
        }
    }
}

impl Display for Punct {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

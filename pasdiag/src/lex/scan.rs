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

//! Scanning.
//!
//! The scanner reads characters from a [Cursor] and groups them into
//! [Token]s.  It never stops on malformed input: a bad numeric or character
//! literal still produces a token of the expected kind, and the defect is
//! recorded in a [DiagnosticSink].  This keeps the token stream in step with
//! the source no matter what the input contains.
//!
//! Comments (`{...}`, `(*...*)`, and `//` to end of line) are skipped like
//! white space.  The scanner does not report unterminated comments; the line
//! analyzer does that.

use crate::{
    identifier::{IdentifierChar, ReservedWord},
    message::{DiagnosticSink, ErrorCode, Position},
    settings::Dialect,
};

use super::{
    cursor::{Cursor, Lookahead},
    token::{Punct, Token},
};

/// Splits source lines into tokens.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
}

impl<'a> Scanner<'a> {
    /// Returns a scanner positioned at the start of `lines`.
    pub fn new(lines: &'a [String], dialect: Dialect) -> Self {
        Self {
            cursor: Cursor::new(lines),
            dialect,
        }
    }

    /// Returns true if the scanner has consumed all of its input.
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Scans the next token and returns it along with the position where it
    /// started.
    ///
    /// Once the input is exhausted, this returns [Token::End] at the position
    /// just past the last line on every call.  [Token::End] is also returned,
    /// for that call only, when an unrecognized character is skipped.
    pub fn next_token(&mut self, sink: &mut DiagnosticSink) -> (Position, Token) {
        self.skip_trivia();
        let start = self.cursor.position();
        let token = match self.cursor.current() {
            Lookahead::Char(c) => self.scan(c, start, sink),
            Lookahead::EndOfLine | Lookahead::EndOfInput => Token::End,
        };
        (start, token)
    }

    /// Returns an iterator over the remaining tokens, which ends with the
    /// [Token::End] produced at end of input.
    pub fn tokens<'s>(self, sink: &'s mut DiagnosticSink) -> Tokens<'a, 's> {
        Tokens {
            scanner: self,
            sink,
            done: false,
        }
    }

    /// Skips white space, new-lines, and comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.cursor.current(), self.cursor.peek()) {
                (Lookahead::Char(c), _) if c.is_whitespace() => self.cursor.advance(),
                (Lookahead::EndOfLine, _) => self.cursor.advance(),
                (Lookahead::Char('{'), _) => self.skip_comment("}"),
                (Lookahead::Char('('), Lookahead::Char('*')) => {
                    self.cursor.advance();
                    self.skip_comment("*)")
                }
                (Lookahead::Char('/'), Lookahead::Char('/')) => {
                    while let Lookahead::Char(_) = self.cursor.current() {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Skips past `terminator`, or to end of input if it never appears.  The
    /// cursor must be on the first character of the comment's opening
    /// delimiter.
    fn skip_comment(&mut self, terminator: &str) {
        self.cursor.advance();
        let mut terminator_chars = terminator.chars();
        let (first, second) = (terminator_chars.next(), terminator_chars.next());
        loop {
            match self.cursor.current() {
                Lookahead::EndOfInput => break,
                Lookahead::Char(c) if Some(c) == first => {
                    self.cursor.advance();
                    match second {
                        None => break,
                        Some(second) if self.cursor.current() == Lookahead::Char(second) => {
                            self.cursor.advance();
                            break;
                        }
                        Some(_) => (),
                    }
                }
                _ => self.cursor.advance(),
            }
        }
    }

    fn scan(&mut self, c: char, start: Position, sink: &mut DiagnosticSink) -> Token {
        match c {
            '0'..='9' => self.scan_number(start, sink),
            '\'' => self.scan_char_constant(sink),
            ':' => self.scan_pair(Punct::Colon, &[('=', Punct::Assign)]),
            '.' => self.scan_pair(Punct::Dot, &[('.', Punct::Range)]),
            '<' => self.scan_pair(Punct::Lt, &[('=', Punct::Le), ('>', Punct::Ne)]),
            '>' => self.scan_pair(Punct::Gt, &[('=', Punct::Ge)]),
            _ if c.may_start_id() => self.scan_identifier(),
            _ => {
                self.cursor.advance();
                match Punct::from_char(c) {
                    Some(punct) => Token::Punct(punct),
                    None => {
                        sink.record(ErrorCode::UnknownSymbol, start);
                        Token::End
                    }
                }
            }
        }
    }

    /// Consumes characters while `f` accepts them and returns them.
    fn take_while<F>(&mut self, f: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut s = String::new();
        while let Lookahead::Char(c) = self.cursor.current() {
            if !f(c) {
                break;
            }
            s.push(c);
            self.cursor.advance();
        }
        s
    }

    fn scan_number(&mut self, start: Position, sink: &mut DiagnosticSink) -> Token {
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.parse::<i16>().is_err() {
            sink.record(ErrorCode::InvalidNumber, start);
        }
        Token::Integer
    }

    fn scan_identifier(&mut self) -> Token {
        let name = self.take_while(|c| c.may_continue_id());
        ReservedWord::lookup(&name, self.dialect).map_or(Token::Id, Token::Reserved)
    }

    /// Scans a character constant such as `'a'`.
    ///
    /// On error, skips ahead to the next quote on the same line, so that
    /// `'abc'` is consumed as a single (bad) token.
    fn scan_char_constant(&mut self, sink: &mut DiagnosticSink) -> Token {
        self.cursor.advance();
        let content = self.cursor.position();
        if !matches!(self.cursor.current(), Lookahead::Char(_)) {
            sink.record(ErrorCode::InvalidCharConstant, content);
            return Token::Char;
        }

        self.cursor.advance();
        if self.cursor.current() != Lookahead::Char('\'') {
            sink.record(ErrorCode::InvalidCharConstant, content);
            while let Lookahead::Char(c) = self.cursor.current() {
                if c == '\'' {
                    break;
                }
                self.cursor.advance();
            }
        }
        if self.cursor.current() == Lookahead::Char('\'') {
            self.cursor.advance();
        }
        Token::Char
    }

    /// Scans `single`, or one of the two-character punctuators in `pairs`
    /// if its second character comes next.
    fn scan_pair(&mut self, single: Punct, pairs: &[(char, Punct)]) -> Token {
        self.cursor.advance();
        if let Lookahead::Char(c) = self.cursor.current() {
            if let Some((_, punct)) = pairs.iter().find(|(second, _)| *second == c) {
                self.cursor.advance();
                return Token::Punct(*punct);
            }
        }
        Token::Punct(single)
    }
}

/// Iterator over the tokens from a [Scanner].
///
/// Yields `(position, token)` pairs.  The last item is always [Token::End]
/// at the position just past the last line, so the iterator is finite even
/// though [Scanner::next_token] can be called forever.
pub struct Tokens<'a, 's> {
    scanner: Scanner<'a>,
    sink: &'s mut DiagnosticSink,
    done: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = (Position, Token);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (position, token) = self.scanner.next_token(self.sink);
        if token == Token::End && self.scanner.at_end() {
            self.done = true;
        }
        Some((position, token))
    }
}

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

//! Character-at-a-time traversal of source lines.

use crate::message::Position;

/// What a [Cursor] is looking at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lookahead {
    /// An ordinary character.
    Char(char),

    /// The implicit character at the end of every line, including empty
    /// lines.
    EndOfLine,

    /// Past the end of the last line.
    EndOfInput,
}

/// A position within a sequence of lines.
///
/// Each line is treated as its characters followed by one
/// [Lookahead::EndOfLine].  Advancing past the end of the last line leaves
/// the cursor at column 0 of the line after the last one, where it stays.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    lines: &'a [String],

    /// 1-based.
    line: usize,

    /// In characters.
    column: usize,

    /// Byte offset of `column` within the current line.
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Returns a cursor at the first character of `lines`.
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            line: 1,
            column: 0,
            offset: 0,
        }
    }

    /// Returns what the cursor is looking at.
    pub fn current(&self) -> Lookahead {
        match self.lines.get(self.line - 1) {
            None => Lookahead::EndOfInput,
            Some(line) => match line[self.offset..].chars().next() {
                Some(c) => Lookahead::Char(c),
                None => Lookahead::EndOfLine,
            },
        }
    }

    /// Moves to the next character.  Does nothing at end of input.
    pub fn advance(&mut self) {
        match self.current() {
            Lookahead::Char(c) => {
                self.column += 1;
                self.offset += c.len_utf8();
            }
            Lookahead::EndOfLine => {
                self.line += 1;
                self.column = 0;
                self.offset = 0;
            }
            Lookahead::EndOfInput => (),
        }
    }

    /// Returns what the cursor would be looking at after one
    /// [advance](Self::advance).
    pub fn peek(&self) -> Lookahead {
        let mut next = self.clone();
        next.advance();
        next.current()
    }

    /// Returns the position of the current character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if the cursor has advanced past the last line.
    pub fn at_end(&self) -> bool {
        self.line > self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::message::Position;

    use super::{Cursor, Lookahead};

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    fn walk(input: &[&str]) -> Vec<(Position, Lookahead)> {
        let lines = lines(input);
        let mut cursor = Cursor::new(&lines);
        let mut result = Vec::new();
        loop {
            result.push((cursor.position(), cursor.current()));
            if cursor.at_end() {
                break;
            }
            cursor.advance();
        }
        result
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            walk(&[]),
            vec![(Position::new(1, 0), Lookahead::EndOfInput)]
        );
    }

    #[test]
    fn empty_lines_have_end_of_line() {
        assert_eq!(
            walk(&["", "a", ""]),
            vec![
                (Position::new(1, 0), Lookahead::EndOfLine),
                (Position::new(2, 0), Lookahead::Char('a')),
                (Position::new(2, 1), Lookahead::EndOfLine),
                (Position::new(3, 0), Lookahead::EndOfLine),
                (Position::new(4, 0), Lookahead::EndOfInput),
            ]
        );
    }

    #[test]
    fn columns_count_characters() {
        assert_eq!(
            walk(&["жё"]),
            vec![
                (Position::new(1, 0), Lookahead::Char('ж')),
                (Position::new(1, 1), Lookahead::Char('ё')),
                (Position::new(1, 2), Lookahead::EndOfLine),
                (Position::new(2, 0), Lookahead::EndOfInput),
            ]
        );
    }

    #[test]
    fn peek() {
        let lines = lines(&["ab", "c"]);
        let mut cursor = Cursor::new(&lines);
        assert_eq!(cursor.peek(), Lookahead::Char('b'));
        cursor.advance();
        assert_eq!(cursor.peek(), Lookahead::EndOfLine);
        cursor.advance();
        assert_eq!(cursor.peek(), Lookahead::Char('c'));
        assert_eq!(cursor.current(), Lookahead::EndOfLine);
        assert_eq!(cursor.position(), Position::new(1, 2));
    }

    #[test]
    fn advance_at_end_is_harmless() {
        let lines = lines(&["x"]);
        let mut cursor = Cursor::new(&lines);
        for _ in 0..5 {
            cursor.advance();
        }
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), Lookahead::EndOfInput);
        assert_eq!(cursor.position(), Position::new(2, 0));
    }
}

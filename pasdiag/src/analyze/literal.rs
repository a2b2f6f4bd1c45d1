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

//! Masking of comments and string literals.
//!
//! The line analyzer matches patterns against source text, so it needs to
//! ignore anything that appears inside a comment or a string literal.
//! [mask_line] replaces such text by spaces, which keeps every other
//! character in its original column.

use crate::message::{ErrorCode, Position};

/// The kinds of block comment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comment {
    /// `{...}`.
    Brace,

    /// `(*...*)`.
    Paren,
}

impl Comment {
    fn opener(self) -> &'static [char] {
        match self {
            Comment::Brace => &['{'],
            Comment::Paren => &['(', '*'],
        }
    }

    fn terminator(self) -> &'static [char] {
        match self {
            Comment::Brace => &['}'],
            Comment::Paren => &['*', ')'],
        }
    }
}

/// A string literal or block comment that continues past the end of a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenLiteral {
    /// A string literal that opened at the given position.
    String(Position),

    /// A block comment that opened at the given position.
    Comment(Comment, Position),
}

impl OpenLiteral {
    /// Returns the position of the literal's opening delimiter.
    pub fn position(&self) -> Position {
        match self {
            OpenLiteral::String(position) | OpenLiteral::Comment(_, position) => *position,
        }
    }

    /// Returns the error to report if input ends while the literal is open.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            OpenLiteral::String(_) => ErrorCode::UnterminatedString,
            OpenLiteral::Comment(..) => ErrorCode::UnterminatedComment,
        }
    }
}

/// The result of [mask_line].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Masked {
    /// The line's characters, with comments and string contents replaced by
    /// spaces.  String literals keep their quotes.
    pub chars: Vec<char>,

    /// The literal still open at the end of the line, if any.
    pub open: Option<OpenLiteral>,

    /// Set if a string literal carried over from an earlier line did not
    /// end on this line either.  Holds the position where the string
    /// opened.
    pub unterminated_string: Option<Position>,
}

impl Masked {
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Masks `line`, which is 1-based line `line_number`, given the literal left
/// open by the previous line.
///
/// A string literal may continue onto one more line only.  If the
/// continuation line has no closing quote, the string is reported as
/// unterminated and the rest of that line is discarded.  Block comments may
/// span any number of lines.
pub fn mask_line(line: &str, line_number: usize, open: Option<OpenLiteral>) -> Masked {
    let mut chars = line.chars().collect::<Vec<_>>();
    let mut i = 0;
    match open {
        None => (),
        Some(OpenLiteral::String(start)) => match closing_quote(&chars, 0) {
            Some(j) => {
                blank(&mut chars[..j]);
                i = j + 1;
            }
            None => {
                blank(&mut chars);
                return Masked {
                    chars,
                    open: None,
                    unterminated_string: Some(start),
                };
            }
        },
        Some(OpenLiteral::Comment(comment, _)) => match find(&chars, 0, comment.terminator()) {
            Some(j) => {
                let end = j + comment.terminator().len();
                blank(&mut chars[..end]);
                i = end;
            }
            None => {
                blank(&mut chars);
                return Masked {
                    chars,
                    open,
                    unterminated_string: None,
                };
            }
        },
    }

    while i < chars.len() {
        let comment = match (chars[i], chars.get(i + 1)) {
            ('\'', _) => match closing_quote(&chars, i + 1) {
                Some(j) => {
                    blank(&mut chars[i + 1..j]);
                    i = j + 1;
                    continue;
                }
                None => {
                    blank(&mut chars[i + 1..]);
                    return Masked {
                        chars,
                        open: Some(OpenLiteral::String(Position::new(line_number, i))),
                        unterminated_string: None,
                    };
                }
            },
            ('/', Some('/')) => {
                blank(&mut chars[i..]);
                break;
            }
            ('{', _) => Comment::Brace,
            ('(', Some('*')) => Comment::Paren,
            _ => {
                i += 1;
                continue;
            }
        };

        let body = i + comment.opener().len();
        match find(&chars, body, comment.terminator()) {
            Some(j) => {
                let end = j + comment.terminator().len();
                blank(&mut chars[i..end]);
                i = end;
            }
            None => {
                blank(&mut chars[i..]);
                return Masked {
                    chars,
                    open: Some(OpenLiteral::Comment(
                        comment,
                        Position::new(line_number, i),
                    )),
                    unterminated_string: None,
                };
            }
        }
    }
    Masked {
        chars,
        open: None,
        unterminated_string: None,
    }
}

fn blank(chars: &mut [char]) {
    chars.fill(' ');
}

/// Returns the index of the first quote at or after `from` that is not
/// escaped by a backslash.
fn closing_quote(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len()).find(|&j| chars[j] == '\'' && (j == 0 || chars[j - 1] != '\\'))
}

/// Returns the index of the first occurrence of `pattern` at or after
/// `from`.
fn find(chars: &[char], from: usize, pattern: &[char]) -> Option<usize> {
    chars
        .get(from..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|index| index + from)
}

#[cfg(test)]
mod tests {
    use crate::message::Position;

    use super::{Comment, OpenLiteral, mask_line};

    #[test]
    fn strings_keep_quotes() {
        let masked = mask_line("c := 'a;b' + '{';", 1, None);
        assert_eq!(masked.text(), "c := '   ' + ' ';");
        assert_eq!(masked.open, None);
    }

    #[test]
    fn comments_are_blanked() {
        let masked = mask_line("a {x} b (* y *) c // z", 1, None);
        assert_eq!(masked.text(), "a     b         c     ");
        assert_eq!(masked.open, None);
    }

    #[test]
    fn escaped_quote() {
        let masked = mask_line(r"s := 'it\'s';", 1, None);
        assert_eq!(masked.text(), "s := '     ';");
    }

    #[test]
    fn multibyte_columns() {
        let masked = mask_line("x := 'ж'; { й } y", 1, None);
        assert_eq!(masked.chars.len(), "x := 'ж'; { й } y".chars().count());
        assert_eq!(masked.text(), "x := ' ';       y");
    }

    #[test]
    fn open_comment_continues() {
        let masked = mask_line("a { one", 3, None);
        let open = Some(OpenLiteral::Comment(Comment::Brace, Position::new(3, 2)));
        assert_eq!(masked.text(), "a      ");
        assert_eq!(masked.open, open);

        let masked = mask_line("two", 4, open);
        assert_eq!(masked.text(), "   ");
        assert_eq!(masked.open, open);

        let masked = mask_line("three } b", 5, open);
        assert_eq!(masked.text(), "        b");
        assert_eq!(masked.open, None);
    }

    #[test]
    fn paren_comment_needs_its_own_terminator() {
        let masked = mask_line("(* a } b", 1, None);
        assert_eq!(
            masked.open,
            Some(OpenLiteral::Comment(Comment::Paren, Position::new(1, 0)))
        );
        let masked = mask_line("c *) d", 2, masked.open);
        assert_eq!(masked.text(), "     d");
    }

    #[test]
    fn open_string_closes_on_next_line() {
        let masked = mask_line("s := 'abc", 1, None);
        let open = Some(OpenLiteral::String(Position::new(1, 5)));
        assert_eq!(masked.text(), "s := '   ");
        assert_eq!(masked.open, open);

        let masked = mask_line("def'; x", 2, open);
        assert_eq!(masked.text(), "   '; x");
        assert_eq!(masked.open, None);
        assert_eq!(masked.unterminated_string, None);
    }

    #[test]
    fn open_string_gives_up_after_one_line() {
        let open = Some(OpenLiteral::String(Position::new(1, 5)));
        let masked = mask_line("no quote here; x = 1", 2, open);
        assert_eq!(masked.unterminated_string, Some(Position::new(1, 5)));
        assert_eq!(masked.open, None);
        assert!(masked.chars.iter().all(|c| *c == ' '));
    }
}

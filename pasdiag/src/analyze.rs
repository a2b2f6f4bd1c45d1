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

//! Line-oriented analysis.
//!
//! The [Analyzer] looks at source one line at a time, independently of the
//! [Scanner](crate::lex::scan::Scanner).  It tracks which declaration
//! section it is in, which names have been declared, and which blocks are
//! open, and it applies a set of pattern rules to each line.  The rules are
//! heuristics: they catch common mistakes in simple programs, not every
//! error in every program.
//!
//! Before any rule looks at a line, comments and the contents of string
//! literals are blanked out with [mask_line], so that rules never match text
//! inside them.

use std::{collections::HashSet, ops::Range};

use log::{debug, trace};
use unicase::UniCase;

use crate::{
    identifier::IdentifierChar,
    message::{DiagnosticSink, ErrorCode, Position},
    settings::Checks,
};

mod literal;

pub use literal::{Comment, Masked, OpenLiteral, mask_line};

/// Names that are reported when they are used without being declared.
const SUSPICIOUS_NAMES: [&str; 5] = ["x", "y", "k", "i", "ch"];

/// The part of the program a line belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
    /// Program header, `type` and `label` sections, and anything else that
    /// is neither a declaration section nor a body.
    Other,

    /// After `const`.
    Const,

    /// After `var`.
    Var,

    /// After `begin`.
    Body,
}

/// Constructs that are closed by `end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Frame {
    Begin,
    Case,
    Record,
}

/// A word in a masked line.
#[derive(Clone, Debug)]
struct Word {
    /// Column of the first character.
    start: usize,

    /// Column just past the last character.
    end: usize,

    /// The word, in lowercase.
    text: String,
}

/// A source line together with its masked form.
struct Line {
    number: usize,

    /// The original characters.
    raw: Vec<char>,

    /// The characters with comments and string contents blanked.  Always
    /// the same length as `raw`.
    masked: Vec<char>,

    /// The words in `masked`, in order.
    words: Vec<Word>,
}

impl Line {
    fn new(number: usize, raw: &str, masked: Vec<char>) -> Self {
        let words = find_words(&masked);
        Self {
            number,
            raw: raw.chars().collect(),
            masked,
            words,
        }
    }

    fn position(&self, column: usize) -> Position {
        Position::new(self.number, column)
    }

    /// Returns the line's first word, if nothing but white space precedes
    /// it.
    fn leading_word(&self) -> Option<&Word> {
        let first = self.masked.iter().position(|c| !c.is_whitespace())?;
        self.words.first().filter(|word| word.start == first)
    }

    fn leading_keyword(&self) -> Option<&str> {
        self.leading_word().map(|word| word.text.as_str())
    }

    /// Returns the column of the first occurrence of `pattern` in the masked
    /// line at or after column `from`.
    fn find(&self, from: usize, pattern: &str) -> Option<usize> {
        let pattern = pattern.chars().collect::<Vec<_>>();
        self.masked
            .get(from..)?
            .windows(pattern.len())
            .position(|window| window == pattern.as_slice())
            .map(|index| index + from)
    }

    fn contains(&self, pattern: &str) -> bool {
        self.find(0, pattern).is_some()
    }

    fn is_blank(&self, columns: Range<usize>) -> bool {
        self.masked[columns].iter().all(|c| c.is_whitespace())
    }

    fn masked_text(&self, columns: Range<usize>) -> String {
        self.masked[columns].iter().collect()
    }

    /// Returns the columns of `columns` with leading and trailing white space
    /// removed, or `None` if they are all white space.
    fn trim(&self, columns: Range<usize>) -> Option<Range<usize>> {
        let start = columns
            .clone()
            .find(|&column| !self.masked[column].is_whitespace())?;
        let end = columns
            .rev()
            .find(|&column| !self.masked[column].is_whitespace())?;
        Some(start..end + 1)
    }

    /// Returns the columns after the leading word if it is `keyword`, and
    /// otherwise the whole line.
    fn after_keyword(&self, keyword: &str) -> Range<usize> {
        match self.leading_word() {
            Some(word) if word.text == keyword => word.end..self.masked.len(),
            _ => 0..self.masked.len(),
        }
    }
}

fn find_words(chars: &[char]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].may_continue_id() {
            let start = i;
            while i < chars.len() && chars[i].may_continue_id() {
                i += 1;
            }
            if chars[start].may_start_id() {
                words.push(Word {
                    start,
                    end: i,
                    text: chars[start..i].iter().collect::<String>().to_lowercase(),
                });
            }
        } else {
            i += 1;
        }
    }
    words
}

/// Returns true if `word` is followed by `:=`, as in `ending := 1`.
fn is_assignment_target(line: &Line, word: &Word) -> bool {
    line.trim(word.end..line.masked.len())
        .is_some_and(|rest| line.masked[rest.start..].starts_with(&[':', '=']))
}

/// Line-at-a-time analyzer.
///
/// Feed every line of a source file to [push_line](Self::push_line) in
/// order, then call [finish](Self::finish).  An `Analyzer` holds state for
/// one file only; use a new one for each file.
pub struct Analyzer {
    checks: Checks,

    /// Number of lines pushed so far.
    line_number: usize,

    open: Option<OpenLiteral>,
    section: Section,

    /// Set from a line that begins with `case` until a line that begins
    /// with `end;` or `end.`.
    in_case: bool,
    case_line: usize,

    frames: Vec<(Frame, Position)>,
    declared_consts: HashSet<UniCase<String>>,
    declared_vars: HashSet<UniCase<String>>,
}

impl Analyzer {
    pub fn new(checks: Checks) -> Self {
        Self {
            checks,
            line_number: 0,
            open: None,
            section: Section::Other,
            in_case: false,
            case_line: 0,
            frames: Vec::new(),
            declared_consts: HashSet::new(),
            declared_vars: HashSet::new(),
        }
    }

    /// Analyzes the next line of input, which should not include a
    /// new-line.
    pub fn push_line(&mut self, line: &str, sink: &mut DiagnosticSink) {
        self.line_number += 1;
        let masked = mask_line(line, self.line_number, self.open.take());
        self.open = masked.open;
        if let Some(start) = masked.unterminated_string {
            sink.record(ErrorCode::UnterminatedString, start);
        }
        let line = Line::new(self.line_number, line, masked.chars);

        self.update_section(&line);
        if self.checks.contains(Checks::BLOCKS) {
            self.check_blocks(&line, sink);
        }
        self.update_case(&line);
        if self.declare(&line) {
            return;
        }

        if self.checks.contains(Checks::CASE_LABELS)
            && self.in_case
            && self.case_line != line.number
        {
            self.check_case_labels(&line, sink);
        }
        if self.checks.contains(Checks::ASSIGNMENT) {
            self.check_assignment(&line, sink);
        }
        if self.checks.contains(Checks::RANGES) {
            check_ranges(&line, sink);
        }
        if self.checks.contains(Checks::UNKNOWN_IDENTIFIERS) {
            self.check_unknown_identifiers(&line, sink);
        }
        if self.checks.contains(Checks::PAIRED_KEYWORDS) {
            check_paired_keywords(&line, sink);
        }
    }

    /// Reports anything still open at end of input.
    pub fn finish(self, sink: &mut DiagnosticSink) {
        if let Some(open) = self.open {
            sink.record(open.error_code(), open.position());
        }
        if !self.checks.contains(Checks::BLOCKS) {
            return;
        }
        if let Some((frame, opened)) = self.frames.last() {
            debug!(
                "{} block(s) still open at end of input, innermost is {frame:?} from {opened}",
                self.frames.len(),
            );
            sink.record(
                ErrorCode::UnterminatedBlock,
                Position::new(self.line_number, 0),
            );
        }
    }

    fn is_declared(&self, name: &str) -> bool {
        let name = UniCase::new(name.to_string());
        self.declared_consts.contains(&name) || self.declared_vars.contains(&name)
    }

    fn update_section(&mut self, line: &Line) {
        let section = match line.leading_keyword() {
            Some("const") => Section::Const,
            Some("var") => Section::Var,
            Some("begin") => Section::Body,
            Some("program" | "type" | "label" | "uses" | "procedure" | "function") => {
                Section::Other
            }
            _ => return,
        };
        if section != self.section {
            debug!("line {}: {:?} section", line.number, section);
            self.section = section;
        }
        if matches!(line.leading_keyword(), Some("procedure" | "function")) {
            self.declare_parameters(line);
        }
    }

    /// Declares the formal parameters in a `procedure` or `function`
    /// heading, e.g. `procedure p(var a, b: integer; c: char);`.
    fn declare_parameters(&mut self, line: &Line) {
        let Some(open) = line.find(0, "(") else {
            return;
        };
        let close = line.find(open, ")").unwrap_or(line.masked.len());
        let parameters = line.masked_text(open + 1..close);
        for group in parameters.split(';') {
            let Some((names, _type)) = group.split_once(':') else {
                continue;
            };
            for name in names.split(',') {
                let name = name.split_whitespace().last().unwrap_or_default();
                if !name.is_empty() {
                    trace!("line {}: parameter {name}", line.number);
                    self.declared_vars.insert(UniCase::new(name.to_string()));
                }
            }
        }
    }

    fn check_blocks(&mut self, line: &Line, sink: &mut DiagnosticSink) {
        if let Some(word) = line.leading_word() {
            if word.text.starts_with("end") && !is_assignment_target(line, word) {
                let terminated = match line.masked.get(word.end) {
                    None => true,
                    Some(c) => matches!(c, ';' | '.') || c.is_whitespace(),
                };
                if word.text != "end" || !terminated {
                    sink.record(ErrorCode::MalformedEnd, line.position(word.start));
                }
            }
        }

        for word in &line.words {
            let frame = match word.text.as_str() {
                "begin" => Frame::Begin,
                "record" => Frame::Record,
                "case" if self.frames.last().map(|(frame, _)| *frame) != Some(Frame::Record) => {
                    Frame::Case
                }
                "end" => {
                    if self.frames.pop().is_none() {
                        sink.record(ErrorCode::UnmatchedEnd, line.position(word.start));
                    }
                    continue;
                }
                _ => continue,
            };
            self.frames.push((frame, line.position(word.start)));
        }
    }

    fn update_case(&mut self, line: &Line) {
        let Some(word) = line.leading_word() else {
            return;
        };
        match word.text.as_str() {
            "case" => {
                self.in_case = true;
                self.case_line = line.number;
            }
            "end" if matches!(line.masked.get(word.end), Some(';' | '.')) => self.in_case = false,
            _ => (),
        }
    }

    /// Adds the names declared on `line` to the declared names, if `line` is
    /// a declaration.  Returns true if it is.
    fn declare(&mut self, line: &Line) -> bool {
        match self.section {
            Section::Const => {
                let columns = line.after_keyword("const");
                let Some(equals) = line.find(columns.start, "=") else {
                    return false;
                };
                if let Some(name) = line.trim(columns.start..equals) {
                    let name = line.masked_text(name);
                    trace!("line {}: constant {name}", line.number);
                    self.declared_consts.insert(UniCase::new(name));
                }
                true
            }
            Section::Var => {
                let columns = line.after_keyword("var");
                let Some(colon) = line.find(columns.start, ":") else {
                    return false;
                };
                for name in line.masked_text(columns.start..colon).split(',') {
                    let name = name.trim();
                    if !name.is_empty() {
                        trace!("line {}: variable {name}", line.number);
                        self.declared_vars.insert(UniCase::new(name.to_string()));
                    }
                }
                true
            }
            Section::Other | Section::Body => false,
        }
    }

    fn check_case_labels(&self, line: &Line, sink: &mut DiagnosticSink) {
        let Some(colon) = (0..line.masked.len())
            .find(|&column| line.masked[column] == ':' && line.masked.get(column + 1) != Some(&'='))
        else {
            return;
        };

        let mut start = 0;
        for end in (0..colon).filter(|&column| line.masked[column] == ',').chain([colon]) {
            if let Some(item) = line.trim(start..end) {
                let label = line.raw[item.clone()].iter().collect::<String>();
                if !self.is_valid_case_label(&label) {
                    sink.record(ErrorCode::InvalidCaseLabel, line.position(item.start));
                }
            }
            start = end + 1;
        }
    }

    fn is_valid_case_label(&self, label: &str) -> bool {
        fn is_char_literal(label: &str) -> bool {
            label == "''''"
                || (label.chars().count() == 3 && label.starts_with('\'') && label.ends_with('\''))
        }

        fn is_integer(label: &str) -> bool {
            let digits = label.strip_prefix(&['+', '-'][..]).unwrap_or(label);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }

        is_char_literal(label)
            || is_integer(label)
            || label.contains("..")
            || self.is_declared(label)
    }

    /// Reports `=` written where `:=` was probably meant.
    fn check_assignment(&self, line: &Line, sink: &mut DiagnosticSink) {
        if line.contains(":=")
            || line.contains("==")
            || line.masked_text(0..line.masked.len()).trim_start().starts_with('=')
        {
            return;
        }

        // `<=` and `>=` are comparisons.
        let Some(equals) = (0..line.masked.len()).find(|&column| {
            line.masked[column] == '='
                && (column == 0 || !matches!(line.masked[column - 1], '<' | '>'))
        }) else {
            return;
        };

        let left = line.masked_text(0..equals);
        if let Some(name) = left.trim_start().strip_suffix(' ') {
            if self
                .declared_consts
                .contains(&UniCase::new(name.to_string()))
            {
                return;
            }
        }
        sink.record(ErrorCode::AssignmentExpected, line.position(equals));
    }

    fn check_unknown_identifiers(&self, line: &Line, sink: &mut DiagnosticSink) {
        for word in &line.words {
            if SUSPICIOUS_NAMES.contains(&word.text.as_str()) && !self.is_declared(&word.text) {
                sink.record(ErrorCode::UnknownIdentifier, line.position(word.start));
            }
        }
    }
}

/// Reports every `...`.
fn check_ranges(line: &Line, sink: &mut DiagnosticSink) {
    let mut from = 0;
    while let Some(column) = line.find(from, "...") {
        sink.record(ErrorCode::InvalidRange, line.position(column));
        from = column + 3;
    }
}

/// Checks a line that begins with `if`, `for`, `while`, or `case` for its
/// paired keyword and for the text around it.
fn check_paired_keywords(line: &Line, sink: &mut DiagnosticSink) {
    let Some(keyword) = line.leading_word() else {
        return;
    };
    let (partner, missing) = match keyword.text.as_str() {
        "if" => ("then", ErrorCode::MissingThen),
        "for" => ("do", ErrorCode::MissingDo),
        "while" => ("do", ErrorCode::MissingDo),
        "case" => ("of", ErrorCode::MissingOf),
        _ => return,
    };
    let Some(partner) = line
        .words
        .iter()
        .find(|word| word.start >= keyword.end && word.text == partner)
    else {
        sink.record(missing, line.position(keyword.end));
        return;
    };

    let header = keyword.end..partner.start;
    let tail = partner.end..line.masked.len();
    if line.is_blank(header.clone()) {
        sink.record(ErrorCode::EmptyCondition, line.position(keyword.end));
        if keyword.text == "for" {
            return;
        }
    } else if keyword.text == "for" && !line.masked_text(header).contains(":=") {
        sink.record(ErrorCode::ForWithoutAssignment, line.position(keyword.end));
    }

    let has_body = if keyword.text == "case" {
        line.find(partner.end, ":").is_some()
    } else {
        !line.is_blank(tail)
    };
    if !has_body {
        sink.record(ErrorCode::EmptyBody, line.position(partner.end));
    }
}

/// Analyzes all of `lines` with a fresh [Analyzer].
pub fn analyze<S>(lines: &[S], checks: Checks, sink: &mut DiagnosticSink)
where
    S: AsRef<str>,
{
    let mut analyzer = Analyzer::new(checks);
    for line in lines {
        analyzer.push_line(line.as_ref(), sink);
    }
    analyzer.finish(sink);
}

#[cfg(test)]
mod tests;

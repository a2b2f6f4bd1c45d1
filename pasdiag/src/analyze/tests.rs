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

use proptest::prelude::*;

use crate::{
    message::{DiagnosticSink, ErrorCode, Position},
    settings::Checks,
};

use super::analyze;

fn run(input: &[&str], checks: Checks) -> Vec<(Position, ErrorCode)> {
    let mut sink = DiagnosticSink::new();
    analyze(input, checks, &mut sink);
    sink.all()
        .map(|diagnostic| (diagnostic.position, diagnostic.code))
        .collect()
}

#[track_caller]
fn check_analyze_with(input: &[&str], checks: Checks, expected: &[((usize, usize), ErrorCode)]) {
    let expected = expected
        .iter()
        .map(|&((line, column), code)| (Position::new(line, column), code))
        .collect::<Vec<_>>();
    let actual = run(input, checks);
    if expected != actual {
        eprintln!("diagnostics differ from expected:");
        for result in diff::slice(&expected, &actual) {
            match result {
                diff::Result::Left(left) => eprintln!("-{left:?}"),
                diff::Result::Both(left, _right) => eprintln!(" {left:?}"),
                diff::Result::Right(right) => eprintln!("+{right:?}"),
            }
        }
        panic!();
    }
}

#[track_caller]
fn check_analyze(input: &[&str], expected: &[((usize, usize), ErrorCode)]) {
    check_analyze_with(input, Checks::default(), expected)
}

#[test]
fn empty_input() {
    check_analyze(&[], &[]);
    check_analyze_with(&[], Checks::all(), &[]);
}

#[test]
fn undeclared_name() {
    check_analyze(&["x := 5;"], &[((1, 0), ErrorCode::UnknownIdentifier)]);
}

#[test]
fn equals_for_assignment() {
    check_analyze_with(
        &["y = 10;"],
        Checks::ASSIGNMENT,
        &[((1, 2), ErrorCode::AssignmentExpected)],
    );
    check_analyze(
        &["y = 10;"],
        &[
            ((1, 0), ErrorCode::UnknownIdentifier),
            ((1, 2), ErrorCode::AssignmentExpected),
        ],
    );
}

#[test]
fn triple_dot_range() {
    check_analyze(
        &["for i := 1 ... 10 do x := i;"],
        &[
            ((1, 4), ErrorCode::UnknownIdentifier),
            ((1, 11), ErrorCode::InvalidRange),
            ((1, 21), ErrorCode::UnknownIdentifier),
            ((1, 26), ErrorCode::UnknownIdentifier),
        ],
    );
    check_analyze_with(
        &["a ...... b"],
        Checks::RANGES,
        &[((1, 2), ErrorCode::InvalidRange), ((1, 5), ErrorCode::InvalidRange)],
    );
}

#[test]
fn unterminated_block() {
    check_analyze(&["begin"], &[((1, 0), ErrorCode::UnterminatedBlock)]);
    check_analyze(
        &["program p;", "begin", "  if a then begin", "  end;", "  writeln;"],
        &[((5, 0), ErrorCode::UnterminatedBlock)],
    );
}

#[test]
fn disabled_checks() {
    check_analyze_with(
        &["for i := 1 ... 10 do x := i;", "y = 1", "end"],
        Checks::empty(),
        &[],
    );
}

#[test]
fn comparisons_and_assignments() {
    check_analyze(&["a := b = c"], &[]);
    check_analyze(&["if a >= b then", "if a <= b then"], &[]);
    check_analyze(&["a == b", "  = b"], &[]);
}

#[test]
fn declared_constant_definition() {
    check_analyze(
        &[
            "const",
            "  pi = 3;",
            "begin",
            "  pi = 4;",
            "  x = pi;",
            "end.",
        ],
        &[
            ((5, 2), ErrorCode::UnknownIdentifier),
            ((5, 4), ErrorCode::AssignmentExpected),
        ],
    );
}

#[test]
fn one_line_declarations() {
    check_analyze(
        &["const k = 3;", "var x, y: integer;", "begin x := k + y end."],
        &[],
    );
}

#[test]
fn declarations_ignore_comments() {
    let with_comment = run(
        &[
            "var",
            "  i {ignored}, k: integer;",
            "begin",
            "  i := k;",
            "end.",
        ],
        Checks::default(),
    );
    let without_comment = run(
        &["var", "  i , k: integer;", "begin", "  i := k;", "end."],
        Checks::default(),
    );
    assert_eq!(with_comment, without_comment);
    assert_eq!(with_comment, Vec::new());
}

#[test]
fn names_are_case_insensitive() {
    check_analyze(
        &[
            "var",
            "  X, Ch: integer;",
            "begin",
            "  x := ch + CH + k;",
            "end.",
        ],
        &[((4, 17), ErrorCode::UnknownIdentifier)],
    );
}

#[test]
fn only_bare_names_are_suspicious() {
    check_analyze(&["  z := x1 + 'x' + i_2; // x", "{ y }"], &[]);
}

#[test]
fn procedure_parameters_are_declared() {
    check_analyze(
        &[
            "procedure p(var i: integer; x, y: char);",
            "begin",
            "  i := x;",
            "end;",
        ],
        &[],
    );
}

#[test]
fn string_continues_onto_next_line() {
    check_analyze(
        &["s := 'abc", "def'; k := 1"],
        &[((2, 6), ErrorCode::UnknownIdentifier)],
    );
}

#[test]
fn unterminated_string() {
    check_analyze(
        &["s := 'abc", "def", "x"],
        &[
            ((1, 5), ErrorCode::UnterminatedString),
            ((3, 0), ErrorCode::UnknownIdentifier),
        ],
    );
    check_analyze(&["s := 'abc"], &[((1, 5), ErrorCode::UnterminatedString)]);
}

#[test]
fn unterminated_comment() {
    check_analyze(
        &["{ start", "x = 1"],
        &[((1, 0), ErrorCode::UnterminatedComment)],
    );
    check_analyze(&["a := b; (* one", "two *) c := d"], &[]);
}

#[test]
fn blocks() {
    check_analyze(
        &[
            "begin",
            "  case c of",
            "    'a': x := 1;",
            "  end;",
            "end.",
            "end;",
        ],
        &[
            ((3, 9), ErrorCode::UnknownIdentifier),
            ((6, 0), ErrorCode::UnmatchedEnd),
        ],
    );
    check_analyze(
        &["begin", "  if a then begin b := c end else begin d := e end", "end."],
        &[],
    );
}

#[test]
fn malformed_end() {
    check_analyze(&["begin", "end)"], &[((2, 0), ErrorCode::MalformedEnd)]);
    check_analyze(&["begin", "  end { done }"], &[]);
    check_analyze(&["begin", "ending := 1"], &[((2, 0), ErrorCode::UnterminatedBlock)]);
    for typo in ["endd;", "end1.", "End_;"] {
        check_analyze(
            &["begin", typo],
            &[
                ((2, 0), ErrorCode::MalformedEnd),
                ((2, 0), ErrorCode::UnterminatedBlock),
            ],
        );
    }
}

#[test]
fn records() {
    check_analyze(
        &[
            "var",
            "  r: record",
            "    a: integer;",
            "    case tag: integer of",
            "      1: (b: char);",
            "  end;",
            "begin",
            "end.",
        ],
        &[],
    );
}

#[test]
fn case_labels() {
    check_analyze(
        &[
            "const",
            "  max = 10;",
            "var",
            "  c: char;",
            "begin",
            "  case c of",
            "    'a', 'b': ;",
            "    1..5, -3: ;",
            "    max: ;",
            "    foo, 'xy': ;",
            "    ',': ;",
            "  end;",
            "  foo: ;",
            "end.",
        ],
        &[
            ((10, 4), ErrorCode::InvalidCaseLabel),
            ((10, 9), ErrorCode::InvalidCaseLabel),
        ],
    );
}

#[test]
fn paired_keywords_are_off_by_default() {
    check_analyze(&["if a > b", "while b"], &[]);
}

#[test]
fn if_then() {
    let checks = Checks::PAIRED_KEYWORDS;
    check_analyze_with(&["if a > b"], checks, &[((1, 2), ErrorCode::MissingThen)]);
    check_analyze_with(&["if then b"], checks, &[((1, 2), ErrorCode::EmptyCondition)]);
    check_analyze_with(&["if a then"], checks, &[((1, 9), ErrorCode::EmptyBody)]);
    check_analyze_with(&["  If a Then b { c }"], checks, &[]);
    check_analyze_with(
        &["if then // b"],
        checks,
        &[
            ((1, 2), ErrorCode::EmptyCondition),
            ((1, 7), ErrorCode::EmptyBody),
        ],
    );
}

#[test]
fn for_do() {
    let checks = Checks::PAIRED_KEYWORDS;
    check_analyze_with(&["for j := 1 to 3 do s;"], checks, &[]);
    check_analyze_with(
        &["for j = 1 to 3 do s;"],
        checks,
        &[((1, 3), ErrorCode::ForWithoutAssignment)],
    );
    check_analyze_with(&["for do s"], checks, &[((1, 3), ErrorCode::EmptyCondition)]);
    check_analyze_with(&["for j := 1 to 3"], checks, &[((1, 3), ErrorCode::MissingDo)]);
    check_analyze_with(&["for j := 1 to 3 do"], checks, &[((1, 18), ErrorCode::EmptyBody)]);
}

#[test]
fn while_do() {
    let checks = Checks::PAIRED_KEYWORDS;
    check_analyze_with(&["while a"], checks, &[((1, 5), ErrorCode::MissingDo)]);
    check_analyze_with(&["while done"], checks, &[((1, 5), ErrorCode::MissingDo)]);
    check_analyze_with(&["while a do"], checks, &[((1, 10), ErrorCode::EmptyBody)]);
    check_analyze_with(&["while do s"], checks, &[((1, 5), ErrorCode::EmptyCondition)]);
}

#[test]
fn case_of() {
    let checks = Checks::PAIRED_KEYWORDS;
    check_analyze_with(&["case a"], checks, &[((1, 4), ErrorCode::MissingOf)]);
    check_analyze_with(&["case of 1: ;"], checks, &[((1, 4), ErrorCode::EmptyCondition)]);
    check_analyze_with(&["case a of"], checks, &[((1, 9), ErrorCode::EmptyBody)]);
    check_analyze_with(&["case a of 1: b"], checks, &[]);
}

#[test]
fn fresh_runs_agree() {
    let input = [
        "program p;",
        "var n: integer;",
        "begin",
        "  n = 1;",
        "  for i := 1 ... n do",
        "    case n of",
        "      z: x := 'ab';",
        "    end;",
        "  { open",
    ];
    assert_eq!(run(&input, Checks::all()), run(&input, Checks::all()));
}

proptest! {
    #[test]
    fn deterministic(input in proptest::collection::vec("\\PC{0,24}", 0..10)) {
        let input = input.iter().map(String::as_str).collect::<Vec<_>>();
        prop_assert_eq!(run(&input, Checks::all()), run(&input, Checks::all()));
    }

    #[test]
    fn no_assignment_diagnostic_next_to_assignment(
        input in proptest::collection::vec("[a-z0-9 :=.;,<>]{0,24}", 0..10)
    ) {
        let input = input.iter().map(String::as_str).collect::<Vec<_>>();
        for (position, code) in run(&input, Checks::all()) {
            if code == ErrorCode::AssignmentExpected {
                prop_assert!(!input[position.line - 1].contains(":="));
            }
        }
    }
}

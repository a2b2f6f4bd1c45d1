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

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::{
    prelude::PredicateBooleanExt,
    str::{contains, starts_with},
};
use tempfile::TempDir;

const CLEAN: &str = "program p;\nvar k: integer;\nbegin\n  k := 1\nend.\n";
const BROKEN: &str = "begin\n  x = 1\n";

fn pasdiag() -> Command {
    Command::cargo_bin("pasdiag").unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn clean_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "clean.pas", CLEAN);
    pasdiag()
        .arg("check")
        .arg(dir.path().join("clean.pas"))
        .assert()
        .success()
        .stdout(contains("   4:   k := 1").and(contains("Found 0 error(s)")));
}

#[test]
fn broken_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.pas", BROKEN);
    pasdiag()
        .arg("check")
        .arg(dir.path().join("broken.pas"))
        .assert()
        .code(1)
        .stdout(
            contains("        ^ Unknown identifier `x`.")
                .and(contains("          ^ Use `:=` instead of `=` for assignment."))
                .and(contains("Found 3 error(s) (1 structural, 2 heuristic)")),
        );
}

#[test]
fn directories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.pas", CLEAN);
    write(dir.path(), "notes.txt", BROKEN);
    write(dir.path(), "sub/b.PAS", BROKEN);

    pasdiag()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("a.pas").and(contains("b.PAS").not()));

    pasdiag()
        .args(["check", "--recursive"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(contains("a.pas").and(contains("b.PAS")));
}

#[test]
fn json() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.pas", BROKEN);
    let output = pasdiag()
        .args(["check", "--format", "json", "--tokens"])
        .arg(dir.path().join("broken.pas"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["errors"], 3);
    assert_eq!(summary["counts"]["structural"], 1);
    assert_eq!(summary["diagnostics"][0]["code"], 205);
    assert_eq!(summary["diagnostics"][1]["message"], "Unknown identifier `x`.");
    assert_eq!(summary["tokens"]["1"], serde_json::json!([113]));
}

#[test]
fn unreadable_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "clean.pas", CLEAN);
    pasdiag()
        .arg("check")
        .arg(dir.path().join("missing.pas"))
        .arg(dir.path().join("clean.pas"))
        .assert()
        .success()
        .stderr(contains("missing.pas"))
        .stdout(contains("clean.pas"));
}

#[test]
fn config_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "if.pas", "if a > b\n");
    write(dir.path(), "pasdiag.toml", "paired-keywords = true\n");

    pasdiag()
        .arg("check")
        .arg(dir.path().join("if.pas"))
        .assert()
        .success();

    pasdiag()
        .arg("check")
        .arg("--config")
        .arg(dir.path().join("pasdiag.toml"))
        .arg(dir.path().join("if.pas"))
        .assert()
        .code(1)
        .stdout(contains("Missing `then` after `if` condition."));

    write(dir.path(), "bad.toml", "colour = true\n");
    pasdiag()
        .arg("check")
        .arg("--config")
        .arg(dir.path().join("bad.toml"))
        .arg(dir.path().join("if.pas"))
        .assert()
        .failure()
        .stderr(contains("bad.toml"));
}

#[test]
fn tokens() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "t.pas", "begin end.\n  x @\n");
    pasdiag()
        .arg("tokens")
        .arg(dir.path().join("t.pas"))
        .assert()
        .success()
        .stdout("   1: 113 104 61\n   2: 2 0\n   3: 0\n")
        .stderr(starts_with("2.4: error 100: "));

    pasdiag()
        .args(["tokens", "--dialect", "standard", "--verbose"])
        .arg(dir.path().join("t.pas"))
        .assert()
        .success()
        .stdout(starts_with("1.0: 113 `begin`\n"));
}

#[test]
fn unknown_encoding() {
    pasdiag()
        .args(["check", "--encoding", "no-such-encoding", "x.pas"])
        .assert()
        .failure()
        .stderr(contains("unknown encoding"));
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Runs the `ecma` binary against the fixtures in `tests/fixtures`.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path.to_str().expect("utf8 path").to_string()
}

fn ecma(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ecma"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute ecma binary")
}

#[test]
fn fmt_prints_house_style() {
    let out = ecma(&["fmt", &fixture("messy.js")]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "if (x) {\n  x;\n}\nvar a = 1, b;\n");
}

#[test]
fn fmt_respects_indent_width() {
    let out = ecma(&["fmt", &fixture("messy.js"), "--indent", "4"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("if (x) {\n    x;\n}"));
}

#[test]
fn fmt_check_reports_status() {
    let clean = ecma(&["fmt", &fixture("clean.js"), "--check"]);
    assert!(clean.status.success());

    let messy = ecma(&["fmt", "--check", &fixture("messy.js")]);
    assert_eq!(messy.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&messy.stdout).contains("would reformat"));
}

#[test]
fn compact_prints_one_line() {
    let out = ecma(&["compact", &fixture("clean.js")]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "if (x) {x;}var a=1,b;\n");
}

#[test]
fn parse_prints_json_tree() {
    let out = ecma(&["parse", &fixture("clean.js")]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"Program\""));
    assert!(stdout.contains("\"VarStatement\""));
}

#[test]
fn lex_lists_tokens() {
    let out = ecma(&["lex", &fixture("clean.js")]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Lex OK"));
}

#[test]
fn syntax_error_shows_location_and_hint() {
    let out = ecma(&["fmt", &fixture("broken.js")]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken.js:2:3"));
    assert!(stderr.contains("hint:"));
    assert!(stderr.contains("Parse FAILED: 1 error"));
}

#[test]
fn unknown_command_fails() {
    let out = ecma(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
}

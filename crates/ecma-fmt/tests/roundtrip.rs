// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Render every fixture and parse the output again: the tree must come back
//! unchanged, for both the house style and the compact renderer.

use std::path::{Path, PathBuf};

use ecma_ast::Node;
use ecma_fmt::{format_source, render, render_compact};

fn fixtures() -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .expect("fixtures directory not found")
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "js").unwrap_or(false))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures in {}", dir.display());
    paths
}

fn parse(src: &str, origin: &str) -> Node {
    let result = ecma_parser::parse_source(src);
    assert!(result.is_ok(), "Parse errors in {}: {:?}\n{}", origin, result.errors, src);
    result.program
}

#[test]
fn printer_round_trips_fixtures() {
    for path in fixtures() {
        let src = std::fs::read_to_string(&path).unwrap();
        let tree = parse(&src, &path.display().to_string());
        let out = render(&tree).unwrap();
        let again = parse(&out, &format!("rendered {}", path.display()));
        assert_eq!(tree, again, "round trip changed the tree of {}\n{}", path.display(), out);
    }
}

#[test]
fn compact_round_trips_fixtures() {
    for path in fixtures() {
        let src = std::fs::read_to_string(&path).unwrap();
        let tree = parse(&src, &path.display().to_string());
        let out = render_compact(&tree).unwrap();
        assert!(!out.contains('\n'), "compact output of {} spans lines", path.display());
        let again = parse(&out, &format!("compacted {}", path.display()));
        assert_eq!(tree, again, "compact round trip changed the tree of {}\n{}", path.display(), out);
    }
}

#[test]
fn formatting_is_idempotent() {
    for path in fixtures() {
        let src = std::fs::read_to_string(&path).unwrap();
        let once = format_source(&src).unwrap();
        let twice = format_source(&once).unwrap();
        assert_eq!(once, twice, "formatting {} twice differs", path.display());
    }
}

#[test]
fn block_lines_share_indentation() {
    let src = std::fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/statements.js")).unwrap();
    let out = format_source(&src).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    let open = lines.iter().position(|l| l.starts_with("outer: while")).unwrap();
    // The inner loop and its closing brace sit one level in.
    assert!(lines[open + 1].starts_with("  inner: for"));
    assert!(lines[open + 2].starts_with("    if (i) continue outer;"));
    assert!(lines[open + 3].starts_with("    break inner;"));
    assert_eq!(lines[open + 4], "  }");
    assert_eq!(lines[open + 5], "}");
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal styling for diagnostics, banners and help.
//!
//! Respects NO_COLOR and FORCE_COLOR. Colors are off when output is piped.

use colored::{ColoredString, Colorize};
use ecma_ast::LineMap;

/// Initialize color support based on environment.
/// Call once at startup.
pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

/// Source excerpt with a caret under `offset`, then the hint if any.
///
/// ```text
/// error: Expected ';' after statement, found a name
///   --> input.js:3:5
///    |
///  3 | a b
///    |   ^
///    = hint: two statements on one line need a ';' between them
/// ```
pub fn diagnostic(path: &str, source: &str, lines: &LineMap, offset: usize, message: &str, hint: Option<&str>) -> String {
    let (line, col) = lines.line_col(offset);
    let text = lines.line_text(source, line).unwrap_or("");
    let gutter = " ".repeat(3);
    let mut out = format!("{}: {}\n", error_label(), message.bold());
    out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), path, line, col));
    out.push_str(&format!("{} {}\n", gutter, "|".blue()));
    out.push_str(&format!("{} {} {}\n", format!("{:3}", line).blue().bold(), "|".blue(), text));
    out.push_str(&format!(
        "{} {} {}{}",
        gutter,
        "|".blue(),
        " ".repeat(col.saturating_sub(1)),
        "^".red().bold()
    ));
    if let Some(hint) = hint {
        out.push_str(&format!("\n{} {} {}: {}", gutter, "=".cyan(), "hint".cyan(), hint.dimmed()));
    }
    out
}

pub fn banner_ok(phase: &str) -> String {
    format!("{} {} {}", "===".dimmed(), format!("{} OK", phase).green().bold(), "===".dimmed())
}

pub fn banner_fail(phase: &str, count: usize) -> String {
    let msg = if count == 1 {
        format!("{} FAILED: 1 error", phase)
    } else {
        format!("{} FAILED: {} errors", phase, count)
    };
    format!("{} {} {}", "===".dimmed(), msg.red().bold(), "===".dimmed())
}

/// `✓ path` or `✗ path (would reformat)` for `fmt --check`.
pub fn check_status(path: &str, formatted: bool) -> String {
    if formatted {
        format!("{} {}", "✓".green(), path.underline())
    } else {
        format!("{} {} (would reformat)", "✗".red(), path.underline())
    }
}

pub fn title(name: &str, version: &str) -> String {
    format!("{} {}", name.bold(), version.dimmed())
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

/// One help line: command, its arguments, description.
pub fn usage_line(command: &str, args: &str, description: &str) -> String {
    let width = command.len() + 1 + args.len();
    let pad = " ".repeat(28usize.saturating_sub(width).max(1));
    format!("  {} {}{}{}", command.green(), args.cyan(), pad, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_points_at_column() {
        colored::control::set_override(false);
        let src = "var a;\na b\n";
        let lines = LineMap::new(src);
        let out = diagnostic("t.js", src, &lines, 9, "Expected ';'", Some("add one"));
        assert!(out.contains("--> t.js:2:3"));
        assert!(out.contains("  2 | a b"));
        assert!(out.contains("    |   ^"));
        assert!(out.ends_with("= hint: add one"));
    }
}

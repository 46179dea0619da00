// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Turns ECMAScript syntax trees back into source text.
//!
//! [`Printer`] renders in the house style; [`Compact`] strips layout. Both
//! are implementations of [`Rules`], which alternate renderers implement
//! too, overriding only the rules they change.

mod compact;
mod config;
mod error;
mod indent;
mod printer;
mod rules;

pub use compact::Compact;
pub use config::FormatConfig;
pub use error::{FormatError, RenderError};
pub use indent::Indent;
pub use printer::Printer;
pub use rules::{RenderResult, Rules};

use ecma_ast::Node;

/// Render a tree with the default configuration.
pub fn render(node: &Node) -> Result<String, RenderError> {
    render_with_config(node, &FormatConfig::default())
}

pub fn render_with_config(node: &Node, config: &FormatConfig) -> Result<String, RenderError> {
    Printer::new(config).render(node)
}

/// Render a tree on a single line.
pub fn render_compact(node: &Node) -> Result<String, RenderError> {
    Compact::new().render(node)
}

/// Parse and re-render source with default configuration.
/// The result ends with a newline unless it is empty.
pub fn format_source(source: &str) -> Result<String, FormatError> {
    format_source_with_config(source, &FormatConfig::default())
}

pub fn format_source_with_config(source: &str, config: &FormatConfig) -> Result<String, FormatError> {
    let program = parse(source)?;
    let mut out = render_with_config(&program, config)?;
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

/// Parse and re-render source on a single line.
pub fn compact_source(source: &str) -> Result<String, FormatError> {
    let program = parse(source)?;
    Ok(render_compact(&program)?)
}

fn parse(source: &str) -> Result<Node, FormatError> {
    let result = ecma_parser::parse_source(source);
    if !result.is_ok() {
        return Err(FormatError::Syntax(result.errors));
    }
    Ok(result.program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_normalizes_layout() {
        let out = format_source("if(x){x}").unwrap();
        assert_eq!(out, "if (x) {\n  x;\n}\n");
    }

    #[test]
    fn format_is_stable() {
        let src = "var a=1,b;\nfor(var i=0;i<a;i++){switch(i){case 0:b=i;break;default:continue}}\n";
        let once = format_source(src).unwrap();
        let twice = format_source(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_source() {
        assert_eq!(format_source("").unwrap(), "");
        assert_eq!(format_source("  // nothing\n").unwrap(), "");
    }

    #[test]
    fn syntax_errors_are_returned() {
        match format_source("var = ;") {
            Err(FormatError::Syntax(errors)) => assert!(!errors.is_empty()),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn compact_source_single_line() {
        let out = compact_source("function f(a) {\n  return a + 1;\n}\nf(2);").unwrap();
        assert_eq!(out, "function f(a) {return a + 1;}f(2);");
    }

    #[test]
    fn custom_indent_width() {
        let config = FormatConfig { indent_width: 4 };
        let out = format_source_with_config("while (a) { b(); }", &config).unwrap();
        assert_eq!(out, "while (a) {\n    b();\n}\n");
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use ecma_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Terminators
        ("';'", TokenKind::Ident(_)) => Some("two statements on one line need a ';' between them"),
        ("';'", _) => Some("end the statement with ';'"),

        // Blocks
        ("'{'", _) => Some("blocks start with '{'"),
        ("'}'", _) => Some("every '{' needs a matching '}'"),

        // Parentheses
        ("'('", _) => Some("conditions and parameter lists are wrapped in '(' ')'"),
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", _) => None,

        // Brackets
        ("']'", TokenKind::Eof) => Some("add ']' to close the bracket"),
        ("']'", _) => None,

        ("':'", _) => Some("labels, cases and object properties are followed by ':'"),

        // Expressions
        ("expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("expression", TokenKind::RParen) => Some("empty parentheses are only allowed in calls"),
        ("expression", TokenKind::Comma) => Some("array holes are not supported"),
        ("expression", _) => Some("try a value, variable, or function call"),

        // Names
        ("a name", TokenKind::Number(_)) => Some("names can't start with a number"),
        ("a name", _) if found.display_name().starts_with('\'') => {
            Some("reserved words can't be used as names")
        }
        ("a name", _) => Some("names start with a letter, '_' or '$'"),
        ("a property name", _) => Some("property names are names, strings or numbers"),

        ("'case' or 'default'", _) => Some("switch bodies contain only case and default clauses"),

        _ => None,
    }
}

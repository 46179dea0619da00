// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use ecma_ast::token::{Token, TokenKind};
use ecma_ast::Span;
use logos::Logos;
use thiserror::Error;

/// Raw token type for logos - literal text is attached in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f\x0B\u{00A0}\u{FEFF}\u{2028}\u{2029}]+")]
enum RawToken {
    // === Keywords ===
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("continue")]
    Continue,
    #[token("debugger")]
    Debugger,
    #[token("default")]
    Default,
    #[token("delete")]
    Delete,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("finally")]
    Finally,
    #[token("for")]
    For,
    #[token("function")]
    Function,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("instanceof")]
    Instanceof,
    #[token("new")]
    New,
    #[token("return")]
    Return,
    #[token("switch")]
    Switch,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("try")]
    Try,
    #[token("typeof")]
    Typeof,
    #[token("var")]
    Var,
    #[token("void")]
    Void,
    #[token("while")]
    While,
    #[token("with")]
    With,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // === Operators (longest match wins) ===
    #[token(">>>=")]
    GtGtGtEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token(">>>")]
    GtGtGt,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,

    // === Delimiters ===
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    // === Comments (skipped) ===
    #[regex(r"//[^\n\r]*", logos::skip)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    BlockComment,

    // === Literals ===
    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexNumber,
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\\n\r]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\\n\r]|\\(.|\n))*'"#)]
    String,

    // === Identifier (keywords above take priority) ===
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for ECMAScript source code.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self { source, errors: Vec::new() }
    }

    /// Tokenize the entire source, collecting multiple errors.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens: Vec<Token> = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);
        let mut prev_end = 0;

        while let Some(result) = logos_lexer.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let span = logos_lexer.span();
            let newline_before = has_line_break(&self.source[prev_end..span.start]);

            let kind = match result {
                Ok(RawToken::Slash | RawToken::SlashEq) if regex_allowed(tokens.last()) => {
                    match scan_regex(&self.source[span.start + 1..]) {
                        Some(len) => {
                            let end = span.start + 1 + len;
                            logos_lexer.bump(end - span.end);
                            TokenKind::Regex(self.source[span.start..end].to_string())
                        }
                        None => {
                            self.errors.push(LexError::unterminated_regex(span.start, span.end));
                            prev_end = span.end;
                            continue;
                        }
                    }
                }
                Ok(raw) => convert_token(raw, logos_lexer.slice()),
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    prev_end = span.end;
                    continue;
                }
            };

            let end = logos_lexer.span().end;
            tokens.push(Token {
                kind,
                span: Span::new(span.start, end),
                newline_before,
            });
            prev_end = end;
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.source.len(), self.source.len()),
            newline_before: has_line_break(&self.source[prev_end.min(self.source.len())..]),
        });

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to our TokenKind, keeping literal text.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        // Keywords
        RawToken::Break => TokenKind::Break,
        RawToken::Case => TokenKind::Case,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Debugger => TokenKind::Debugger,
        RawToken::Default => TokenKind::Default,
        RawToken::Delete => TokenKind::Delete,
        RawToken::Do => TokenKind::Do,
        RawToken::Else => TokenKind::Else,
        RawToken::Finally => TokenKind::Finally,
        RawToken::For => TokenKind::For,
        RawToken::Function => TokenKind::Function,
        RawToken::If => TokenKind::If,
        RawToken::In => TokenKind::In,
        RawToken::Instanceof => TokenKind::Instanceof,
        RawToken::New => TokenKind::New,
        RawToken::Return => TokenKind::Return,
        RawToken::Switch => TokenKind::Switch,
        RawToken::This => TokenKind::This,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Try => TokenKind::Try,
        RawToken::Typeof => TokenKind::Typeof,
        RawToken::Var => TokenKind::Var,
        RawToken::Void => TokenKind::Void,
        RawToken::While => TokenKind::While,
        RawToken::With => TokenKind::With,
        RawToken::True => TokenKind::Bool(true),
        RawToken::False => TokenKind::Bool(false),
        RawToken::Null => TokenKind::Null,

        // Operators
        RawToken::GtGtGtEq => TokenKind::GtGtGtEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::BangEqEq => TokenKind::BangEqEq,
        RawToken::GtGtGt => TokenKind::GtGtGt,
        RawToken::LtLtEq => TokenKind::LtLtEq,
        RawToken::GtGtEq => TokenKind::GtGtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::LtLt => TokenKind::LtLt,
        RawToken::GtGt => TokenKind::GtGt,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Question => TokenKind::Question,
        RawToken::Dot => TokenKind::Dot,

        // Delimiters
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,

        // Literals
        RawToken::HexNumber | RawToken::Number => TokenKind::Number(slice.to_string()),
        RawToken::String => TokenKind::String(slice.to_string()),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // These are skipped by logos, but we list them for completeness
        RawToken::LineComment | RawToken::BlockComment => {
            unreachable!("comments are skipped")
        }
    }
}

fn has_line_break(gap: &str) -> bool {
    gap.contains(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
}

fn regex_allowed(prev: Option<&Token>) -> bool {
    prev.map_or(true, |t| t.kind.allows_regex_after())
}

/// Length of a regex literal body, closing slash and flags, starting just
/// after the opening slash. `None` if the literal is unterminated.
fn scan_regex(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '\n' | '\r')) | None => return None,
                Some(_) => {}
            },
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let body_end = i + 1;
                let flags: usize = rest[body_end..]
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
                    .map(char::len_utf8)
                    .sum();
                return Some(body_end + flags);
            }
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
            _ => {}
        }
    }

    None
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("Unexpected character '{}'", ch),
            hint: match ch {
                '"' | '\'' => Some("string literals must close on the same line".to_string()),
                '#' | '@' => Some("this character is not part of the language".to_string()),
                _ => None,
            },
        }
    }

    fn unterminated_regex(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "Unterminated regular expression".to_string(),
            hint: Some("close the pattern with '/' before the end of the line".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let result = Lexer::new(src).tokenize();
        assert!(result.is_ok(), "Lex errors: {:?}", result.errors);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn var_statement() {
        assert_eq!(
            kinds("var a = 1;"),
            vec![
                TokenKind::Var,
                TokenKind::Ident("a".into()),
                TokenKind::Eq,
                TokenKind::Number("1".into()),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        assert_eq!(
            kinds("variable instanceof_ $do"),
            vec![
                TokenKind::Ident("variable".into()),
                TokenKind::Ident("instanceof_".into()),
                TokenKind::Ident("$do".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn literals_keep_source_text() {
        assert_eq!(
            kinds(r#"'it\'s' "a\"b" 0xFF 1.5e3 .5"#),
            vec![
                TokenKind::String(r"'it\'s'".into()),
                TokenKind::String(r#""a\"b""#.into()),
                TokenKind::Number("0xFF".into()),
                TokenKind::Number("1.5e3".into()),
                TokenKind::Number(".5".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(
            kinds("a >>>= b !== c"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::GtGtGtEq,
                TokenKind::Ident("b".into()),
                TokenKind::BangEqEq,
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn regex_versus_division() {
        assert_eq!(
            kinds("x = a / b / c;"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Ident("a".into()),
                TokenKind::Slash,
                TokenKind::Ident("b".into()),
                TokenKind::Slash,
                TokenKind::Ident("c".into()),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds(r"x = /[/]\d+/gi;"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Regex(r"/[/]\d+/gi".into()),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn regex_starting_with_equals() {
        assert_eq!(
            kinds("f(/=/)"),
            vec![
                TokenKind::Ident("f".into()),
                TokenKind::LParen,
                TokenKind::Regex("/=/".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a /* b */ // c\nd"),
            vec![TokenKind::Ident("a".into()), TokenKind::Ident("d".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn newline_before_is_recorded() {
        let result = Lexer::new("a\nb /* x\n */ c d").tokenize();
        let flags: Vec<bool> = result.tokens.iter().map(|t| t.newline_before).collect();
        assert_eq!(flags, vec![false, true, true, false, false]);
    }

    #[test]
    fn unexpected_character_is_collected() {
        let result = Lexer::new("a # b").tokenize();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].span, Span::new(2, 3));
        assert!(result.errors[0].hint.is_some());
        // Lexing continues past the error
        assert_eq!(result.tokens.len(), 3);
    }

    #[test]
    fn unterminated_regex_is_an_error() {
        let result = Lexer::new("x = /abc\n;").tokenize();
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].message, "Unterminated regular expression");
    }
}

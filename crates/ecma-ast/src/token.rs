// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator (or a comment containing one) precedes this token.
    pub newline_before: bool,
}

/// The kind of token.
///
/// Literal payloads keep the exact source text, quotes and escapes included.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(String),
    String(String),
    Regex(String),
    Bool(bool),
    Null,

    // Identifier
    Ident(String),

    // Keywords
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    In,
    Instanceof,
    New,
    Return,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // Operators
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    PlusPlus,     // ++
    MinusMinus,   // --
    Eq,           // =
    EqEq,         // ==
    EqEqEq,       // ===
    BangEq,       // !=
    BangEqEq,     // !==
    Lt,           // <
    Gt,           // >
    LtEq,         // <=
    GtEq,         // >=
    LtLt,         // <<
    GtGt,         // >>
    GtGtGt,       // >>>
    Amp,          // &
    Pipe,         // |
    Caret,        // ^
    Tilde,        // ~
    Bang,         // !
    AmpAmp,       // &&
    PipePipe,     // ||
    Question,     // ?
    PlusEq,       // +=
    MinusEq,      // -=
    StarEq,       // *=
    SlashEq,      // /=
    PercentEq,    // %=
    LtLtEq,       // <<=
    GtGtEq,       // >>=
    GtGtGtEq,     // >>>=
    AmpEq,        // &=
    PipeEq,       // |=
    CaretEq,      // ^=
    Dot,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Semi,
    Comma,

    // Special
    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            // Literals
            TokenKind::Number(_) => "a number",
            TokenKind::String(_) => "a string",
            TokenKind::Regex(_) => "a regular expression",
            TokenKind::Bool(_) => "'true' or 'false'",
            TokenKind::Null => "'null'",

            TokenKind::Ident(_) => "a name",

            // Keywords
            TokenKind::Break => "'break'",
            TokenKind::Case => "'case'",
            TokenKind::Catch => "'catch'",
            TokenKind::Continue => "'continue'",
            TokenKind::Debugger => "'debugger'",
            TokenKind::Default => "'default'",
            TokenKind::Delete => "'delete'",
            TokenKind::Do => "'do'",
            TokenKind::Else => "'else'",
            TokenKind::Finally => "'finally'",
            TokenKind::For => "'for'",
            TokenKind::Function => "'function'",
            TokenKind::If => "'if'",
            TokenKind::In => "'in'",
            TokenKind::Instanceof => "'instanceof'",
            TokenKind::New => "'new'",
            TokenKind::Return => "'return'",
            TokenKind::Switch => "'switch'",
            TokenKind::This => "'this'",
            TokenKind::Throw => "'throw'",
            TokenKind::Try => "'try'",
            TokenKind::Typeof => "'typeof'",
            TokenKind::Var => "'var'",
            TokenKind::Void => "'void'",
            TokenKind::While => "'while'",
            TokenKind::With => "'with'",

            // Operators
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::EqEqEq => "'==='",
            TokenKind::BangEq => "'!='",
            TokenKind::BangEqEq => "'!=='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtGt => "'>>'",
            TokenKind::GtGtGt => "'>>>'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::Bang => "'!'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Question => "'?'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::LtLtEq => "'<<='",
            TokenKind::GtGtEq => "'>>='",
            TokenKind::GtGtGtEq => "'>>>='",
            TokenKind::AmpEq => "'&='",
            TokenKind::PipeEq => "'|='",
            TokenKind::CaretEq => "'^='",
            TokenKind::Dot => "'.'",

            // Delimiters
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",

            TokenKind::Eof => "end of file",
        }
    }

    /// Whether a `/` after this token starts a regular expression rather
    /// than a division.
    pub fn allows_regex_after(&self) -> bool {
        !matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::Regex(_)
                | TokenKind::Bool(_)
                | TokenKind::Null
                | TokenKind::Ident(_)
                | TokenKind::This
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree nodes.
//!
//! One variant per syntactic construct. Children are owned; a node never has
//! two parents. Literal payloads (`Identifier`, `Number`, `String`, `Regex`)
//! hold final source text and are emitted verbatim by the renderers.

use crate::ops::{AssignOp, BinOp, UnaryOp};

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Top-level statement list
    Program(Vec<Node>),
    /// `{ ... }` statement list
    Block(Vec<Node>),
    /// `var` with one or more `VarDecl`s
    VarStatement(Vec<Node>),
    /// One declarator; `identifier` is an `Identifier`
    VarDecl {
        identifier: Box<Node>,
        initializer: Option<Box<Node>>,
    },
    Identifier(String),
    Assign {
        op: AssignOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Number(String),
    /// Binary comma; longer chains nest
    Comma {
        left: Box<Node>,
        right: Box<Node>,
    },
    EmptyStatement,
    If {
        predicate: Option<Box<Node>>,
        consequent: Box<Node>,
        alternative: Option<Box<Node>>,
    },
    Boolean(bool),
    /// `init` is a `VarStatement` or an expression
    For {
        init: Option<Box<Node>>,
        cond: Option<Box<Node>>,
        count: Option<Box<Node>>,
        body: Box<Node>,
    },
    /// `item` is a `VarDecl` or a left-hand-side expression
    ForIn {
        item: Box<Node>,
        iterable: Box<Node>,
        body: Box<Node>,
    },
    BinOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: UnaryOp,
        value: Box<Node>,
        postfix: bool,
    },
    ExprStatement(Box<Node>),
    DoWhile {
        body: Box<Node>,
        predicate: Box<Node>,
    },
    While {
        predicate: Box<Node>,
        body: Box<Node>,
    },
    Null,
    String(String),
    /// Optional label `Identifier`
    Continue(Option<Box<Node>>),
    /// Optional label `Identifier`
    Break(Option<Box<Node>>),
    Return(Option<Box<Node>>),
    With {
        expr: Box<Node>,
        body: Box<Node>,
    },
    Label {
        identifier: Box<Node>,
        statement: Box<Node>,
    },
    /// `cases` holds `Case` and at most one `Default`, in source order
    Switch {
        expr: Box<Node>,
        cases: Vec<Node>,
    },
    Case {
        expr: Box<Node>,
        elements: Vec<Node>,
    },
    Default(Vec<Node>),
    Throw(Box<Node>),
    Debugger,
    /// `statements` is a `Block`; `catch` a `Catch`; `fin` a `Finally`
    Try {
        statements: Box<Node>,
        catch: Option<Box<Node>>,
        fin: Option<Box<Node>>,
    },
    Catch {
        identifier: Box<Node>,
        elements: Box<Node>,
    },
    Finally(Box<Node>),

    FuncDecl {
        identifier: Box<Node>,
        parameters: Vec<Node>,
        elements: Vec<Node>,
    },
    FuncExpr {
        identifier: Option<Box<Node>>,
        parameters: Vec<Node>,
        elements: Vec<Node>,
    },
    Call {
        target: Box<Node>,
        args: Vec<Node>,
    },
    NewExpr {
        target: Box<Node>,
        args: Vec<Node>,
    },
    DotAccessor {
        node: Box<Node>,
        identifier: Box<Node>,
    },
    BracketAccessor {
        node: Box<Node>,
        expr: Box<Node>,
    },
    Array(Vec<Node>),
    /// Properties are `PropAssign`s
    Object(Vec<Node>),
    PropAssign {
        prop: Box<Node>,
        value: Box<Node>,
    },
    Conditional {
        predicate: Box<Node>,
        consequent: Box<Node>,
        alternative: Box<Node>,
    },
    This,
    Regex(String),
    /// Source-level parentheses
    Paren(Box<Node>),

    /// A construct from a grammar extension that has no formatting rule yet.
    Extension {
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn ident(name: impl Into<String>) -> Node {
        Node::Identifier(name.into())
    }

    pub fn number(text: impl Into<String>) -> Node {
        Node::Number(text.into())
    }

    /// The kind tag, e.g. `"If"` or `"BinOp"`.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Program(_) => "Program",
            Node::Block(_) => "Block",
            Node::VarStatement(_) => "VarStatement",
            Node::VarDecl { .. } => "VarDecl",
            Node::Identifier(_) => "Identifier",
            Node::Assign { .. } => "Assign",
            Node::Number(_) => "Number",
            Node::Comma { .. } => "Comma",
            Node::EmptyStatement => "EmptyStatement",
            Node::If { .. } => "If",
            Node::Boolean(_) => "Boolean",
            Node::For { .. } => "For",
            Node::ForIn { .. } => "ForIn",
            Node::BinOp { .. } => "BinOp",
            Node::UnaryOp { .. } => "UnaryOp",
            Node::ExprStatement(_) => "ExprStatement",
            Node::DoWhile { .. } => "DoWhile",
            Node::While { .. } => "While",
            Node::Null => "Null",
            Node::String(_) => "String",
            Node::Continue(_) => "Continue",
            Node::Break(_) => "Break",
            Node::Return(_) => "Return",
            Node::With { .. } => "With",
            Node::Label { .. } => "Label",
            Node::Switch { .. } => "Switch",
            Node::Case { .. } => "Case",
            Node::Default(_) => "Default",
            Node::Throw(_) => "Throw",
            Node::Debugger => "Debugger",
            Node::Try { .. } => "Try",
            Node::Catch { .. } => "Catch",
            Node::Finally(_) => "Finally",
            Node::FuncDecl { .. } => "FuncDecl",
            Node::FuncExpr { .. } => "FuncExpr",
            Node::Call { .. } => "Call",
            Node::NewExpr { .. } => "NewExpr",
            Node::DotAccessor { .. } => "DotAccessor",
            Node::BracketAccessor { .. } => "BracketAccessor",
            Node::Array(_) => "Array",
            Node::Object(_) => "Object",
            Node::PropAssign { .. } => "PropAssign",
            Node::Conditional { .. } => "Conditional",
            Node::This => "This",
            Node::Regex(_) => "Regex",
            Node::Paren(_) => "Paren",
            Node::Extension { kind, .. } => kind,
        }
    }

    /// The name if this is an `Identifier`.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Node::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this node may stand where an assignment target is expected.
    pub fn is_assignable(&self) -> bool {
        match self {
            Node::Identifier(_) | Node::DotAccessor { .. } | Node::BracketAccessor { .. } | Node::Call { .. } => true,
            Node::Paren(inner) => inner.is_assignable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Node::ident("x").kind_name(), "Identifier");
        assert_eq!(Node::Return(None).kind_name(), "Return");
        let ext = Node::Extension { kind: "Yield".into(), children: vec![] };
        assert_eq!(ext.kind_name(), "Yield");
    }

    #[test]
    fn identifier_name() {
        assert_eq!(Node::ident("a").as_ident(), Some("a"));
        assert_eq!(Node::String("'a'".into()).as_ident(), None);
    }

    #[test]
    fn assignable_targets() {
        assert!(Node::ident("a").is_assignable());
        assert!(Node::Paren(Box::new(Node::ident("a"))).is_assignable());
        assert!(!Node::number("1").is_assignable());
        assert!(!Node::This.is_assignable());
    }
}

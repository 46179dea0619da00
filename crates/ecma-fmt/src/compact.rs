// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Single-line renderer.
//!
//! Overrides only the layout rules; keywords, literals and everything else
//! fall through to the defaults in [`Rules`].

use ecma_ast::{AssignOp, Node};

use crate::error::RenderError;
use crate::indent::Indent;
use crate::rules::{check_clauses, check_properties, RenderResult, Rules};

/// Renders a tree with no line breaks and minimal spacing.
pub struct Compact {
    indent: Indent,
}

impl Compact {
    pub fn new() -> Self {
        Self { indent: Indent::new(0) }
    }

    fn concat(&mut self, nodes: &[Node]) -> RenderResult {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.visit(node)?);
        }
        Ok(out)
    }
}

impl Default for Compact {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for Compact {
    fn indent(&self) -> &Indent {
        &self.indent
    }

    fn indent_mut(&mut self) -> &mut Indent {
        &mut self.indent
    }

    fn program(&mut self, body: &[Node]) -> RenderResult {
        self.concat(body)
    }

    fn statement_block(&mut self, body: &[Node]) -> RenderResult {
        let inner = self.nested(|r| r.concat(body))?;
        Ok(format!("{{{}}}", inner))
    }

    fn switch(&mut self, expr: &Node, cases: &[Node]) -> RenderResult {
        check_clauses(cases)?;
        let head = format!("switch({}){{", self.visit(expr)?);
        let clauses = self.nested(|r| r.concat(cases))?;
        Ok(format!("{}{}}}", head, clauses))
    }

    fn case_clause(&mut self, expr: &Node, elements: &[Node]) -> RenderResult {
        let head = format!("case {}:", self.visit(expr)?);
        Ok(head + &self.concat(elements)?)
    }

    fn default_clause(&mut self, elements: &[Node]) -> RenderResult {
        Ok(format!("default:{}", self.concat(elements)?))
    }

    fn object(&mut self, properties: &[Node]) -> RenderResult {
        check_properties(properties)?;
        Ok(format!("{{{}}}", self.list(properties)?))
    }

    fn list(&mut self, items: &[Node]) -> RenderResult {
        let parts = items.iter().map(|n| self.visit(n)).collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(","))
    }

    fn var_list(&mut self, decls: &[Node]) -> RenderResult {
        let mut parts = Vec::with_capacity(decls.len());
        for decl in decls {
            match decl {
                Node::VarDecl { .. } => parts.push(self.visit(decl)?),
                other => return Err(RenderError::unexpected("VarStatement", "declarations", "VarDecl", other)),
            }
        }
        Ok(format!("var {}", parts.join(",")))
    }

    fn var_decl(&mut self, identifier: &Node, initializer: Option<&Node>) -> RenderResult {
        let name = self.name(identifier, "VarDecl", "identifier")?;
        match initializer {
            Some(init) => Ok(format!("{}={}", name, self.visit(init)?)),
            None => Ok(name),
        }
    }

    fn assign(&mut self, op: AssignOp, left: &Node, right: &Node) -> RenderResult {
        Ok(format!("{}{}{}", self.visit(left)?, op.symbol(), self.visit(right)?))
    }

    fn comma(&mut self, left: &Node, right: &Node) -> RenderResult {
        Ok(format!("{},{}", self.visit(left)?, self.visit(right)?))
    }

    fn prop_assign(&mut self, prop: &Node, value: &Node) -> RenderResult {
        Ok(format!("{}:{}", self.visit(prop)?, self.visit(value)?))
    }

    fn conditional(&mut self, predicate: &Node, consequent: &Node, alternative: &Node) -> RenderResult {
        Ok(format!(
            "{}?{}:{}",
            self.visit(predicate)?,
            self.visit(consequent)?,
            self.visit(alternative)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_ast::BinOp;

    fn compact(node: &Node) -> String {
        Compact::new().render(node).expect("render failed")
    }

    fn id(name: &str) -> Box<Node> {
        Box::new(Node::ident(name))
    }

    #[test]
    fn blocks_on_one_line() {
        let node = Node::Program(vec![
            Node::VarStatement(vec![
                Node::VarDecl { identifier: id("a"), initializer: Some(Box::new(Node::number("1"))) },
                Node::VarDecl { identifier: id("b"), initializer: None },
            ]),
            Node::If {
                predicate: Some(id("a")),
                consequent: Box::new(Node::Block(vec![Node::Return(Some(id("b")))])),
                alternative: None,
            },
        ]);
        assert_eq!(compact(&node), "var a=1,b;if (a) {return b;}");
    }

    #[test]
    fn switch_on_one_line() {
        let node = Node::Switch {
            expr: id("x"),
            cases: vec![
                Node::Case { expr: Box::new(Node::number("1")), elements: vec![Node::Break(None)] },
                Node::Default(vec![]),
            ],
        };
        assert_eq!(compact(&node), "switch(x){case 1:break;default:}");
    }

    #[test]
    fn operators_keep_their_spacing() {
        // `in` stays a separate token.
        let node = Node::BinOp { op: BinOp::In, left: id("k"), right: id("o") };
        assert_eq!(compact(&node), "k in o");
    }

    #[test]
    fn object_and_call() {
        let node = Node::Call {
            target: id("f"),
            args: vec![
                Node::Object(vec![Node::PropAssign { prop: id("a"), value: Box::new(Node::number("1")) }]),
                Node::ident("b"),
            ],
        };
        assert_eq!(compact(&node), "f({a:1},b)");
    }

    #[test]
    fn integer_member_access_keeps_space() {
        let node = Node::DotAccessor { node: Box::new(Node::number("1")), identifier: id("x") };
        assert_eq!(compact(&node), "1 .x");
    }

    #[test]
    fn bad_clause_still_rejected() {
        let node = Node::Switch { expr: id("x"), cases: vec![Node::Null] };
        assert!(Compact::new().render(&node).is_err());
    }
}

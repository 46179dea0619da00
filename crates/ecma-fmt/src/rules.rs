// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The rendering rule table.
//!
//! Every node kind has one provided method on [`Rules`]. `visit` dispatches a
//! node to its rule; rules render their children by calling `visit` again, so
//! an implementor that overrides a single rule sees that override used at
//! every depth of the tree.
//!
//! Layout contract: a rule never indents its own first line. Positions that
//! hold statement lists (program, blocks, switch clauses, clause bodies,
//! object properties) prefix each line with the current indentation. Closing
//! braces are prefixed by the rule that opened them.

use ecma_ast::{AssignOp, BinOp, Node, UnaryOp};

use crate::error::RenderError;
use crate::indent::Indent;

pub type RenderResult = Result<String, RenderError>;

pub trait Rules: Sized {
    fn indent(&self) -> &Indent;
    fn indent_mut(&mut self) -> &mut Indent;

    /// Render a whole tree. The indentation level is the same afterwards as
    /// before, whether or not rendering succeeded.
    fn render(&mut self, node: &Node) -> RenderResult {
        let level = self.indent().level();
        let out = self.visit(node);
        debug_assert_eq!(self.indent().level(), level, "unbalanced indentation");
        out
    }

    fn visit(&mut self, node: &Node) -> RenderResult {
        match node {
            Node::Program(body) => self.program(body),
            Node::Block(body) => self.block(body),
            Node::VarStatement(decls) => self.var_statement(decls),
            Node::VarDecl { identifier, initializer } => self.var_decl(identifier, initializer.as_deref()),
            Node::Identifier(name) => self.identifier(name),
            Node::Assign { op, left, right } => self.assign(*op, left, right),
            Node::Number(text) => self.number(text),
            Node::Comma { left, right } => self.comma(left, right),
            Node::EmptyStatement => self.empty_statement(),
            Node::If { predicate, consequent, alternative } => {
                self.if_statement(predicate.as_deref(), consequent, alternative.as_deref())
            }
            Node::Boolean(value) => self.boolean(*value),
            Node::For { init, cond, count, body } => {
                self.for_loop(init.as_deref(), cond.as_deref(), count.as_deref(), body)
            }
            Node::ForIn { item, iterable, body } => self.for_in(item, iterable, body),
            Node::BinOp { op, left, right } => self.bin_op(*op, left, right),
            Node::UnaryOp { op, value, postfix } => self.unary_op(*op, value, *postfix),
            Node::ExprStatement(expr) => self.expr_statement(expr),
            Node::DoWhile { body, predicate } => self.do_while(body, predicate),
            Node::While { predicate, body } => self.while_loop(predicate, body),
            Node::Null => self.null(),
            Node::String(text) => self.string(text),
            Node::Continue(label) => self.continue_statement(label.as_deref()),
            Node::Break(label) => self.break_statement(label.as_deref()),
            Node::Return(expr) => self.return_statement(expr.as_deref()),
            Node::With { expr, body } => self.with_statement(expr, body),
            Node::Label { identifier, statement } => self.label(identifier, statement),
            Node::Switch { expr, cases } => self.switch(expr, cases),
            Node::Case { expr, elements } => self.case_clause(expr, elements),
            Node::Default(elements) => self.default_clause(elements),
            Node::Throw(expr) => self.throw(expr),
            Node::Debugger => self.debugger(),
            Node::Try { statements, catch, fin } => self.try_statement(statements, catch.as_deref(), fin.as_deref()),
            Node::Catch { identifier, elements } => self.catch_clause(identifier, elements),
            Node::Finally(elements) => self.finally_clause(elements),
            Node::FuncDecl { identifier, parameters, elements } => self.func_decl(identifier, parameters, elements),
            Node::FuncExpr { identifier, parameters, elements } => {
                self.func_expr(identifier.as_deref(), parameters, elements)
            }
            Node::Call { target, args } => self.call(target, args),
            Node::NewExpr { target, args } => self.new_expr(target, args),
            Node::DotAccessor { node, identifier } => self.dot_accessor(node, identifier),
            Node::BracketAccessor { node, expr } => self.bracket_accessor(node, expr),
            Node::Array(items) => self.array(items),
            Node::Object(properties) => self.object(properties),
            Node::PropAssign { prop, value } => self.prop_assign(prop, value),
            Node::Conditional { predicate, consequent, alternative } => {
                self.conditional(predicate, consequent, alternative)
            }
            Node::This => self.this(),
            Node::Regex(text) => self.regex(text),
            Node::Paren(expr) => self.paren(expr),
            Node::Extension { .. } => Ok(self.generic(node)),
        }
    }

    /// Fallback for kinds without a rule: a marker line, never an error.
    fn generic(&mut self, node: &Node) -> String {
        format!("GEN: {} {:?}", node.kind_name(), node)
    }

    // --- Layout helpers ---

    /// Run `f` one level deeper. The level is restored on every path out.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, RenderError>) -> Result<T, RenderError> {
        self.indent_mut().raise();
        let result = f(self);
        self.indent_mut().lower();
        result
    }

    /// One statement-list line: current indentation, then the node.
    fn line(&mut self, node: &Node) -> RenderResult {
        let prefix = self.indent().prefix();
        Ok(format!("{}{}", prefix, self.visit(node)?))
    }

    fn lines(&mut self, nodes: &[Node]) -> Result<Vec<String>, RenderError> {
        nodes.iter().map(|n| self.line(n)).collect()
    }

    /// Braced statement list shared by blocks and function bodies.
    fn statement_block(&mut self, body: &[Node]) -> RenderResult {
        let lines = self.nested(|r| r.lines(body))?;
        if lines.is_empty() {
            return Ok("{}".to_string());
        }
        Ok(format!("{{\n{}\n{}}}", lines.join("\n"), self.indent().prefix()))
    }

    fn function_body(&mut self, elements: &[Node]) -> RenderResult {
        self.statement_block(elements)
    }

    /// Comma-separated expressions: arguments, parameters, array items.
    fn list(&mut self, items: &[Node]) -> RenderResult {
        let parts = items.iter().map(|n| self.visit(n)).collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }

    /// `var` and its declarators, without a terminator.
    fn var_list(&mut self, decls: &[Node]) -> RenderResult {
        let mut parts = Vec::with_capacity(decls.len());
        for decl in decls {
            match decl {
                Node::VarDecl { .. } => parts.push(self.visit(decl)?),
                other => return Err(RenderError::unexpected("VarStatement", "declarations", "VarDecl", other)),
            }
        }
        Ok(format!("var {}", parts.join(", ")))
    }

    /// Render a slot that must hold an `Identifier`.
    fn name(&mut self, node: &Node, owner: &'static str, slot: &'static str) -> RenderResult {
        match node.as_ident() {
            Some(name) => self.identifier(name),
            None => Err(RenderError::unexpected(owner, slot, "Identifier", node)),
        }
    }

    // --- Statements ---

    fn program(&mut self, body: &[Node]) -> RenderResult {
        Ok(self.lines(body)?.join("\n"))
    }

    fn block(&mut self, body: &[Node]) -> RenderResult {
        self.statement_block(body)
    }

    fn var_statement(&mut self, decls: &[Node]) -> RenderResult {
        Ok(format!("{};", self.var_list(decls)?))
    }

    fn var_decl(&mut self, identifier: &Node, initializer: Option<&Node>) -> RenderResult {
        let name = self.name(identifier, "VarDecl", "identifier")?;
        match initializer {
            Some(init) => Ok(format!("{} = {}", name, self.visit(init)?)),
            None => Ok(name),
        }
    }

    fn empty_statement(&mut self) -> RenderResult {
        Ok(";".to_string())
    }

    fn expr_statement(&mut self, expr: &Node) -> RenderResult {
        Ok(format!("{};", self.visit(expr)?))
    }

    fn if_statement(&mut self, predicate: Option<&Node>, consequent: &Node, alternative: Option<&Node>) -> RenderResult {
        let predicate = match predicate {
            Some(p) => self.visit(p)?,
            None => String::new(),
        };
        let mut out = format!("if ({}) {}", predicate, self.visit(consequent)?);
        if let Some(alt) = alternative {
            out.push_str(" else ");
            out.push_str(&self.visit(alt)?);
        }
        Ok(out)
    }

    fn for_loop(&mut self, init: Option<&Node>, cond: Option<&Node>, count: Option<&Node>, body: &Node) -> RenderResult {
        let mut out = String::from("for (");
        match init {
            Some(Node::VarStatement(decls)) => out.push_str(&self.var_list(decls)?),
            Some(expr) => out.push_str(&self.visit(expr)?),
            None => {}
        }
        out.push(';');
        if let Some(cond) = cond {
            out.push(' ');
            out.push_str(&self.visit(cond)?);
        }
        out.push(';');
        if let Some(count) = count {
            out.push(' ');
            out.push_str(&self.visit(count)?);
        }
        out.push_str(") ");
        out.push_str(&self.visit(body)?);
        Ok(out)
    }

    fn for_in(&mut self, item: &Node, iterable: &Node, body: &Node) -> RenderResult {
        let item_text = match item {
            Node::VarDecl { .. } => format!("var {}", self.visit(item)?),
            _ => self.visit(item)?,
        };
        Ok(format!("for ({} in {}) {}", item_text, self.visit(iterable)?, self.visit(body)?))
    }

    fn do_while(&mut self, body: &Node, predicate: &Node) -> RenderResult {
        Ok(format!("do {} while ({});", self.visit(body)?, self.visit(predicate)?))
    }

    fn while_loop(&mut self, predicate: &Node, body: &Node) -> RenderResult {
        Ok(format!("while ({}) {}", self.visit(predicate)?, self.visit(body)?))
    }

    fn continue_statement(&mut self, label: Option<&Node>) -> RenderResult {
        match label {
            Some(label) => Ok(format!("continue {};", self.name(label, "Continue", "label")?)),
            None => Ok("continue;".to_string()),
        }
    }

    fn break_statement(&mut self, label: Option<&Node>) -> RenderResult {
        match label {
            Some(label) => Ok(format!("break {};", self.name(label, "Break", "label")?)),
            None => Ok("break;".to_string()),
        }
    }

    fn return_statement(&mut self, expr: Option<&Node>) -> RenderResult {
        match expr {
            Some(expr) => Ok(format!("return {};", self.visit(expr)?)),
            None => Ok("return;".to_string()),
        }
    }

    fn with_statement(&mut self, expr: &Node, body: &Node) -> RenderResult {
        Ok(format!("with ({}) {}", self.visit(expr)?, self.visit(body)?))
    }

    fn label(&mut self, identifier: &Node, statement: &Node) -> RenderResult {
        let name = self.name(identifier, "Label", "identifier")?;
        Ok(format!("{}: {}", name, self.visit(statement)?))
    }

    fn switch(&mut self, expr: &Node, cases: &[Node]) -> RenderResult {
        check_clauses(cases)?;
        let head = format!("switch ({}) {{", self.visit(expr)?);
        if cases.is_empty() {
            return Ok(head + "}");
        }
        let clauses = self.nested(|r| r.lines(cases))?;
        let mut out = head;
        for clause in clauses {
            out.push('\n');
            out.push_str(&clause);
        }
        out.push('\n');
        out.push_str(&self.indent().prefix());
        out.push('}');
        Ok(out)
    }

    fn case_clause(&mut self, expr: &Node, elements: &[Node]) -> RenderResult {
        let head = format!("case {}:", self.visit(expr)?);
        self.clause_body(head, elements)
    }

    fn default_clause(&mut self, elements: &[Node]) -> RenderResult {
        self.clause_body("default:".to_string(), elements)
    }

    /// Clause header followed by its statements one level deeper.
    fn clause_body(&mut self, head: String, elements: &[Node]) -> RenderResult {
        let lines = self.nested(|r| r.lines(elements))?;
        let mut out = head;
        for line in lines {
            out.push('\n');
            out.push_str(&line);
        }
        Ok(out)
    }

    fn throw(&mut self, expr: &Node) -> RenderResult {
        Ok(format!("throw {};", self.visit(expr)?))
    }

    fn debugger(&mut self) -> RenderResult {
        Ok("debugger;".to_string())
    }

    fn try_statement(&mut self, statements: &Node, catch: Option<&Node>, fin: Option<&Node>) -> RenderResult {
        if !matches!(statements, Node::Block(_)) {
            return Err(RenderError::unexpected("Try", "statements", "Block", statements));
        }
        let mut out = format!("try {}", self.visit(statements)?);
        if let Some(catch) = catch {
            if !matches!(catch, Node::Catch { .. }) {
                return Err(RenderError::unexpected("Try", "catch", "Catch", catch));
            }
            out.push(' ');
            out.push_str(&self.visit(catch)?);
        }
        if let Some(fin) = fin {
            if !matches!(fin, Node::Finally(_)) {
                return Err(RenderError::unexpected("Try", "fin", "Finally", fin));
            }
            out.push(' ');
            out.push_str(&self.visit(fin)?);
        }
        Ok(out)
    }

    fn catch_clause(&mut self, identifier: &Node, elements: &Node) -> RenderResult {
        let name = self.name(identifier, "Catch", "identifier")?;
        Ok(format!("catch ({}) {}", name, self.visit(elements)?))
    }

    fn finally_clause(&mut self, elements: &Node) -> RenderResult {
        Ok(format!("finally {}", self.visit(elements)?))
    }

    fn func_decl(&mut self, identifier: &Node, parameters: &[Node], elements: &[Node]) -> RenderResult {
        let name = self.name(identifier, "FuncDecl", "identifier")?;
        let params = self.parameters("FuncDecl", parameters)?;
        Ok(format!("function {}({}) {}", name, params, self.function_body(elements)?))
    }

    fn func_expr(&mut self, identifier: Option<&Node>, parameters: &[Node], elements: &[Node]) -> RenderResult {
        let name = match identifier {
            Some(id) => format!(" {}", self.name(id, "FuncExpr", "identifier")?),
            None => String::new(),
        };
        let params = self.parameters("FuncExpr", parameters)?;
        Ok(format!("function{}({}) {}", name, params, self.function_body(elements)?))
    }

    fn parameters(&mut self, owner: &'static str, parameters: &[Node]) -> RenderResult {
        let mut names = Vec::with_capacity(parameters.len());
        for param in parameters {
            names.push(self.name(param, owner, "parameters")?);
        }
        Ok(names.join(", "))
    }

    // --- Expressions ---

    fn assign(&mut self, op: AssignOp, left: &Node, right: &Node) -> RenderResult {
        Ok(format!("{} {} {}", self.visit(left)?, op.symbol(), self.visit(right)?))
    }

    fn comma(&mut self, left: &Node, right: &Node) -> RenderResult {
        Ok(format!("{}, {}", self.visit(left)?, self.visit(right)?))
    }

    fn bin_op(&mut self, op: BinOp, left: &Node, right: &Node) -> RenderResult {
        Ok(format!("{} {} {}", self.visit(left)?, op.symbol(), self.visit(right)?))
    }

    fn unary_op(&mut self, op: UnaryOp, value: &Node, postfix: bool) -> RenderResult {
        let operand = self.visit(value)?;
        if postfix {
            return Ok(format!("{}{}", operand, op.symbol()));
        }
        if needs_space(op, &operand) {
            Ok(format!("{} {}", op.symbol(), operand))
        } else {
            Ok(format!("{}{}", op.symbol(), operand))
        }
    }

    fn conditional(&mut self, predicate: &Node, consequent: &Node, alternative: &Node) -> RenderResult {
        Ok(format!(
            "{} ? {} : {}",
            self.visit(predicate)?,
            self.visit(consequent)?,
            self.visit(alternative)?
        ))
    }

    fn call(&mut self, target: &Node, args: &[Node]) -> RenderResult {
        Ok(format!("{}({})", self.visit(target)?, self.list(args)?))
    }

    fn new_expr(&mut self, target: &Node, args: &[Node]) -> RenderResult {
        Ok(format!("new {}({})", self.visit(target)?, self.list(args)?))
    }

    fn dot_accessor(&mut self, node: &Node, identifier: &Node) -> RenderResult {
        let object = self.visit(node)?;
        let name = self.name(identifier, "DotAccessor", "identifier")?;
        // `1.x` would lex as the number `1.` followed by `x`.
        if is_integer_literal(node) {
            return Ok(format!("{} .{}", object, name));
        }
        Ok(format!("{}.{}", object, name))
    }

    fn bracket_accessor(&mut self, node: &Node, expr: &Node) -> RenderResult {
        Ok(format!("{}[{}]", self.visit(node)?, self.visit(expr)?))
    }

    fn array(&mut self, items: &[Node]) -> RenderResult {
        Ok(format!("[{}]", self.list(items)?))
    }

    fn object(&mut self, properties: &[Node]) -> RenderResult {
        check_properties(properties)?;
        if properties.is_empty() {
            return Ok("{}".to_string());
        }
        let lines = self.nested(|r| r.lines(properties))?;
        Ok(format!("{{\n{}\n{}}}", lines.join(",\n"), self.indent().prefix()))
    }

    fn prop_assign(&mut self, prop: &Node, value: &Node) -> RenderResult {
        Ok(format!("{}: {}", self.visit(prop)?, self.visit(value)?))
    }

    fn paren(&mut self, expr: &Node) -> RenderResult {
        Ok(format!("({})", self.visit(expr)?))
    }

    // --- Literals ---

    fn identifier(&mut self, name: &str) -> RenderResult {
        Ok(name.to_string())
    }

    fn number(&mut self, text: &str) -> RenderResult {
        Ok(text.to_string())
    }

    fn string(&mut self, text: &str) -> RenderResult {
        Ok(text.to_string())
    }

    fn regex(&mut self, text: &str) -> RenderResult {
        Ok(text.to_string())
    }

    fn boolean(&mut self, value: bool) -> RenderResult {
        Ok(if value { "true" } else { "false" }.to_string())
    }

    fn null(&mut self) -> RenderResult {
        Ok("null".to_string())
    }

    fn this(&mut self) -> RenderResult {
        Ok("this".to_string())
    }
}

/// Switch bodies hold `Case` clauses and at most one `Default`.
pub(crate) fn check_clauses(cases: &[Node]) -> Result<(), RenderError> {
    let mut defaults = 0;
    for clause in cases {
        match clause {
            Node::Case { .. } => {}
            Node::Default(_) => defaults += 1,
            other => return Err(RenderError::unexpected("Switch", "cases", "Case or Default", other)),
        }
    }
    if defaults > 1 {
        return Err(RenderError::Malformed {
            owner: "Switch",
            reason: format!("{} default clauses", defaults),
        });
    }
    Ok(())
}

pub(crate) fn check_properties(properties: &[Node]) -> Result<(), RenderError> {
    match properties.iter().find(|p| !matches!(p, Node::PropAssign { .. })) {
        Some(other) => Err(RenderError::unexpected("Object", "properties", "PropAssign", other)),
        None => Ok(()),
    }
}

fn is_integer_literal(node: &Node) -> bool {
    matches!(node, Node::Number(text) if text.bytes().all(|b| b.is_ascii_digit()))
}

/// `typeof x`, `- -x`, `+ +x`: a prefix operator that would otherwise merge
/// with its operand into a different token.
fn needs_space(op: UnaryOp, operand: &str) -> bool {
    if op.is_keyword() {
        return true;
    }
    match op {
        UnaryOp::Plus | UnaryOp::Incr => operand.starts_with('+'),
        UnaryOp::Neg | UnaryOp::Decr => operand.starts_with('-'),
        _ => false,
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent for statements, binding
//! power for binary operators.

use ecma_ast::token::{Token, TokenKind};
use ecma_ast::{AssignOp, BinOp, Node, Span, UnaryOp};
use thiserror::Error;

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The parser for ECMAScript source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// `in` is not a binary operator directly inside a `for (...;` head
    allow_in: bool,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token { kind: TokenKind::Eof, span: Span::new(end, end), newline_before: false });
        }
        Self { tokens, pos: 0, allow_in: true, errors: Vec::new() }
    }

    /// Record error, return if should continue.
    fn record_error(&mut self, error: ParseError) -> bool {
        self.errors.push(error);
        self.errors.len() < MAX_ERRORS
    }

    /// Skip to the next statement boundary after an error.
    fn synchronize(&mut self) {
        let start = self.pos;

        while !self.at_end() {
            match self.current_kind() {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace
                | TokenKind::Var
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Return
                | TokenKind::Function
                | TokenKind::Switch
                | TokenKind::Try
                | TokenKind::Throw
                    if self.pos > start =>
                {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek(&self, n: usize) -> &TokenKind {
        self.tokens.get(self.pos + n).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.error_expected(kind.display_name()))
        }
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::expected(expected, self.current_kind(), self.current().span)
    }

    /// Statement terminator with automatic semicolon insertion.
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        if self.match_token(&TokenKind::Semi) {
            return Ok(());
        }
        if matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof) || self.current().newline_before {
            return Ok(());
        }
        Err(self.error_expected("';'"))
    }

    fn expect_ident(&mut self) -> Result<Node, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let node = Node::ident(name.as_str());
                self.advance();
                Ok(node)
            }
            _ => Err(self.error_expected("a name")),
        }
    }

    /// Property names after `.` and object keys may be reserved words.
    fn expect_property_name(&mut self) -> Result<Node, ParseError> {
        let name = match self.current_kind() {
            TokenKind::Ident(name) => name.clone(),
            other => match keyword_text(other) {
                Some(text) => text.to_string(),
                None => return Err(self.error_expected("a property name")),
            },
        };
        self.advance();
        Ok(Node::Identifier(name))
    }

    fn with_in<T>(&mut self, allow: bool, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        let saved = self.allow_in;
        self.allow_in = allow;
        let result = f(self);
        self.allow_in = saved;
        result
    }

    // =========================================================================
    // Program
    // =========================================================================

    pub fn parse(&mut self) -> ParseResult {
        let mut body = Vec::new();

        while !self.at_end() {
            match self.parse_statement() {
                Ok(stmt) => body.push(stmt),
                Err(e) => {
                    if !self.record_error(e) {
                        break;
                    }
                    self.synchronize();
                }
            }
        }

        ParseResult {
            program: Node::Program(body),
            errors: std::mem::take(&mut self.errors),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn parse_statement(&mut self) -> Result<Node, ParseError> {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Var => {
                let decls = self.parse_var_decls()?;
                self.expect_semi()?;
                Ok(Node::VarStatement(decls))
            }
            TokenKind::Semi => {
                self.advance();
                Ok(Node::EmptyStatement)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::While => self.parse_while(),
            TokenKind::Continue => {
                self.advance();
                let label = self.parse_jump_label()?;
                Ok(Node::Continue(label))
            }
            TokenKind::Break => {
                self.advance();
                let label = self.parse_jump_label()?;
                Ok(Node::Break(label))
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::With => {
                self.advance();
                let expr = self.parse_paren_head()?;
                let body = self.parse_statement()?;
                Ok(Node::With { expr: Box::new(expr), body: Box::new(body) })
            }
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Debugger => {
                self.advance();
                self.expect_semi()?;
                Ok(Node::Debugger)
            }
            TokenKind::Function => {
                self.advance();
                let identifier = self.expect_ident()?;
                let (parameters, elements) = self.parse_function_rest()?;
                Ok(Node::FuncDecl { identifier: Box::new(identifier), parameters, elements })
            }
            TokenKind::Ident(_) if matches!(self.peek(1), TokenKind::Colon) => {
                let identifier = self.expect_ident()?;
                self.advance();
                let statement = self.parse_statement()?;
                Ok(Node::Label { identifier: Box::new(identifier), statement: Box::new(statement) })
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect_semi()?;
                Ok(Node::ExprStatement(Box::new(expr)))
            }
        }
    }

    fn parse_block(&mut self) -> Result<Node, ParseError> {
        Ok(Node::Block(self.parse_braced_statements()?))
    }

    fn parse_braced_statements(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    /// `var a, b = 1` without the terminator.
    fn parse_var_decls(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect(&TokenKind::Var)?;
        let mut decls = Vec::new();
        loop {
            let identifier = self.expect_ident()?;
            let initializer = if self.match_token(&TokenKind::Eq) {
                Some(Box::new(self.parse_assign()?))
            } else {
                None
            };
            decls.push(Node::VarDecl { identifier: Box::new(identifier), initializer });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        Ok(decls)
    }

    /// `( expr )` after `if`, `while`, `with`, `switch`.
    fn parse_paren_head(&mut self) -> Result<Node, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.with_in(true, |p| p.parse_expr())?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let predicate = self.parse_paren_head()?;
        let consequent = self.parse_statement()?;
        let alternative = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Node::If {
            predicate: Some(Box::new(predicate)),
            consequent: Box::new(consequent),
            alternative,
        })
    }

    fn parse_for(&mut self) -> Result<Node, ParseError> {
        self.advance();
        self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semi) {
            None
        } else if self.check(&TokenKind::Var) {
            let mut decls = self.with_in(false, |p| p.parse_var_decls())?;
            if decls.len() == 1 && self.check(&TokenKind::In) {
                let item = decls.pop().map(Box::new);
                if let Some(item) = item {
                    return self.parse_for_in_rest(item);
                }
            }
            Some(Box::new(Node::VarStatement(decls)))
        } else {
            let expr = self.with_in(false, |p| p.parse_expr())?;
            if self.check(&TokenKind::In) {
                if !expr.is_assignable() {
                    return Err(ParseError::invalid_target("for-in", self.current().span));
                }
                return self.parse_for_in_rest(Box::new(expr));
            }
            Some(Box::new(expr))
        };

        self.expect(&TokenKind::Semi)?;
        let cond = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(&TokenKind::Semi)?;
        let count = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;

        Ok(Node::For { init, cond, count, body: Box::new(body) })
    }

    fn parse_for_in_rest(&mut self, item: Box<Node>) -> Result<Node, ParseError> {
        self.expect(&TokenKind::In)?;
        let iterable = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;
        Ok(Node::ForIn { item, iterable: Box::new(iterable), body: Box::new(body) })
    }

    fn parse_do_while(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let body = self.parse_statement()?;
        self.expect(&TokenKind::While)?;
        let predicate = self.parse_paren_head()?;
        // The terminator after `do ... while (x)` is always optional.
        self.match_token(&TokenKind::Semi);
        Ok(Node::DoWhile { body: Box::new(body), predicate: Box::new(predicate) })
    }

    fn parse_while(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let predicate = self.parse_paren_head()?;
        let body = self.parse_statement()?;
        Ok(Node::While { predicate: Box::new(predicate), body: Box::new(body) })
    }

    /// Optional label after `break`/`continue`, on the same line.
    fn parse_jump_label(&mut self) -> Result<Option<Box<Node>>, ParseError> {
        let label = match self.current_kind() {
            TokenKind::Ident(_) if !self.current().newline_before => Some(Box::new(self.expect_ident()?)),
            _ => None,
        };
        self.expect_semi()?;
        Ok(label)
    }

    fn parse_return(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let ends_here = matches!(self.current_kind(), TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof)
            || self.current().newline_before;
        let expr = if ends_here { None } else { Some(Box::new(self.parse_expr()?)) };
        self.expect_semi()?;
        Ok(Node::Return(expr))
    }

    fn parse_throw(&mut self) -> Result<Node, ParseError> {
        self.advance();
        if self.current().newline_before {
            return Err(ParseError::illegal_newline("throw", self.current().span));
        }
        let expr = self.parse_expr()?;
        self.expect_semi()?;
        Ok(Node::Throw(Box::new(expr)))
    }

    fn parse_switch(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let expr = self.parse_paren_head()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.current_kind() {
                TokenKind::Case => {
                    self.advance();
                    let expr = self.with_in(true, |p| p.parse_expr())?;
                    self.expect(&TokenKind::Colon)?;
                    let elements = self.parse_clause_body()?;
                    cases.push(Node::Case { expr: Box::new(expr), elements });
                }
                TokenKind::Default => {
                    if seen_default {
                        return Err(ParseError::duplicate_default(self.current().span));
                    }
                    seen_default = true;
                    self.advance();
                    self.expect(&TokenKind::Colon)?;
                    cases.push(Node::Default(self.parse_clause_body()?));
                }
                _ => return Err(self.error_expected("'case' or 'default'")),
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Node::Switch { expr: Box::new(expr), cases })
    }

    fn parse_clause_body(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut elements = Vec::new();
        while !matches!(
            self.current_kind(),
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            elements.push(self.parse_statement()?);
        }
        Ok(elements)
    }

    fn parse_try(&mut self) -> Result<Node, ParseError> {
        let start = self.current().span;
        self.advance();
        let statements = self.parse_block()?;

        let catch = if self.match_token(&TokenKind::Catch) {
            self.expect(&TokenKind::LParen)?;
            let identifier = self.expect_ident()?;
            self.expect(&TokenKind::RParen)?;
            let elements = self.parse_block()?;
            Some(Box::new(Node::Catch { identifier: Box::new(identifier), elements: Box::new(elements) }))
        } else {
            None
        };

        let fin = if self.match_token(&TokenKind::Finally) {
            Some(Box::new(Node::Finally(Box::new(self.parse_block()?))))
        } else {
            None
        };

        if catch.is_none() && fin.is_none() {
            return Err(ParseError::missing_handler(start));
        }

        Ok(Node::Try { statements: Box::new(statements), catch, fin })
    }

    /// Parameters and body after the function name.
    fn parse_function_rest(&mut self) -> Result<(Vec<Node>, Vec<Node>), ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut parameters = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                parameters.push(self.expect_ident()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        let elements = self.with_in(true, |p| p.parse_braced_statements())?;
        Ok((parameters, elements))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_assign()?;
        while self.match_token(&TokenKind::Comma) {
            let right = self.parse_assign()?;
            left = Node::Comma { left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_assign(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_conditional()?;

        if let Some(op) = self.assign_op() {
            if !left.is_assignable() {
                return Err(ParseError::invalid_target("assignment", self.current().span));
            }
            self.advance();
            let right = self.parse_assign()?;
            return Ok(Node::Assign { op, left: Box::new(left), right: Box::new(right) });
        }

        Ok(left)
    }

    fn parse_conditional(&mut self) -> Result<Node, ParseError> {
        let predicate = self.parse_binary(0)?;

        if self.match_token(&TokenKind::Question) {
            let consequent = self.with_in(true, |p| p.parse_assign())?;
            self.expect(&TokenKind::Colon)?;
            let alternative = self.parse_assign()?;
            return Ok(Node::Conditional {
                predicate: Box::new(predicate),
                consequent: Box::new(consequent),
                alternative: Box::new(alternative),
            });
        }

        Ok(predicate)
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.parse_unary()?;

        while let Some((op, l_bp, r_bp)) = self.infix_bp() {
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(r_bp)?;
            lhs = Node::BinOp { op, left: Box::new(lhs), right: Box::new(rhs) };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Typeof => UnaryOp::Typeof,
            TokenKind::PlusPlus => UnaryOp::Incr,
            TokenKind::MinusMinus => UnaryOp::Decr,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let value = self.parse_unary()?;
        Ok(Node::UnaryOp { op, value: Box::new(value), postfix: false })
    }

    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let expr = self.parse_lhs()?;

        if self.current().newline_before {
            return Ok(expr);
        }
        let op = match self.current_kind() {
            TokenKind::PlusPlus => UnaryOp::Incr,
            TokenKind::MinusMinus => UnaryOp::Decr,
            _ => return Ok(expr),
        };
        if !expr.is_assignable() {
            return Err(ParseError::invalid_target("postfix operator", self.current().span));
        }
        self.advance();
        Ok(Node::UnaryOp { op, value: Box::new(expr), postfix: true })
    }

    /// Member access, calls and `new`.
    fn parse_lhs(&mut self) -> Result<Node, ParseError> {
        let mut expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            expr = match self.current_kind() {
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    Node::Call { target: Box::new(expr), args }
                }
                TokenKind::Dot | TokenKind::LBracket => self.parse_member(expr)?,
                _ => break,
            };
        }

        Ok(expr)
    }

    fn parse_new(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let mut target = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while matches!(self.current_kind(), TokenKind::Dot | TokenKind::LBracket) {
            target = self.parse_member(target)?;
        }
        let args = if self.check(&TokenKind::LParen) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        Ok(Node::NewExpr { target: Box::new(target), args })
    }

    fn parse_member(&mut self, object: Node) -> Result<Node, ParseError> {
        if self.match_token(&TokenKind::Dot) {
            let identifier = self.expect_property_name()?;
            return Ok(Node::DotAccessor { node: Box::new(object), identifier: Box::new(identifier) });
        }
        self.expect(&TokenKind::LBracket)?;
        let expr = self.with_in(true, |p| p.parse_expr())?;
        self.expect(&TokenKind::RBracket)?;
        Ok(Node::BracketAccessor { node: Box::new(object), expr: Box::new(expr) })
    }

    fn parse_args(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.with_in(true, |p| p.parse_assign())?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let node = match self.current_kind() {
            TokenKind::This => Node::This,
            TokenKind::Ident(name) => Node::Identifier(name.clone()),
            TokenKind::Number(text) => Node::Number(text.clone()),
            TokenKind::String(text) => Node::String(text.clone()),
            TokenKind::Regex(text) => Node::Regex(text.clone()),
            TokenKind::Bool(b) => Node::Boolean(*b),
            TokenKind::Null => Node::Null,
            TokenKind::LParen => {
                self.advance();
                let expr = self.with_in(true, |p| p.parse_expr())?;
                self.expect(&TokenKind::RParen)?;
                return Ok(Node::Paren(Box::new(expr)));
            }
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_object(),
            TokenKind::Function => {
                self.advance();
                let identifier = match self.current_kind() {
                    TokenKind::Ident(_) => Some(Box::new(self.expect_ident()?)),
                    _ => None,
                };
                let (parameters, elements) = self.parse_function_rest()?;
                return Ok(Node::FuncExpr { identifier, parameters, elements });
            }
            _ => return Err(self.error_expected("expression")),
        };
        self.advance();
        Ok(node)
    }

    fn parse_array(&mut self) -> Result<Node, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            items.push(self.with_in(true, |p| p.parse_assign())?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Node::Array(items))
    }

    fn parse_object(&mut self) -> Result<Node, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let prop = match self.current_kind() {
                TokenKind::String(text) => {
                    let prop = Node::String(text.clone());
                    self.advance();
                    prop
                }
                TokenKind::Number(text) => {
                    let prop = Node::Number(text.clone());
                    self.advance();
                    prop
                }
                _ => self.expect_property_name()?,
            };
            self.expect(&TokenKind::Colon)?;
            let value = self.with_in(true, |p| p.parse_assign())?;
            properties.push(Node::PropAssign { prop: Box::new(prop), value: Box::new(value) });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Node::Object(properties))
    }

    // =========================================================================
    // Operator Precedence
    // =========================================================================

    fn infix_bp(&self) -> Option<(BinOp, u8, u8)> {
        let (op, bp) = match self.current_kind() {
            TokenKind::PipePipe => (BinOp::Or, 1),
            TokenKind::AmpAmp => (BinOp::And, 3),
            TokenKind::Pipe => (BinOp::BitOr, 5),
            TokenKind::Caret => (BinOp::BitXor, 7),
            TokenKind::Amp => (BinOp::BitAnd, 9),
            TokenKind::EqEq => (BinOp::Eq, 11),
            TokenKind::BangEq => (BinOp::Ne, 11),
            TokenKind::EqEqEq => (BinOp::StrictEq, 11),
            TokenKind::BangEqEq => (BinOp::StrictNe, 11),
            TokenKind::Lt => (BinOp::Lt, 13),
            TokenKind::Gt => (BinOp::Gt, 13),
            TokenKind::LtEq => (BinOp::Le, 13),
            TokenKind::GtEq => (BinOp::Ge, 13),
            TokenKind::Instanceof => (BinOp::Instanceof, 13),
            TokenKind::In if self.allow_in => (BinOp::In, 13),
            TokenKind::LtLt => (BinOp::Shl, 15),
            TokenKind::GtGt => (BinOp::Shr, 15),
            TokenKind::GtGtGt => (BinOp::UShr, 15),
            TokenKind::Plus => (BinOp::Add, 17),
            TokenKind::Minus => (BinOp::Sub, 17),
            TokenKind::Star => (BinOp::Mul, 19),
            TokenKind::Slash => (BinOp::Div, 19),
            TokenKind::Percent => (BinOp::Mod, 19),
            _ => return None,
        };
        // All binary operators are left-associative.
        Some((op, bp, bp + 1))
    }

    fn assign_op(&self) -> Option<AssignOp> {
        Some(match self.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::LtLtEq => AssignOp::Shl,
            TokenKind::GtGtEq => AssignOp::Shr,
            TokenKind::GtGtGtEq => AssignOp::UShr,
            TokenKind::AmpEq => AssignOp::BitAnd,
            TokenKind::PipeEq => AssignOp::BitOr,
            TokenKind::CaretEq => AssignOp::BitXor,
            _ => return None,
        })
    }
}

/// Source text of keyword-like tokens, for property names.
fn keyword_text(kind: &TokenKind) -> Option<&'static str> {
    Some(match kind {
        TokenKind::Break => "break",
        TokenKind::Case => "case",
        TokenKind::Catch => "catch",
        TokenKind::Continue => "continue",
        TokenKind::Debugger => "debugger",
        TokenKind::Default => "default",
        TokenKind::Delete => "delete",
        TokenKind::Do => "do",
        TokenKind::Else => "else",
        TokenKind::Finally => "finally",
        TokenKind::For => "for",
        TokenKind::Function => "function",
        TokenKind::If => "if",
        TokenKind::In => "in",
        TokenKind::Instanceof => "instanceof",
        TokenKind::New => "new",
        TokenKind::Return => "return",
        TokenKind::Switch => "switch",
        TokenKind::This => "this",
        TokenKind::Throw => "throw",
        TokenKind::Try => "try",
        TokenKind::Typeof => "typeof",
        TokenKind::Var => "var",
        TokenKind::Void => "void",
        TokenKind::While => "while",
        TokenKind::With => "with",
        TokenKind::Bool(true) => "true",
        TokenKind::Bool(false) => "false",
        TokenKind::Null => "null",
        _ => return None,
    })
}

/// Result of parsing: the program plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Node,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parse error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self { span, message, hint }
    }

    fn invalid_target(context: &str, span: Span) -> Self {
        Self {
            span,
            message: format!("Invalid left-hand side in {}", context),
            hint: Some("only names, member accesses and calls can be assigned".to_string()),
        }
    }

    fn illegal_newline(keyword: &str, span: Span) -> Self {
        Self {
            span,
            message: format!("Line break is not allowed after '{}'", keyword),
            hint: Some(format!("put the value on the same line as '{}'", keyword)),
        }
    }

    fn duplicate_default(span: Span) -> Self {
        Self {
            span,
            message: "More than one 'default' clause in switch".to_string(),
            hint: None,
        }
    }

    fn missing_handler(span: Span) -> Self {
        Self {
            span,
            message: "Missing 'catch' or 'finally' after 'try'".to_string(),
            hint: Some("add a 'catch (e) { }' or 'finally { }' block".to_string()),
        }
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match expected {
        "';'" => format!("Expected ';' after statement, found {}", found.display_name()),
        "'{'" => format!("Expected '{{' to start block, found {}", found.display_name()),
        "'}'" => format!("Expected '}}' to close block, found {}", found.display_name()),
        "')'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '(' - missing ')'".to_string()
            } else {
                format!("Expected ')', found {}", found.display_name())
            }
        }
        "']'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '[' - missing ']'".to_string()
            } else {
                format!("Expected ']', found {}", found.display_name())
            }
        }
        "a name" => format!("Expected name, found {}", found.display_name()),
        "expression" => format!("Expected expression, found {}", found.display_name()),
        _ => format!("Expected {}, found {}", expected, found.display_name()),
    }
}

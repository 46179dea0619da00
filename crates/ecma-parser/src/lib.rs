//! Parser for ECMAScript source.
//!
//! Transforms a token stream into a syntax tree rooted at `Node::Program`.

mod hints;
mod parser;

pub use parser::{ParseError, ParseResult, Parser};

/// Lex and parse `source` in one step. Lex errors are reported as parse
/// errors at the same location.
pub fn parse_source(source: &str) -> ParseResult {
    let lex_result = ecma_lexer::Lexer::new(source).tokenize();
    let mut result = Parser::new(lex_result.tokens).parse();
    if !lex_result.errors.is_empty() {
        let mut errors: Vec<ParseError> = lex_result
            .errors
            .into_iter()
            .map(|e| ParseError { span: e.span, message: e.message, hint: e.hint })
            .collect();
        errors.append(&mut result.errors);
        result.errors = errors;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_ast::{AssignOp, BinOp, Node, UnaryOp};

    fn parse(src: &str) -> Vec<Node> {
        let lex_result = ecma_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "Lex errors: {:?}", lex_result.errors);
        let result = Parser::new(lex_result.tokens).parse();
        assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
        match result.program {
            Node::Program(body) => body,
            other => panic!("Expected program, got {:?}", other),
        }
    }

    fn expr(src: &str) -> Node {
        match parse(src).pop() {
            Some(Node::ExprStatement(e)) => *e,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    fn id(name: &str) -> Box<Node> {
        Box::new(Node::ident(name))
    }

    fn num(text: &str) -> Box<Node> {
        Box::new(Node::number(text))
    }

    #[test]
    fn parse_var_statement() {
        let body = parse("var a, b = 1;");
        assert_eq!(
            body,
            vec![Node::VarStatement(vec![
                Node::VarDecl { identifier: id("a"), initializer: None },
                Node::VarDecl { identifier: id("b"), initializer: Some(num("1")) },
            ])]
        );
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(
            expr("a + b * c;"),
            Node::BinOp {
                op: BinOp::Add,
                left: id("a"),
                right: Box::new(Node::BinOp { op: BinOp::Mul, left: id("b"), right: id("c") }),
            }
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            expr("a - b - c;"),
            Node::BinOp {
                op: BinOp::Sub,
                left: Box::new(Node::BinOp { op: BinOp::Sub, left: id("a"), right: id("b") }),
                right: id("c"),
            }
        );
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(
            expr("a = b += 1;"),
            Node::Assign {
                op: AssignOp::Assign,
                left: id("a"),
                right: Box::new(Node::Assign { op: AssignOp::Add, left: id("b"), right: num("1") }),
            }
        );
    }

    #[test]
    fn parentheses_are_kept() {
        assert_eq!(
            expr("(a + b) * c;"),
            Node::BinOp {
                op: BinOp::Mul,
                left: Box::new(Node::Paren(Box::new(Node::BinOp { op: BinOp::Add, left: id("a"), right: id("b") }))),
                right: id("c"),
            }
        );
    }

    #[test]
    fn comma_chain_nests_left() {
        assert_eq!(
            expr("a, b, c;"),
            Node::Comma {
                left: Box::new(Node::Comma { left: id("a"), right: id("b") }),
                right: id("c"),
            }
        );
    }

    #[test]
    fn prefix_and_postfix_operators() {
        assert_eq!(
            expr("-x++;"),
            Node::UnaryOp {
                op: UnaryOp::Neg,
                value: Box::new(Node::UnaryOp { op: UnaryOp::Incr, value: id("x"), postfix: true }),
                postfix: false,
            }
        );
        assert_eq!(
            expr("typeof x;"),
            Node::UnaryOp { op: UnaryOp::Typeof, value: id("x"), postfix: false }
        );
    }

    #[test]
    fn postfix_not_across_newline() {
        let body = parse("a\n++b");
        assert_eq!(body.len(), 2);
        assert_eq!(body[0], Node::ExprStatement(id("a")));
        assert_eq!(
            body[1],
            Node::ExprStatement(Box::new(Node::UnaryOp { op: UnaryOp::Incr, value: id("b"), postfix: false }))
        );
    }

    #[test]
    fn member_call_and_new() {
        assert_eq!(
            expr("new a.B(1).c[d](e);"),
            Node::Call {
                target: Box::new(Node::BracketAccessor {
                    node: Box::new(Node::DotAccessor {
                        node: Box::new(Node::NewExpr {
                            target: Box::new(Node::DotAccessor { node: id("a"), identifier: id("B") }),
                            args: vec![Node::number("1")],
                        }),
                        identifier: id("c"),
                    }),
                    expr: id("d"),
                }),
                args: vec![Node::ident("e")],
            }
        );
    }

    #[test]
    fn keyword_property_names() {
        assert_eq!(
            expr("a.default;"),
            Node::DotAccessor { node: id("a"), identifier: id("default") }
        );
    }

    #[test]
    fn object_and_array_literals() {
        assert_eq!(
            expr("x = {a: 1, 'b': [2, 3]};"),
            Node::Assign {
                op: AssignOp::Assign,
                left: id("x"),
                right: Box::new(Node::Object(vec![
                    Node::PropAssign { prop: id("a"), value: num("1") },
                    Node::PropAssign {
                        prop: Box::new(Node::String("'b'".into())),
                        value: Box::new(Node::Array(vec![Node::number("2"), Node::number("3")])),
                    },
                ])),
            }
        );
    }

    #[test]
    fn conditional_expression() {
        assert_eq!(
            expr("a ? b : c;"),
            Node::Conditional { predicate: id("a"), consequent: id("b"), alternative: id("c") }
        );
    }

    #[test]
    fn for_with_var_init() {
        let body = parse("for (var i = 0; i < n; i++) {}");
        match &body[0] {
            Node::For { init: Some(init), cond: Some(_), count: Some(_), .. } => {
                assert!(matches!(**init, Node::VarStatement(ref decls) if decls.len() == 1));
            }
            other => panic!("Expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn for_with_empty_head() {
        let body = parse("for (;;) break;");
        assert_eq!(
            body[0],
            Node::For { init: None, cond: None, count: None, body: Box::new(Node::Break(None)) }
        );
    }

    #[test]
    fn for_in_with_var_and_with_target() {
        let body = parse("for (var k in o) ; for (k in o) ;");
        assert_eq!(
            body[0],
            Node::ForIn {
                item: Box::new(Node::VarDecl { identifier: id("k"), initializer: None }),
                iterable: id("o"),
                body: Box::new(Node::EmptyStatement),
            }
        );
        assert_eq!(
            body[1],
            Node::ForIn { item: id("k"), iterable: id("o"), body: Box::new(Node::EmptyStatement) }
        );
    }

    #[test]
    fn in_operator_inside_parens_in_for_init() {
        let body = parse("for (x = (a in b); x; ) ;");
        match &body[0] {
            Node::For { init: Some(init), .. } => {
                assert!(matches!(**init, Node::Assign { .. }));
            }
            other => panic!("Expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn return_without_value_before_newline() {
        let body = parse("function f() { return\n1 }");
        match &body[0] {
            Node::FuncDecl { elements, .. } => {
                assert_eq!(elements[0], Node::Return(None));
                assert_eq!(elements[1], Node::ExprStatement(num("1")));
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn labelled_continue() {
        let body = parse("loop1: while (x) { continue loop1; }");
        assert_eq!(
            body[0],
            Node::Label {
                identifier: id("loop1"),
                statement: Box::new(Node::While {
                    predicate: id("x"),
                    body: Box::new(Node::Block(vec![Node::Continue(Some(id("loop1")))])),
                }),
            }
        );
    }

    #[test]
    fn switch_keeps_clause_order() {
        let body = parse("switch (x) { case 1: a; default: b; case 2: }");
        match &body[0] {
            Node::Switch { cases, .. } => {
                let kinds: Vec<&str> = cases.iter().map(|c| c.kind_name()).collect();
                assert_eq!(kinds, vec!["Case", "Default", "Case"]);
            }
            other => panic!("Expected switch, got {:?}", other),
        }
    }

    #[test]
    fn try_catch_finally() {
        let body = parse("try { a; } catch (e) { b; } finally { c; }");
        assert_eq!(
            body[0],
            Node::Try {
                statements: Box::new(Node::Block(vec![Node::ExprStatement(id("a"))])),
                catch: Some(Box::new(Node::Catch {
                    identifier: id("e"),
                    elements: Box::new(Node::Block(vec![Node::ExprStatement(id("b"))])),
                })),
                fin: Some(Box::new(Node::Finally(Box::new(Node::Block(vec![Node::ExprStatement(id("c"))]))))),
            }
        );
    }

    #[test]
    fn function_expression_and_regex() {
        assert_eq!(
            expr("(function (a) { return /x/g; });"),
            Node::Paren(Box::new(Node::FuncExpr {
                identifier: None,
                parameters: vec![Node::ident("a")],
                elements: vec![Node::Return(Some(Box::new(Node::Regex("/x/g".into()))))],
            }))
        );
    }

    #[test]
    fn automatic_semicolons() {
        let body = parse("a = 1\nb = 2\n{ c }");
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn missing_semicolon_on_one_line_is_error() {
        let result = parse_source("a b");
        assert!(!result.is_ok());
        assert!(result.errors[0].message.starts_with("Expected ';'"));
        assert!(result.errors[0].hint.is_some());
    }

    #[test]
    fn try_without_handler_is_error() {
        let result = parse_source("try { a; }");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Missing 'catch' or 'finally' after 'try'");
    }

    #[test]
    fn duplicate_default_is_error() {
        let result = parse_source("switch (x) { default: default: }");
        assert!(!result.is_ok());
    }

    #[test]
    fn invalid_assignment_target() {
        let result = parse_source("1 = a;");
        assert!(result.errors[0].message.starts_with("Invalid left-hand side"));
    }

    #[test]
    fn recovers_after_error() {
        let result = parse_source("var = 1;\nvar ok = 2;\nif (;\nx;");
        assert_eq!(result.errors.len(), 2);
        match result.program {
            Node::Program(body) => assert!(body.contains(&Node::VarStatement(vec![Node::VarDecl {
                identifier: id("ok"),
                initializer: Some(num("2")),
            }]))),
            other => panic!("Expected program, got {:?}", other),
        }
    }

    #[test]
    fn lex_errors_are_reported() {
        let result = parse_source("a # b;");
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].message, "Unexpected character '#'");
    }
}

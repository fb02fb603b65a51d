#[cfg(test)]
mod parser_tests {
    use rox::ast_printer::AstPrinter;
    use rox::error::LoxError;
    use rox::expr::{Expr, LiteralValue};
    use rox::parser::{parse, Parser};
    use rox::scanner::scan;
    use rox::stmt::Stmt;

    fn print_expression(source: &str) -> String {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "lex errors in {:?}", source);

        match Parser::new(&tokens).parse_expression() {
            Ok(expr) => AstPrinter::print(&expr),
            Err(e) => panic!("failed to parse {:?}: {}", source, e),
        }
    }

    fn parse_program(source: &str) -> (Vec<Stmt>, Vec<LoxError>) {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "lex errors in {:?}", source);
        parse(&tokens)
    }

    fn messages(errors: &[LoxError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_associativity() {
        let cases = [
            ("1 + 2 * 3", "(+ 1.0 (* 2.0 3.0))"),
            ("1 - 2 - 3", "(- (- 1.0 2.0) 3.0)"),
            ("8 / 4 / 2", "(/ (/ 8.0 4.0) 2.0)"),
            ("1 < 2 == true", "(== (< 1.0 2.0) true)"),
            ("-(1 - 2) == !true", "(== (- (group (- 1.0 2.0))) (! true))"),
            ("!!nil", "(! (! nil))"),
            ("a or b and c", "(or a (and b c))"),
            ("a and b or c", "(or (and a b) c)"),
            ("a = b = 1", "(= a (= b 1.0))"),
            ("x = 1 or 2", "(= x (or 1.0 2.0))"),
            ("\"str\" + 2.5", "(+ str 2.5)"),
        ];

        for (source, expected) in cases {
            assert_eq!(print_expression(source), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_calls_and_properties() {
        let cases = [
            ("f()", "(call f)"),
            ("f(1)(2, 3)", "(call (call f 1.0) 2.0 3.0)"),
            ("a.b.c", "(. (. a b) c)"),
            ("a.b.c = 1", "(.= (. a b) c 1.0)"),
            ("a.b(c).d", "(. (call (. a b) c) d)"),
            ("this.x", "(. this x)"),
            ("super.m(1)", "(call (super m) 1.0)"),
        ];

        for (source, expected) in cases {
            assert_eq!(print_expression(source), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_single_expression_must_consume_all_input() {
        let (tokens, _) = scan("1 2");

        match Parser::new(&tokens).parse_expression() {
            Ok(expr) => panic!("trailing tokens accepted as {}", AstPrinter::print(&expr)),
            Err(e) => assert_eq!(e.to_string(), "[line 1] Error at '2': Expected end of expression."),
        }

        assert_eq!(print_expression("(1)"), "(group 1.0)");
    }

    #[test]
    fn test_invalid_assignment_target_is_reported_not_thrown() {
        let (statements, errors) = parse_program("1 = 2; print 3;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1], Stmt::Print(_)));
    }

    #[test]
    fn test_panic_mode_recovers_at_statement_boundaries() {
        let (statements, errors) = parse_program("var = 1; print 2;\nvar x 3; print 4;");

        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at '=': Expected variable name.",
                "[line 2] Error at '3': Expected ';' after variable declaration.",
            ]
        );
        assert_eq!(statements.len(), 2);
        assert!(statements.iter().all(|s| matches!(s, Stmt::Print(_))));
    }

    #[test]
    fn test_recovery_inside_block_keeps_outer_structure() {
        let (statements, errors) = parse_program("{ print ; var y = 2; }\nprint 5;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at ';': Expected expression."]
        );
        assert_eq!(statements.len(), 2);
        match &statements[0] {
            Stmt::Block(inner) => {
                assert_eq!(inner.len(), 1);
                assert!(matches!(inner[0], Stmt::Var { .. }));
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_error_at_end() {
        let (statements, errors) = parse_program("print 1");

        assert!(statements.is_empty());
        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at end: Expected ';' after value."]
        );
    }

    #[test]
    fn test_for_loop_is_desugared_to_while() {
        let (statements, errors) = parse_program("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(errors.is_empty());
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected block, got {:?}", statements[0]);
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };
        assert_eq!(AstPrinter::print(condition), "(< i 3.0)");

        let Stmt::Block(body) = body.as_ref() else {
            panic!("expected block body, got {:?}", body);
        };
        assert!(matches!(body[0], Stmt::Print(_)));
        match &body[1] {
            Stmt::Expression(expr) => assert_eq!(AstPrinter::print(expr), "(= i (+ i 1.0))"),
            other => panic!("expected increment, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop_without_clauses() {
        let (statements, errors) = parse_program("for (;;) print 1;");

        assert!(errors.is_empty());
        match &statements[0] {
            Stmt::While { condition, body } => {
                assert_eq!(*condition, Expr::Literal(LiteralValue::Bool(true)));
                assert!(matches!(body.as_ref(), Stmt::Print(_)));
            }
            other => panic!("expected bare while, got {:?}", other),
        }
    }

    #[test]
    fn test_class_declaration() {
        let (statements, errors) =
            parse_program("class B < A { init(x) { this.x = x; } area(w, h) { return w * h; } }");

        assert!(errors.is_empty());
        let Stmt::Class {
            name,
            superclass,
            methods,
        } = &statements[0]
        else {
            panic!("expected class, got {:?}", statements[0]);
        };

        assert_eq!(name.lexeme, "B");
        assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));

        let summary: Vec<(&str, usize)> = methods
            .iter()
            .map(|m| (m.name.lexeme.as_str(), m.params.len()))
            .collect();
        assert_eq!(summary, vec![("init", 1), ("area", 2)]);
    }

    #[test]
    fn test_function_declaration() {
        let (statements, errors) = parse_program("fun add(a, b) { return a + b; }");

        assert!(errors.is_empty());
        match &statements[0] {
            Stmt::Function(decl) => {
                assert_eq!(decl.name.lexeme, "add");
                assert_eq!(decl.params.len(), 2);
                assert!(matches!(decl.body[0], Stmt::Return { value: Some(_), .. }));
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_parameters_is_reported_but_parsed() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}} print 1;", params.join(", "));

        let (statements, errors) = parse_program(&source);

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .contains("Can't have more than 255 parameters."));
        assert_eq!(statements.len(), 2);
        match &statements[0] {
            Stmt::Function(decl) => assert_eq!(decl.params.len(), 256),
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_arguments_is_reported() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (statements, errors) = parse_program(&source);

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .contains("Can't have more than 255 arguments."));
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_identical_references_have_distinct_identity() {
        let (statements, _) = parse_program("a; a;");

        let ids: Vec<_> = statements
            .iter()
            .map(|s| match s {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("expected variable, got {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_empty_token_slice_parses_to_nothing() {
        let (statements, errors) = parse(&[]);

        assert!(statements.is_empty());
        assert!(errors.is_empty());
    }
}

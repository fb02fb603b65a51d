mod common;

#[cfg(test)]
mod interpreter_tests {
    use super::common::{errors_of, interpreter, output_of, run};
    use rox::parser::Parser;
    use rox::run_source;
    use rox::scanner::scan;
    use rox::value::Value;

    fn assert_prints(source: &str, expected: &str) {
        assert_eq!(output_of(source), expected, "source: {}", source);
    }

    #[test]
    fn test_arithmetic_and_formatting() {
        let cases = [
            ("print 1 + 1;", "2\n"),
            ("print 5 / 2;", "2.5\n"),
            ("print 2 * 3 - 4;", "2\n"),
            ("print -(3);", "-3\n"),
            ("print 100;", "100\n"),
            ("print 0.1 + 0.2 > 0.3;", "true\n"),
            ("print \"a\" + \"b\";", "ab\n"),
            ("print 1 / 0 > 1000000;", "true\n"),
        ];

        for (source, expected) in cases {
            assert_prints(source, expected);
        }
    }

    #[test]
    fn test_equality_and_truthiness() {
        let cases = [
            ("print nil == nil;", "true\n"),
            ("print 0 == false;", "false\n"),
            ("print \"1\" == 1;", "false\n"),
            ("print \"ab\" == \"a\" + \"b\";", "true\n"),
            ("print 1 != 2;", "true\n"),
            ("print !nil;", "true\n"),
            ("print !0;", "false\n"),
            ("print !\"\";", "false\n"),
            ("if (0) print \"zero is truthy\";", "zero is truthy\n"),
        ];

        for (source, expected) in cases {
            assert_prints(source, expected);
        }
    }

    #[test]
    fn test_operand_type_errors() {
        let cases = [
            (
                "print \"1\" + 1;",
                "Operands must be two numbers or two strings.\n[line 1]",
            ),
            ("print -\"a\";", "Operand must be a number.\n[line 1]"),
            ("print 1 < \"2\";", "Operands must be numbers.\n[line 1]"),
            ("print nil * 2;", "Operands must be numbers.\n[line 1]"),
        ];

        for (source, expected) in cases {
            assert_eq!(errors_of(source), vec![expected], "source: {}", source);
        }
    }

    #[test]
    fn test_runtime_error_stops_the_batch() {
        let (output, result) = run("print 1;\nprint x;\nprint 3;");

        assert_eq!(output, "1\n");

        let errors = result.expect_err("undefined variable");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_runtime());
        assert_eq!(errors[0].to_string(), "Undefined variable 'x'.\n[line 2]");
    }

    #[test]
    fn test_assigning_undeclared_variable() {
        assert_eq!(
            errors_of("x = 1;"),
            vec!["Undefined variable 'x'.\n[line 1]"]
        );
    }

    #[test]
    fn test_session_survives_runtime_errors() {
        let (mut interpreter, buffer) = interpreter();

        assert!(run_source(&mut interpreter, "var a = 1;").is_ok());
        assert!(run_source(&mut interpreter, "{ var a = 2; print missing; }").is_err());
        assert!(run_source(&mut interpreter, "print a;").is_ok());

        assert_eq!(buffer.contents(), "1\n");
    }

    #[test]
    fn test_variables_and_scopes() {
        assert_prints("var a; print a;", "nil\n");
        assert_prints("var a = 1; a = \"now a string\"; print a;", "now a string\n");
        assert_prints(
            "var a = 1; { var a = 2; print a; } print a;",
            "2\n1\n",
        );
        assert_prints("var a = 1; { a = 2; } print a;", "2\n");
        assert_prints("var a; var b; a = b = 3; print a + b;", "6\n");
    }

    #[test]
    fn test_control_flow() {
        assert_prints(
            "if (1 > 2) print \"yes\"; else print \"no\";",
            "no\n",
        );
        assert_prints(
            "var i = 0; while (i < 3) { print i; i = i + 1; }",
            "0\n1\n2\n",
        );
        assert_prints(
            "var sum = 0; for (var i = 1; i <= 4; i = i + 1) sum = sum + i; print sum;",
            "10\n",
        );
        assert_prints(
            "for (var i = 0; i < 2; i = i + 1) { var i = \"shadow\"; print i; }",
            "shadow\nshadow\n",
        );
    }

    #[test]
    fn test_logical_operators_return_operands_and_short_circuit() {
        assert_prints("print nil or \"yes\";", "yes\n");
        assert_prints("print false and 1;", "false\n");
        assert_prints("print 1 and 2;", "2\n");

        let source = "
            var called = false;
            fun touch() { called = true; return true; }
            print true or touch();
            print false and touch();
            print called;
        ";
        assert_prints(source, "true\nfalse\nfalse\n");
    }

    #[test]
    fn test_functions_and_recursion() {
        let source = "
            fun fib(n) {
              if (n < 2) return n;
              return fib(n - 1) + fib(n - 2);
            }
            print fib(10);
        ";
        assert_prints(source, "55\n");

        assert_prints("fun f() {} print f();", "nil\n");
        assert_prints("fun f() { return; } print f();", "nil\n");
        assert_prints("fun greet(name) { print \"hi \" + name; } greet(\"bob\");", "hi bob\n");
    }

    #[test]
    fn test_return_unwinds_nested_loops() {
        let source = "
            fun find() {
              while (true) {
                for (var i = 0; ; i = i + 1) {
                  if (i == 3) return i;
                }
              }
            }
            print find();
        ";

        assert_prints(source, "3\n");
    }

    #[test]
    fn test_closures_capture_environment() {
        let source = "
            fun makeCounter() {
              var i = 0;
              fun count() {
                i = i + 1;
                print i;
              }
              return count;
            }
            var counter = makeCounter();
            counter();
            counter();
            counter();
        ";
        assert_prints(source, "1\n2\n3\n");

        let source = "
            fun makeAdder(n) {
              fun add(x) { return x + n; }
              return add;
            }
            var addTwo = makeAdder(2);
            var addTen = makeAdder(10);
            print addTwo(1);
            print addTen(1);
        ";
        assert_prints(source, "3\n11\n");
    }

    #[test]
    fn test_call_errors() {
        assert_eq!(
            errors_of("fun f(a) {}\nf(1, 2);"),
            vec!["Expected 1 arguments but got 2.\n[line 2]"]
        );
        assert_eq!(
            errors_of("\"str\"();"),
            vec!["Can only call functions and classes.\n[line 1]"]
        );
        assert_eq!(
            errors_of("clock(1);"),
            vec!["Expected 0 arguments but got 1.\n[line 1]"]
        );
    }

    #[test]
    fn test_callable_display_and_identity() {
        assert_prints("fun f() {} print f;", "<fn f>\n");
        assert_prints("print clock;", "<native fn>\n");
        assert_prints("fun f() {} var g = f; print f == g;", "true\n");
    }

    #[test]
    fn test_clock_returns_seconds() {
        assert_prints("var t = clock(); print t > 1000000000;", "true\n");
        assert_prints("var a = clock(); var b = clock(); print b >= a;", "true\n");
    }

    #[test]
    fn test_evaluate_single_expression() {
        let (tokens, errors) = scan("(1 + 2) * 3 == 9 and \"done\"");
        assert!(errors.is_empty());

        let expr = Parser::new(&tokens).parse_expression().expect("valid expression");
        let (mut interpreter, _) = interpreter();

        match interpreter.evaluate(&expr) {
            Ok(Value::String(s)) => assert_eq!(s, "done"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

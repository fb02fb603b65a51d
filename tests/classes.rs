mod common;

#[cfg(test)]
mod class_tests {
    use super::common::{errors_of, output_of};

    #[test]
    fn test_fields_are_per_instance() {
        let source = "
            class Point {}
            var p = Point();
            var q = Point();
            p.x = 1;
            p.y = 2;
            q.x = 10;
            print p.x + p.y;
            print q.x;
        ";

        assert_eq!(output_of(source), "3\n10\n");
    }

    #[test]
    fn test_methods_see_this() {
        let source = "
            class Counter {
              init(n) { this.n = n; }
              bump() { this.n = this.n + 1; return this; }
              get() { return this.n; }
            }
            print Counter(4).bump().bump().get();
        ";

        assert_eq!(output_of(source), "6\n");
    }

    #[test]
    fn test_initializer_always_yields_the_instance() {
        let source = "
            class C { init() { this.v = 1; } }
            var c = C();
            print c.init() == c;
            print c.init();
        ";

        assert_eq!(output_of(source), "true\nC instance\n");
    }

    #[test]
    fn test_bare_return_ends_initializer_early() {
        let source = "
            class C {
              init(early) {
                this.a = 1;
                if (early) return;
                this.a = 2;
              }
            }
            print C(true).a;
            print C(false).a;
        ";

        assert_eq!(output_of(source), "1\n2\n");
    }

    #[test]
    fn test_inherited_methods_and_initializer() {
        let source = "
            class A {
              init(x) { this.x = x; }
              describe() { return \"x is \" + this.x; }
            }
            class B < A {}
            print B(\"seven\").describe();
        ";

        assert_eq!(output_of(source), "x is seven\n");
    }

    #[test]
    fn test_super_dispatch_is_static_this_is_dynamic() {
        let source = "
            class A {
              m() { print \"A.m on \" + this.tag(); }
              tag() { return \"A\"; }
            }
            class B < A {
              m() { print \"B.m\"; super.m(); }
              tag() { return \"B\"; }
            }
            class C < B {
              tag() { return \"C\"; }
            }
            C().m();
        ";

        assert_eq!(output_of(source), "B.m\nA.m on C\n");
    }

    #[test]
    fn test_super_method_can_be_taken_as_value() {
        let source = "
            class A { hi() { return \"hi from A\"; } }
            class B < A {
              grab() { return super.hi; }
            }
            var f = B().grab();
            print f();
        ";

        assert_eq!(output_of(source), "hi from A\n");
    }

    #[test]
    fn test_bound_method_keeps_its_receiver() {
        let source = "
            class Person {
              init(name) { this.name = name; }
              say() { print this.name; }
            }
            var jane = Person(\"jane\");
            var method = jane.say;
            var bill = Person(\"bill\");
            bill.say = method;
            bill.say();
            print method;
        ";

        assert_eq!(output_of(source), "jane\n<fn say>\n");
    }

    #[test]
    fn test_fields_shadow_methods() {
        let source = "
            class A { m() { return \"method\"; } }
            var a = A();
            print a.m();
            a.m = \"field\";
            print a.m;
        ";

        assert_eq!(output_of(source), "method\nfield\n");
    }

    #[test]
    fn test_this_inside_nested_function() {
        let source = "
            class A {
              m() {
                fun inner() { return this; }
                return inner;
              }
            }
            var a = A();
            print a.m()() == a;
        ";

        assert_eq!(output_of(source), "true\n");
    }

    #[test]
    fn test_methods_can_refer_to_their_class() {
        assert_eq!(
            output_of("class A { make() { return A(); } }\nprint A().make();"),
            "A instance\n"
        );
    }

    #[test]
    fn test_display_and_identity() {
        let source = "
            class Bagel {}
            var a = Bagel();
            var b = Bagel();
            print Bagel;
            print a;
            print a == b;
            print a == a;
        ";

        assert_eq!(output_of(source), "Bagel\nBagel instance\nfalse\ntrue\n");
    }

    #[test]
    fn test_property_errors() {
        assert_eq!(
            errors_of("class A {}\nA().missing;"),
            vec!["Undefined property 'missing'.\n[line 2]"]
        );
        assert_eq!(
            errors_of("var x = 1;\nprint x.y;"),
            vec!["Only instances have properties.\n[line 2]"]
        );
        assert_eq!(
            errors_of("var x = 1;\nx.y = 2;"),
            vec!["Only instances have fields.\n[line 2]"]
        );
    }

    #[test]
    fn test_undefined_super_method() {
        let source = "class A {}\nclass B < A { m() { super.nope(); } }\nB().m();";

        assert_eq!(
            errors_of(source),
            vec!["Undefined property 'nope'.\n[line 2]"]
        );
    }

    #[test]
    fn test_superclass_must_be_a_class() {
        let source = "var NotAClass = \"nope\";\nclass Sub < NotAClass {}";

        assert_eq!(
            errors_of(source),
            vec!["Superclass must be a class.\n[line 2]"]
        );
    }

    #[test]
    fn test_class_arity_comes_from_initializer() {
        assert_eq!(
            errors_of("class A { init(a, b) {} }\nA(1);"),
            vec!["Expected 2 arguments but got 1.\n[line 2]"]
        );
        assert_eq!(
            errors_of("class A {}\nA(1);"),
            vec!["Expected 0 arguments but got 1.\n[line 2]"]
        );
    }
}

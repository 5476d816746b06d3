use macro_grammar::grammars::{
    argument, arguments, class_constant, class_function, class_property, class_trait,
    return_type, type_, visibility_modifiers,
};
use macro_grammar::{optional, repeat, Capture, Grammar, Label, Parser};
use macro_lexer::TokenStream;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse(rule: impl Parser + 'static, source: &str) -> Capture {
    init_logging();
    Grammar::new(rule)
        .expect("grammar labels to be unique")
        .parse_source(source)
        .expect("source to match")
}

fn text(capture: &Capture, path: &[&str]) -> Option<String> {
    let mut node = capture;
    for name in path {
        node = node.get(name)?;
    }
    Some(node.text())
}

#[test]
fn test_visibility_modifiers_any_order() {
    let capture = parse(visibility_modifiers(None), "static public private $x");
    let modifiers = capture.get("visibilityModifiers").unwrap();
    let names: Vec<String> = modifiers
        .items()
        .iter()
        .filter_map(|m| text(m, &["visibilityModifier"]))
        .collect();
    assert_eq!(names, vec!["static", "public", "private"]);
}

#[test]
fn test_type_alternatives() {
    for (source, expected) in [
        ("string", "string"),
        ("array", "array"),
        ("callable", "callable"),
        (r"\stdClass", r"\stdClass"),
        (r"\Foo\Bar\Baz", r"\Foo\Bar\Baz"),
    ] {
        let capture = parse(type_(None), source);
        assert_eq!(text(&capture, &["type"]).as_deref(), Some(expected));
    }
}

#[test]
fn test_argument_parts() {
    let capture = parse(argument(None), r#"?stdClass $foo = new stdClass(1, "two", 3)"#);
    let arg = capture.get("argument").unwrap();
    assert_eq!(text(arg, &["argumentNullable"]).as_deref(), Some("?"));
    assert_eq!(text(arg, &["argumentType"]).as_deref(), Some("stdClass"));
    assert_eq!(text(arg, &["argumentName"]).as_deref(), Some("$foo"));
    assert_eq!(text(arg, &["argumentNew"]).as_deref(), Some("new"));
    assert_eq!(
        text(arg, &["argumentValue"]).as_deref(),
        Some(r#"stdClass(1, "two", 3)"#)
    );
}

#[test]
fn test_bare_argument() {
    let capture = parse(argument(None), "$foo");
    let arg = capture.get("argument").unwrap();
    assert!(arg.get("argumentType").is_none());
    assert!(arg.get("argumentNullable").unwrap().is_empty());
    assert!(arg.get("argumentValue").unwrap().is_empty());
}

#[test]
fn test_arguments_list() {
    let capture = parse(
        arguments(None),
        "string $foo, stdClass $bar = makeObject(), $baz = new stdClass()",
    );
    let items = capture.get("arguments").unwrap().items();
    let names: Vec<String> = items
        .iter()
        .filter_map(|a| text(a, &["argument", "argumentName"]))
        .collect();
    assert_eq!(names, vec!["$foo", "$bar", "$baz"]);
    assert_eq!(
        text(&items[1], &["argument", "argumentValue"]).as_deref(),
        Some("makeObject()")
    );
}

#[test]
fn test_empty_argument_list_is_absorbed_by_optional() {
    let mut stream = TokenStream::from_source(")").unwrap();
    assert!(arguments(None).parse(&mut stream).is_err());
    let capture = optional(arguments(None)).parse(&mut stream).unwrap();
    assert!(capture.get("arguments").is_none());
    assert_eq!(stream.index(), 0);

    let capture = parse(class_function(None), "function greet() { }");
    let function = capture.get("classFunction").unwrap();
    assert!(function.get("classFunctionArguments").is_none());
    assert!(function.get("classFunctionBody").unwrap().is_empty());
}

#[test]
fn test_class_constant() {
    let capture = parse(class_constant(None), "private const FOO = 'bar';");
    let constant = capture.get("classConstant").unwrap();
    assert_eq!(text(constant, &["classConstantName"]).as_deref(), Some("FOO"));
    assert_eq!(text(constant, &["classConstantValue"]).as_deref(), Some("'bar'"));
    assert_eq!(
        constant
            .find("classConstantVisibilityModifier")
            .map(Capture::text)
            .as_deref(),
        Some("private")
    );
}

#[test]
fn test_class_property_variants() {
    let capture = parse(class_property(None), "private string $foo;");
    let property = capture.get("classProperty").unwrap();
    assert_eq!(text(property, &["classPropertyType"]).as_deref(), Some("string"));
    assert_eq!(text(property, &["classPropertyName"]).as_deref(), Some("$foo"));
    assert!(property.get("classPropertyValue").unwrap().is_empty());

    let capture = parse(class_property(None), "private $foo = new Bar();");
    assert_eq!(
        text(&capture, &["classProperty", "classPropertyValue"]).as_deref(),
        Some("new Bar()")
    );

    let capture = parse(class_property(None), "$bare");
    let modifiers = capture.find("classPropertyVisibilityModifiers").unwrap();
    assert!(modifiers.items().is_empty());
}

#[test]
fn test_return_type() {
    let capture = parse(return_type(None), ": ?string");
    let rt = capture.get("returnType").unwrap();
    assert_eq!(text(rt, &["returnTypeNullable"]).as_deref(), Some("?"));
    assert_eq!(text(rt, &["returnTypeName"]).as_deref(), Some("string"));

    let capture = parse(return_type(None), ": array");
    assert!(capture.find("returnTypeNullable").unwrap().is_empty());
}

#[test]
fn test_class_function_end_to_end() {
    let capture = parse(
        class_function(None),
        r#"function greet(string $name = get()): ?string { print "hello {$name}"; }"#,
    );
    let function = capture.get("classFunction").unwrap();

    assert_eq!(text(function, &["classFunctionName"]).as_deref(), Some("greet"));

    let args = function.get("classFunctionArguments").unwrap().items();
    assert_eq!(args.len(), 1);
    let arg = args[0].get("classFunctionArgument").unwrap();
    assert_eq!(text(arg, &["classFunctionArgumentType"]).as_deref(), Some("string"));
    assert_eq!(text(arg, &["classFunctionArgumentName"]).as_deref(), Some("$name"));
    assert_eq!(text(arg, &["classFunctionArgumentValue"]).as_deref(), Some("get()"));

    let rt = function.get("classFunctionReturnType").unwrap();
    assert_eq!(text(rt, &["classFunctionReturnTypeName"]).as_deref(), Some("string"));
    assert_eq!(text(rt, &["classFunctionReturnTypeNullable"]).as_deref(), Some("?"));

    assert_eq!(
        text(function, &["classFunctionBody"]).as_deref(),
        Some(r#"print "hello {$name}";"#)
    );
}

#[test]
fn test_class_function_with_modifiers() {
    let capture = parse(
        class_function(None),
        "public static function make(): self { return new static(); }",
    );
    let modifiers: Vec<String> = capture
        .find("classFunctionVisibilityModifiers")
        .unwrap()
        .items()
        .iter()
        .map(Capture::text)
        .collect();
    assert_eq!(modifiers, vec!["public", "static"]);
}

#[test]
fn test_class_trait_end_to_end() {
    let capture = parse(
        repeat(class_trait(None)),
        "use Foo; use Bar { Bar::baz insteadof Foo; Foo::bar as protected boo; }",
    );

    let uses = capture.items();
    assert_eq!(uses.len(), 2);

    let names: Vec<String> = uses
        .iter()
        .flat_map(|u| u.find("classTraitNames").unwrap().items().to_vec())
        .map(|n| n.text())
        .collect();
    assert_eq!(names, vec!["Foo", "Bar"]);

    assert!(uses[0].find("classTraitBody").is_none());

    let aliases = uses[1].find("classTraitAliases").unwrap().items();
    assert_eq!(aliases.len(), 2);

    let first = aliases[0].get("classTraitAlias").unwrap();
    assert_eq!(text(first, &["classTraitAliasLeft"]).as_deref(), Some("Bar::baz"));
    assert_eq!(
        text(first, &["classTraitAliasLeft", "classTraitAliasLeftClass"]).as_deref(),
        Some("Bar")
    );
    assert!(first.get("classTraitAliasInsteadOf").is_some());
    assert_eq!(
        text(first, &["classTraitAliasRight", "classTraitAliasRightMethod"]).as_deref(),
        Some("Foo")
    );

    let second = aliases[1].get("classTraitAlias").unwrap();
    assert!(second.get("classTraitAliasInsteadOf").is_none());
    let as_clause = second.get("classTraitAliasAs").unwrap();
    assert_eq!(
        as_clause
            .find("classTraitAliasVisibilityModifier")
            .map(Capture::text)
            .as_deref(),
        Some("protected")
    );
    assert_eq!(
        text(second, &["classTraitAliasRight", "classTraitAliasRightMethod"]).as_deref(),
        Some("boo")
    );
}

#[test]
fn test_class_trait_lists_several_names() {
    let capture = parse(class_trait(None), r"use Foo, Bar, Foo\Bar\Baz;");
    let names: Vec<String> = capture
        .find("classTraitNames")
        .unwrap()
        .items()
        .iter()
        .filter_map(|n| text(n, &["classTraitName"]))
        .collect();
    assert_eq!(names, vec!["Foo", "Bar", r"Foo\Bar\Baz"]);
    assert!(capture.find("classTraitBody").is_none());
}

#[test]
fn test_class_trait_alias_without_visibility() {
    let capture = parse(class_trait(None), "use Foo { bar as baz; }");
    let aliases = capture.find("classTraitAliases").unwrap().items();
    assert_eq!(aliases.len(), 1);

    let alias = aliases[0].get("classTraitAlias").unwrap();
    assert!(alias.find("classTraitAliasLeftClass").is_none());
    assert_eq!(
        text(alias, &["classTraitAliasLeft", "classTraitAliasLeftMethod"]).as_deref(),
        Some("bar")
    );
    let modifiers = alias.find("classTraitAliasVisibilityModifiers").unwrap();
    assert!(modifiers.items().is_empty());
    assert_eq!(
        text(alias, &["classTraitAliasRight", "classTraitAliasRightMethod"]).as_deref(),
        Some("baz")
    );
}

#[test]
fn test_prefix_keeps_nested_labels_apart() {
    let prefix = Label::new("outer");
    let capture = parse(argument(Some(&prefix)), "int $x");
    let arg = capture.get("outerArgument").unwrap();
    assert_eq!(text(arg, &["outerArgumentType"]).as_deref(), Some("int"));
    assert_eq!(text(arg, &["outerArgumentName"]).as_deref(), Some("$x"));
}

#[test]
fn test_class_member_grammars_validate() {
    assert!(Grammar::new(class_function(None)).is_ok());
    assert!(Grammar::new(class_trait(None)).is_ok());
    assert!(Grammar::new(class_property(None)).is_ok());
    assert!(Grammar::new(class_constant(None)).is_ok());
}

#[test]
fn test_failed_rule_leaves_stream_untouched() {
    let mut stream = TokenStream::from_source("function broken( { }").unwrap();
    assert!(class_function(None).parse(&mut stream).is_err());
    assert_eq!(stream.index(), 0);
}

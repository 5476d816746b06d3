use macro_expander::expanders::{
    collapse, collapse_text, return_type, studly, trim, visibility_modifiers,
};
use macro_expander::{argument_with_nullability, ExpandError, GcMode, MacroEngine};
use macro_lexer::{is_keyword, TokenStream};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

/// Hands text straight back, recording how it was asked to expand.
#[derive(Default)]
struct Passthrough {
    calls: Vec<(String, GcMode)>,
}

impl MacroEngine for Passthrough {
    fn expand(&mut self, source: &str, _context: &str, gc: GcMode) -> Result<String, ExpandError> {
        self.calls.push((source.to_string(), gc));
        Ok(source.to_string())
    }
}

fn stream(source: &str) -> TokenStream {
    TokenStream::from_source(source).unwrap()
}

#[rstest]
#[case("some-thing_here", "SomeThingHere")]
#[case("already", "Already")]
#[case("order status", "OrderStatus")]
#[case("HTTP_client", "HTTPClient")]
fn test_studly(#[case] input: &str, #[case] expected: &str) {
    let mut engine = Passthrough::default();
    let output = studly(stream(input), &mut engine).unwrap();
    assert_eq!(output.to_string(), expected);
}

#[test]
fn test_trim() {
    let mut engine = Passthrough::default();
    let output = trim(stream("  \n  value  \n"), &mut engine).unwrap();
    assert_eq!(output.to_string(), "value");
}

#[test]
fn test_collapse() {
    let mut engine = Passthrough::default();
    let output = collapse(stream("a;\n   \n\n\nb;\n"), &mut engine).unwrap();
    assert_eq!(output.to_string(), "a;\n\nb;\n");
}

#[test]
fn test_visibility_modifiers_are_space_joined() {
    let mut engine = Passthrough::default();
    let output = visibility_modifiers(stream("public\n    static /* x */ final"), &mut engine).unwrap();
    assert_eq!(output.to_string(), "public static final");
}

#[rstest]
#[case("Foo()", "null", true)]
#[case("$foo = Foo()", "$foo = null", true)]
#[case("$foo = Foo ( 1, 2 )", "$foo = null", true)]
#[case("Bar $bar = new Bar(1)", "Bar $bar = null", true)]
#[case("string $name = 'x'", "string $name = 'x'", false)]
#[case("array $list = [ ]", "array $list = []", false)]
#[case("$n = count($list)", "$n = null", true)]
fn test_argument(#[case] input: &str, #[case] expected: &str, #[case] nullable: bool) {
    let mut engine = Passthrough::default();
    let expansion = argument_with_nullability(stream(input), &mut engine).unwrap();
    assert_eq!(expansion.stream.to_string(), expected);
    assert_eq!(expansion.nullable, nullable);
}

#[rstest]
#[case(": int", ": int")]
#[case(":   string", ": string")]
#[case(": int $x", ": int")]
#[case(": string {", ": string")]
#[case(": ?string", ": ?")]
fn test_return_type_keeps_one_token(#[case] input: &str, #[case] expected: &str) {
    let mut engine = Passthrough::default();
    let output = return_type(stream(input), &mut engine).unwrap();
    assert_eq!(output.to_string(), expected);
}

#[test]
fn test_return_type_of_empty_region() {
    let mut engine = Passthrough::default();
    assert!(return_type(stream(""), &mut engine).unwrap().is_empty());
}

#[test]
fn test_sub_expansions_are_not_retained() {
    let mut engine = Passthrough::default();
    studly(stream("a-b"), &mut engine).unwrap();
    argument_with_nullability(stream("$a = new A()"), &mut engine).unwrap();
    visibility_modifiers(stream("public static"), &mut engine).unwrap();

    assert_eq!(engine.calls.len(), 3);
    assert!(engine.calls.iter().all(|(_, gc)| *gc == GcMode::Disabled));
}

proptest! {
    #[test]
    fn argument_call_defaults_become_null(
        name in "[A-Z][a-z]{0,6}",
        gap in "[ \t\n]{0,3}",
    ) {
        prop_assume!(!is_keyword(&name));
        let mut engine = Passthrough::default();
        let source = format!("$value = {name}{gap}(){gap}");
        let expansion = argument_with_nullability(stream(&source), &mut engine).unwrap();
        prop_assert!(expansion.nullable);
        prop_assert!(expansion.stream.to_string().ends_with("null"));
    }

    #[test]
    fn collapse_is_idempotent(text in "[a \t\n]{0,40}") {
        let once = collapse_text(&text);
        prop_assert_eq!(collapse_text(&once), once);
    }
}

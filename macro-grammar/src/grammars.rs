//! Class-member grammars.
//!
//! Every rule takes an optional label prefix. Nested rules are called with a
//! prefix derived from their parent so that, for instance, the argument names
//! inside `classFunction` are captured as `classFunctionArgumentName` and never
//! collide with a top-level `argumentName`.

use crate::combinators::{buffer, expression, layer, ls, ns, optional, repeat, token};
use crate::label::Label;
use crate::traits::{Parser, ParserExt};
use crate::{chain, either};
use macro_lexer::TokenKind;

fn alias(prefix: Option<&Label>, name: &str) -> Label {
    Label::scoped(prefix, name)
}

/// `public`, `protected`, `private` and `static`, any number, any order.
pub fn visibility_modifiers(prefix: Option<&Label>) -> impl Parser {
    repeat(
        either![
            buffer("public"),
            buffer("protected"),
            buffer("private"),
            buffer("static"),
        ]
        .labeled(alias(prefix, "visibilityModifier")),
    )
    .labeled(alias(prefix, "visibilityModifiers"))
}

/// A qualified name or one of the `array` / `callable` pseudo-types.
pub fn type_(prefix: Option<&Label>) -> impl Parser {
    either![ns(), buffer("array"), buffer("callable")].labeled(alias(prefix, "type"))
}

/// `?Type $name = default`, where everything but the name is optional.
pub fn argument(prefix: Option<&Label>) -> impl Parser {
    let scope = alias(prefix, "argument");

    chain![
        optional(buffer("?")).labeled(alias(prefix, "argumentNullable")),
        optional(type_(Some(&scope))),
        token(TokenKind::Variable).labeled(alias(prefix, "argumentName")),
        optional(buffer("=")),
        optional(buffer("new")).labeled(alias(prefix, "argumentNew")),
        optional(expression()).labeled(alias(prefix, "argumentValue")),
    ]
    .labeled(alias(prefix, "argument"))
}

/// One or more comma-separated arguments. Wrap in `optional` for `()`.
pub fn arguments(prefix: Option<&Label>) -> impl Parser {
    ls(argument(prefix), buffer(",")).labeled(alias(prefix, "arguments"))
}

pub fn class_constant(prefix: Option<&Label>) -> impl Parser {
    let scope = alias(prefix, "classConstant");

    chain![
        optional(visibility_modifiers(Some(&scope))),
        buffer("const"),
        token(TokenKind::Identifier).labeled(alias(prefix, "classConstantName")),
        buffer("="),
        expression().labeled(alias(prefix, "classConstantValue")),
        optional(buffer(";")),
    ]
    .labeled(alias(prefix, "classConstant"))
}

pub fn class_property(prefix: Option<&Label>) -> impl Parser {
    let scope = alias(prefix, "classProperty");

    chain![
        visibility_modifiers(Some(&scope)),
        optional(type_(Some(&scope))),
        token(TokenKind::Variable).labeled(alias(prefix, "classPropertyName")),
        optional(buffer("=")),
        optional(expression()).labeled(alias(prefix, "classPropertyValue")),
        optional(buffer(";")),
    ]
    .labeled(alias(prefix, "classProperty"))
}

/// A method with an opaque body.
pub fn class_function(prefix: Option<&Label>) -> impl Parser {
    let scope = alias(prefix, "classFunction");

    chain![
        optional(visibility_modifiers(Some(&scope))),
        buffer("function"),
        ns().labeled(alias(prefix, "classFunctionName")),
        buffer("("),
        optional(arguments(Some(&scope))),
        buffer(")"),
        optional(return_type(Some(&scope))),
        buffer("{"),
        layer().labeled(alias(prefix, "classFunctionBody")),
        buffer("}"),
    ]
    .labeled(alias(prefix, "classFunction"))
}

/// `: ?Type`
pub fn return_type(prefix: Option<&Label>) -> impl Parser {
    chain![
        buffer(":"),
        optional(buffer("?")).labeled(alias(prefix, "returnTypeNullable")),
        type_(None).labeled(alias(prefix, "returnTypeName")),
    ]
    .labeled(alias(prefix, "returnType"))
}

/// `[Class::]method` on either side of a trait alias rule.
fn trait_reference(prefix: Option<&Label>, side: &str) -> impl Parser {
    let class = alias(prefix, &format!("classTraitAlias{side}Class"));
    let method = alias(prefix, &format!("classTraitAlias{side}Method"));

    chain![
        optional(chain![
            token(TokenKind::Identifier).labeled(class),
            buffer("::"),
        ]),
        token(TokenKind::Identifier).labeled(method),
    ]
    .labeled(alias(prefix, &format!("classTraitAlias{side}")))
}

/// `use A, B;` or `use A, B { A::m insteadof B; B::m as protected n; }`
pub fn class_trait(prefix: Option<&Label>) -> impl Parser {
    let alias_scope = alias(prefix, "classTraitAlias");

    let resolution = chain![
        trait_reference(prefix, "Left"),
        either![
            buffer("insteadof").labeled(alias(prefix, "classTraitAliasInsteadOf")),
            chain![
                buffer("as"),
                optional(visibility_modifiers(Some(&alias_scope))),
            ]
            .labeled(alias(prefix, "classTraitAliasAs")),
        ],
        trait_reference(prefix, "Right"),
        optional(buffer(";")),
    ]
    .labeled(alias(prefix, "classTraitAlias"));

    chain![
        buffer("use"),
        ls(ns().labeled(alias(prefix, "classTraitName")), buffer(","))
            .labeled(alias(prefix, "classTraitNames")),
        either![
            chain![
                buffer("{"),
                repeat(resolution).labeled(alias(prefix, "classTraitAliases")),
                buffer("}"),
            ]
            .labeled(alias(prefix, "classTraitBody")),
            optional(buffer(";")),
        ],
    ]
    .labeled(alias(prefix, "classTrait"))
}

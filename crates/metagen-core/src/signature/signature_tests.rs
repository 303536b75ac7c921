#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn named(name: &str, args: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Named {
        name: name.to_string(),
        args,
    }
}

#[test]
fn parse___nested_generics___builds_tree() {
    let expr = TypeExpr::parse("java.util.Map<String, java.util.List<com.example.Order>>").unwrap();

    assert_eq!(
        expr,
        named(
            "java.util.Map",
            vec![
                TypeExpr::named("String"),
                named("java.util.List", vec![TypeExpr::named("com.example.Order")]),
            ]
        )
    );
}

#[test]
fn parse___array_and_varargs___wrap_component() {
    let array = TypeExpr::parse("int[][]").unwrap();
    let varargs = TypeExpr::parse("String...").unwrap();

    assert_eq!(
        array,
        TypeExpr::Array(Box::new(TypeExpr::Array(Box::new(TypeExpr::named("int")))))
    );
    assert_eq!(varargs, TypeExpr::Array(Box::new(TypeExpr::named("String"))));
}

#[test]
fn parse___generic_array___keeps_args_on_component() {
    let expr = TypeExpr::parse("List<T>[]").unwrap();

    assert_eq!(
        expr,
        TypeExpr::Array(Box::new(named("List", vec![TypeExpr::named("T")])))
    );
}

#[test]
fn parse___upper_bounded_wildcard___keeps_bound() {
    let expr = TypeExpr::parse("List<? extends Number>").unwrap();

    assert_eq!(
        expr,
        named(
            "List",
            vec![TypeExpr::Wildcard(Some(Box::new(TypeExpr::named("Number"))))]
        )
    );
}

#[test_case("?" ; "unbounded")]
#[test_case("? super Integer" ; "lower bounded")]
fn parse___wildcard_without_upper_bound___is_unbounded(input: &str) {
    assert_eq!(TypeExpr::parse(input).unwrap(), TypeExpr::Wildcard(None));
}

#[test]
fn parse___identifier_starting_with_keyword___is_not_a_bound() {
    let expr = TypeExpr::parse("List<? extendsFoo>");

    assert!(expr.is_err());
}

#[test_case("" ; "empty")]
#[test_case("List<" ; "unterminated arguments")]
#[test_case("List<>" ; "empty arguments")]
#[test_case("Map<String Integer>" ; "missing comma")]
#[test_case("List<String>>" ; "trailing bracket")]
#[test_case("com..Order" ; "double dot")]
#[test_case("9Lives" ; "leading digit")]
fn parse___malformed_input___returns_error(input: &str) {
    assert!(TypeExpr::parse(input).is_err());
}

#[test]
fn parse___error___reports_offset() {
    let err = TypeExpr::parse("Map<String Integer>").unwrap_err();

    assert_eq!(err.offset, 11);
    assert_eq!(err.to_string(), "expected ',' or '>' at offset 11");
}

#[test]
fn bare_names___collects_unique_argumentless_names() {
    let expr = TypeExpr::parse("Map<K, List<V>>[]").unwrap();

    assert_eq!(expr.bare_names(), vec!["K", "V"]);
}

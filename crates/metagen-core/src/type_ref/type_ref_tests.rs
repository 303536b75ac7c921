#![allow(non_snake_case)]

use super::*;

fn map_of_lists() -> TypeRef {
    TypeRef::new(
        "java.util.Map",
        vec![
            TypeRef::raw("java.lang.String"),
            TypeRef::new("java.util.List", vec![TypeRef::raw("com.example.Order")]),
        ],
    )
}

#[test]
fn TypeRef___flatten___is_pre_order() {
    let flat = map_of_lists().flatten();

    let names: Vec<&str> = flat.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "java.util.Map",
            "java.lang.String",
            "java.util.List",
            "com.example.Order"
        ]
    );
    assert!(flat.iter().all(|t| t.args.is_empty()));
}

#[test]
fn TypeRef___array_of_generic___keeps_component_args() {
    let list = TypeRef::new("java.util.List", vec![TypeRef::raw("com.example.Order")]);

    let array = TypeRef::array_of(list.clone());

    assert_eq!(array.name, "java.util.List[]");
    assert!(array.is_array());
    assert_eq!(array.component(), Some(list));
}

#[test]
fn TypeRef___element___unwraps_nested_arrays() {
    let nested = TypeRef::array_of(TypeRef::array_of(TypeRef::raw("int")));

    assert_eq!(nested.element(), TypeRef::raw("int"));
}

#[test]
fn TypeRef___component_of_plain_type___is_none() {
    assert_eq!(TypeRef::raw("java.lang.String").component(), None);
}

#[test]
fn TypeRef___display___renders_generic_notation() {
    let array = TypeRef::array_of(TypeRef::new(
        "java.util.List",
        vec![TypeRef::raw("Order")],
    ));

    assert_eq!(
        map_of_lists().to_string(),
        "java.util.Map<java.lang.String, java.util.List<com.example.Order>>"
    );
    assert_eq!(array.to_string(), "java.util.List<Order>[]");
}

#[test]
fn TypeRef___simple_name___strips_package_and_outer_class() {
    assert_eq!(TypeRef::raw("com.example.Order").simple_name(), "Order");
    assert_eq!(TypeRef::raw("com.example.Outer$Inner").simple_name(), "Inner");
    assert_eq!(TypeRef::raw("int").simple_name(), "int");
}

#[test]
fn TypeRef___serialize___omits_empty_args() {
    let json = serde_json::to_string(&TypeRef::raw("int")).unwrap();

    assert_eq!(json, r#"{"name":"int"}"#);
}

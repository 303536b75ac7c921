//! Property-based tests for builtin family up-conversion

use metagen_core::{SourceExtractor, TypeModel, TypeRef};
use metagen_lang::{PrefixPackageMap, TargetLanguage, TypeMappingEngine, TypeTables};
use proptest::prelude::*;
use proptest::sample::select;
use std::sync::Arc;

const NUMBERS: &[&str] = &[
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Number",
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.util.concurrent.atomic.AtomicInteger",
    "java.util.concurrent.atomic.AtomicLong",
];

fn engine(language: TargetLanguage) -> TypeMappingEngine {
    let model = TypeModel::from_json("[]").unwrap();
    TypeMappingEngine::new(
        TypeTables::defaults(language).into_shared(),
        Arc::new(SourceExtractor::new(Arc::new(model))),
        Arc::new(PrefixPackageMap::default()),
    )
}

fn arb_language() -> impl Strategy<Value = TargetLanguage> {
    select(TargetLanguage::ALL.to_vec())
}

proptest! {
    /// Property: two members of the number family map to the same target
    #[test]
    fn proptest_number_family_maps_uniformly(
        language in arb_language(),
        a in select(NUMBERS),
        b in select(NUMBERS),
    ) {
        let engine = engine(language);

        let left = engine.map_type(&TypeRef::raw(a)).unwrap();
        let right = engine.map_type(&TypeRef::raw(b)).unwrap();
        prop_assert_eq!(left, right, "{} vs {} on {}", a, b, language);
    }

    /// Property: uniformity holds inside generic arguments and arrays too
    #[test]
    fn proptest_number_family_uniform_when_nested(
        language in arb_language(),
        a in select(NUMBERS),
        b in select(NUMBERS),
    ) {
        let engine = engine(language);
        let list_of = |name: &str| TypeRef::new("java.util.List", vec![TypeRef::raw(name)]);

        let lists = (
            engine.map_type(&list_of(a)).unwrap(),
            engine.map_type(&list_of(b)).unwrap(),
        );
        prop_assert_eq!(lists.0, lists.1);

        let arrays = (
            engine.map_type(&TypeRef::array_of(TypeRef::raw(a))).unwrap(),
            engine.map_type(&TypeRef::array_of(TypeRef::raw(b))).unwrap(),
        );
        prop_assert_eq!(arrays.0, arrays.1);
    }
}

//! Property-based tests for extraction over arbitrary reference graphs
//!
//! Type graphs with arbitrary (including cyclic) references must extract
//! without recursion, and dependency sets must only ever name types the
//! graph actually references.

use metagen_core::{EligibilityFilter, FieldDecl, SourceExtractor, TypeDecl, TypeModel, TypeRef};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const WRAPPERS: [&str; 3] = ["{}", "java.util.List<{}>", "{}[]"];

fn type_name(index: usize) -> String {
    format!("com.example.T{index}")
}

// Strategy: up to 12 types, each referencing up to 4 others through a wrapper
fn arb_graph() -> impl Strategy<Value = Vec<Vec<(usize, usize)>>> {
    (1usize..12).prop_flat_map(|size| {
        prop::collection::vec(
            prop::collection::vec((0..size, 0..WRAPPERS.len()), 0..4),
            size,
        )
    })
}

fn build_model(graph: &[Vec<(usize, usize)>]) -> TypeModel {
    let decls = graph.iter().enumerate().map(|(index, refs)| {
        let mut decl = TypeDecl::new(type_name(index));
        decl.fields = refs
            .iter()
            .enumerate()
            .map(|(slot, (target, wrapper))| FieldDecl {
                name: format!("f{slot}"),
                ty: WRAPPERS[*wrapper].replace("{}", &type_name(*target)),
                visibility: Default::default(),
                is_static: false,
                is_final: false,
                is_transient: false,
                is_volatile: false,
                annotations: Vec::new(),
            })
            .collect();
        decl
    });
    TypeModel::from_decls(decls).unwrap()
}

proptest! {
    /// Property: every type of any graph extracts, and dependencies are exactly
    /// the referenced user types plus the builtin wrappers used
    #[test]
    fn proptest_extract_arbitrary_graph(graph in arb_graph()) {
        let model = Arc::new(build_model(&graph));
        let extractor = SourceExtractor::new(model.clone());

        for (index, refs) in graph.iter().enumerate() {
            let meta = extractor.extract(&type_name(index)).unwrap();

            let expected_user: BTreeSet<String> = refs.iter().map(|(t, _)| type_name(*t)).collect();
            let eligible = EligibilityFilter::default().eligible(&meta.dependencies, model.as_ref());
            prop_assert_eq!(eligible, expected_user);
            prop_assert!(meta.dependencies.iter().all(|t| !t.is_array()));
        }

        prop_assert_eq!(extractor.cache_len(), graph.len());
    }

    /// Property: repeated extraction always yields the cached instance
    #[test]
    fn proptest_extract_is_single_instance(graph in arb_graph(), repeats in 2usize..5) {
        let model = Arc::new(build_model(&graph));
        let extractor = SourceExtractor::new(model);
        let name = type_name(graph.len() - 1);

        let first = extractor.extract(&name).unwrap();
        for _ in 1..repeats {
            let again = extractor.extract(&name).unwrap();
            prop_assert!(Arc::ptr_eq(&first, &again));
        }
    }

    /// Property: flattening lists the owner first and one entry per type node
    #[test]
    fn proptest_flatten_counts_nodes(depth in 0usize..6) {
        let mut ty = TypeRef::raw("com.example.Leaf");
        for _ in 0..depth {
            ty = TypeRef::new("java.util.List", vec![ty]);
        }

        let flat = ty.flatten();

        prop_assert_eq!(flat.len(), depth + 1);
        prop_assert_eq!(&flat[0].name, &ty.name);
        prop_assert_eq!(flat.last().map(|t| t.name.as_str()), Some("com.example.Leaf"));
    }
}

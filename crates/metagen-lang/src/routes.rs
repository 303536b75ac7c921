//! HTTP route combination and deduplication for service nodes.

use metagen_core::annotations::HttpMethod;

/// Join a class-level route prefix and a method-level pattern.
///
/// Empty strings count as absent. Exactly one `/` separates the two parts,
/// and a trailing `/*` on the prefix is replaced by the pattern.
///
/// # Examples
///
/// ```
/// use metagen_lang::routes::combine_paths;
///
/// assert_eq!(combine_paths(Some("/order"), Some("/create")).as_deref(), Some("/order/create"));
/// assert_eq!(combine_paths(Some("/order/"), Some("create")).as_deref(), Some("/order/create"));
/// assert_eq!(combine_paths(None, Some("/health")).as_deref(), Some("/health"));
/// assert_eq!(combine_paths(Some(""), None), None);
/// ```
pub fn combine_paths(prefix: Option<&str>, pattern: Option<&str>) -> Option<String> {
    let prefix = prefix.filter(|p| !p.is_empty());
    let pattern = pattern.filter(|p| !p.is_empty());
    match (prefix, pattern) {
        (None, None) => None,
        (Some(prefix), None) => Some(prefix.to_string()),
        (None, Some(pattern)) => Some(pattern.to_string()),
        (Some(prefix), Some(pattern)) => {
            let prefix = prefix.strip_suffix("/*").unwrap_or(prefix);
            let head = prefix.trim_end_matches('/');
            let tail = pattern.trim_start_matches('/');
            Some(match (head.is_empty(), tail.is_empty()) {
                (true, true) => "/".to_string(),
                (true, false) => format!("/{tail}"),
                (false, true) => head.to_string(),
                (false, false) => format!("{head}/{tail}"),
            })
        }
    }
}

/// Identity of an HTTP endpoint.
///
/// The path is the combined route path; an absent path is keyed as `""`,
/// the same URL as the controller root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub methods: Vec<HttpMethod>,
    pub path: String,
}

impl RouteKey {
    pub fn new(mut methods: Vec<HttpMethod>, path: impl Into<String>) -> Self {
        methods.sort_unstable();
        methods.dedup();
        Self {
            methods,
            path: path.into(),
        }
    }
}

/// Keep the first item for each route key, in order. Items without a key
/// are dropped.
pub fn dedup_routes<T>(items: Vec<T>, key: impl Fn(&T) -> Option<RouteKey>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| key(item).is_some_and(|k| seen.insert(k)))
        .collect()
}

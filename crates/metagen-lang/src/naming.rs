//! Naming convention utilities for target metadata.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `snakeCase` |
//! | `camelCase` | [`to_snake_case`] | `camel_case` |
//! | `word` | [`capitalize`] | `Word` |
//! | `Word` | [`decapitalize`] | `word` |
//! | `getTotalAmount` | [`accessor_property`] | `totalAmount` |

/// Convert snake_case to camelCase. camelCase input is returned unchanged.
///
/// # Examples
///
/// ```
/// use metagen_lang::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("total_amount"), "totalAmount");
/// assert_eq!(to_camel_case("totalAmount"), "totalAmount");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to snake_case.
///
/// Runs of capitals stay together: `orderID` becomes `order_id`.
///
/// # Examples
///
/// ```
/// use metagen_lang::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("totalAmount"), "total_amount");
/// assert_eq!(to_snake_case("orderID"), "order_id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use metagen_lang::naming::capitalize;
///
/// assert_eq!(capitalize("order"), "Order");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter, keeping acronyms such as `URL` intact.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let second_upper = s.chars().nth(1).is_some_and(char::is_uppercase);
    if second_upper {
        return s.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

/// Property name of a `getX` or `isX` accessor.
///
/// # Examples
///
/// ```
/// use metagen_lang::naming::accessor_property;
///
/// assert_eq!(accessor_property("getTotalAmount"), Some("totalAmount".to_string()));
/// assert_eq!(accessor_property("isPaid"), Some("paid".to_string()));
/// assert_eq!(accessor_property("getaway"), None);
/// ```
pub fn accessor_property(method_name: &str) -> Option<String> {
    let rest = method_name
        .strip_prefix("get")
        .or_else(|| method_name.strip_prefix("is"))?;
    if !rest.starts_with(|c: char| c.is_uppercase()) {
        return None;
    }
    Some(decapitalize(rest))
}

//! Identifier normalization.
//!
//! Catalog identifiers arrive as snake_case, usually carrying the `tb_`
//! table prefix. Every case conversion strips that prefix exactly once
//! before doing its work.

/// Literal prefix carried by table names in the catalog.
pub const TABLE_PREFIX: &str = "tb_";

/// Remove a single leading [`TABLE_PREFIX`].
pub fn strip_table_prefix(s: &str) -> &str {
    s.strip_prefix(TABLE_PREFIX).unwrap_or(s)
}

/// Normalize a raw catalog identifier (already snake_case).
///
/// `tb_Order_Item` -> `order_item`
pub fn normalize_catalog_identifier(s: &str) -> String {
    strip_table_prefix(s).to_lowercase()
}

/// Convert a camelCase or PascalCase name to snake_case.
///
/// `OrderItem` -> `order_item`. Unlike [`normalize_catalog_identifier`]
/// this inserts separators before uppercase letters.
pub fn to_snake_from_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for c in strip_table_prefix(s).chars() {
        if c.is_uppercase() {
            if !result.is_empty() {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else if c == '-' {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert an identifier to PascalCase (e.g., "tb_order_item" -> "OrderItem")
pub fn to_pascal_case(s: &str) -> String {
    capitalize_words(strip_table_prefix(s))
}

/// Convert an identifier to camelCase (e.g., "tb_order_item" -> "orderItem")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert an identifier to kebab-case (e.g., "tb_order_item" -> "order-item")
pub fn to_kebab_case(s: &str) -> String {
    normalize_catalog_identifier(s).replace('_', "-")
}

/// Derive a project name from a database name.
///
/// The database name carries no table prefix, so nothing is stripped:
/// `sales-db_main` -> `SalesDbMain`.
pub fn project_name(database: &str) -> String {
    capitalize_words(database)
}

fn capitalize_words(s: &str) -> String {
    s.split(['_', '-'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix_once() {
        assert_eq!(strip_table_prefix("tb_order_item"), "order_item");
        assert_eq!(strip_table_prefix("tb_tb_order"), "tb_order");
        assert_eq!(strip_table_prefix("order"), "order");
        assert_eq!(strip_table_prefix("xtb_order"), "xtb_order");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("tb_order_item"), "OrderItem");
        assert_eq!(to_pascal_case("optin"), "Optin");
        assert_eq!(to_pascal_case("tb_tb_x"), "TbX");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("tb_order_item"), "orderItem");
        assert_eq!(to_camel_case("external_id"), "externalId");
        assert_eq!(to_camel_case("label"), "label");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_pascal_and_camel_differ_only_in_first_char() {
        for input in ["tb_order_item", "created_at", "a_b_c"] {
            let pascal = to_pascal_case(input);
            let camel = to_camel_case(input);
            assert_eq!(pascal[1..], camel[1..]);
            assert_eq!(pascal[..1].to_lowercase(), camel[..1]);
        }
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("tb_order_item"), "order-item");
        assert_eq!(to_kebab_case("tb_optin"), "optin");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_normalize_catalog_identifier() {
        assert_eq!(normalize_catalog_identifier("tb_order_item"), "order_item");
        assert_eq!(normalize_catalog_identifier("Order_Item"), "order_item");
        assert_eq!(normalize_catalog_identifier(""), "");
    }

    #[test]
    fn test_to_snake_from_camel() {
        assert_eq!(to_snake_from_camel("OrderItem"), "order_item");
        assert_eq!(to_snake_from_camel("orderItem"), "order_item");
        assert_eq!(to_snake_from_camel("order_item"), "order_item");
        assert_eq!(to_snake_from_camel("order-item"), "order_item");
        assert_eq!(to_snake_from_camel(""), "");
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("sales_db"), "SalesDb");
        assert_eq!(project_name("sales-db"), "SalesDb");
        assert_eq!(project_name("tb_data"), "TbData");
        assert_eq!(project_name(""), "");
    }
}

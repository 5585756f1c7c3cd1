//! Naming conventions for generated TypeScript identifiers.

use nestforge_core::{to_camel_case, to_kebab_case, to_pascal_case};

/// How catalog identifiers become TypeScript names.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Table name to type stem (e.g., "tb_order_item" -> "OrderItem")
    pub table_to_type: fn(&str) -> String,
    /// Table name to file stem (e.g., "tb_order_item" -> "order-item")
    pub table_to_file: fn(&str) -> String,
    /// Column name to entity property (e.g., "external_id" -> "externalId")
    pub column_to_property: fn(&str) -> String,
    /// Words that cannot be used as bare identifiers.
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "delete" -> "_delete")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, table: &str) -> String {
        (self.table_to_type)(table)
    }

    pub fn file_name(&self, table: &str) -> String {
        (self.table_to_file)(table)
    }

    /// Transform and make safe for use as a property or variable name.
    pub fn property_name(&self, column: &str) -> String {
        self.safe_name(&(self.column_to_property)(column))
    }
}

fn escape_with_underscore(name: &str) -> String {
    format!("_{}", name)
}

/// Conventions of generated NestJS sources.
pub const NEST_NAMING: NamingConvention = NamingConvention {
    table_to_type: to_pascal_case,
    table_to_file: to_kebab_case,
    column_to_property: to_camel_case,
    reserved_words: &[
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "let",
        "static",
        "yield",
        "await",
    ],
    escape_reserved: escape_with_underscore,
};

//! TypeScript AST builders.
//!
//! Small, declarative nodes for the constructs NestJS sources are made of:
//! imports, decorators, classes with decorated members, interfaces and
//! object/array literals. Every node implements
//! [`Renderable`](crate::builder::Renderable).

mod arrays;
mod class;
mod decorators;
mod imports;
mod interface;
mod objects;

pub use arrays::JsArray;
pub use class::{Class, Method, Param, Property};
pub use decorators::Decorator;
pub use imports::{Import, ImportSet};
pub use interface::{Interface, InterfaceField};
pub use objects::JsObject;

/// Quote a value as a single-quoted TypeScript string literal.
pub fn ts_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_string_escapes() {
        assert_eq!(ts_string("optin"), "'optin'");
        assert_eq!(ts_string("it's"), "'it\\'s'");
        assert_eq!(ts_string("a\\b"), "'a\\\\b'");
        assert_eq!(ts_string("two\nlines"), "'two\\nlines'");
    }
}

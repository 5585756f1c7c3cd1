//! TypeScript/JavaScript array literal builder.

use super::ts_string;

/// An element in an array literal.
#[derive(Debug, Clone)]
enum ArrayElement {
    /// A literal string value (will be quoted).
    String(String),
    /// A raw expression (will not be quoted).
    Raw(String),
}

/// Builder for array literals, rendered on a single line.
#[derive(Debug, Clone, Default)]
pub struct JsArray {
    elements: Vec<ArrayElement>,
}

impl JsArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array of raw expressions (identifiers, calls).
    pub fn from_raw<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: iter
                .into_iter()
                .map(|s| ArrayElement::Raw(s.into()))
                .collect(),
        }
    }

    /// Add a string element (will be quoted).
    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.elements.push(ArrayElement::String(value.into()));
        self
    }

    /// Add a raw expression element (will not be quoted).
    pub fn raw(mut self, value: impl Into<String>) -> Self {
        self.elements.push(ArrayElement::Raw(value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build the array literal as a string.
    pub fn build(&self) -> String {
        let elements = self
            .elements
            .iter()
            .map(|e| match e {
                ArrayElement::String(s) => ts_string(s),
                ArrayElement::Raw(s) => s.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_array() {
        assert_eq!(JsArray::new().build(), "[]");
    }

    #[test]
    fn test_raw_elements() {
        let arr = JsArray::from_raw(["OptinService", "JwtAuthGuard"]).build();
        assert_eq!(arr, "[OptinService, JwtAuthGuard]");
    }

    #[test]
    fn test_mixed_elements() {
        let arr = JsArray::new().string("*").raw("origin").build();
        assert_eq!(arr, "['*', origin]");
    }
}

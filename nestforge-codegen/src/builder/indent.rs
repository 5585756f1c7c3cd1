//! Indentation unit for rendered code.

/// The text written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// Two spaces, as prettier formats TypeScript and JSON.
    pub const TYPESCRIPT: Self = Self("  ");

    pub const TAB: Self = Self("\t");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CodeBuilder, CodeFragment};

    #[test]
    fn test_tab_indent() {
        let mut builder = CodeBuilder::new(Indent::TAB);
        builder.emit(&CodeFragment::braced("{", vec![CodeFragment::line("a;")]));
        assert_eq!(builder.build(), "{\n\ta;\n}\n");
    }
}

//! TypeScript import builder.

use indexmap::{IndexMap, IndexSet};

use crate::builder::{CodeFragment, Renderable};

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    named: IndexSet<String>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            named: IndexSet::new(),
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.insert(name.into());
        self
    }

    /// Import several named exports.
    pub fn named_all(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.named.extend(names.into_iter().map(Into::into));
        self
    }

    /// Module specifier this import reads from.
    pub fn from(&self) -> &str {
        &self.from
    }

    fn merge(&mut self, other: Import) {
        if self.default.is_none() {
            self.default = other.default;
        }
        self.named.extend(other.named);
    }

    /// Render the import statement.
    pub fn build(&self) -> String {
        let named = self
            .named
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => format!("import {} from '{}';", def, self.from),
            (Some(def), false) => {
                format!("import {}, {{ {} }} from '{}';", def, named, self.from)
            }
            (None, false) => format!("import {{ {} }} from '{}';", named, self.from),
            (None, true) => format!("import '{}';", self.from),
        }
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.build())]
    }
}

/// Ordered set of imports, merged per module specifier.
///
/// Generators add imports as they discover what a file needs; the set keeps
/// first-seen order so output stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    imports: IndexMap<String, Import>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import, merging names into an existing one for the same module.
    pub fn add(&mut self, import: Import) -> &mut Self {
        match self.imports.get_mut(import.from()) {
            Some(existing) => existing.merge(import),
            None => {
                self.imports.insert(import.from().to_string(), import);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn into_vec(self) -> Vec<Import> {
        self.imports.into_values().collect()
    }
}

//! A TypeScript source file assembled from AST nodes.

use crate::{
    ast::{Import, ImportSet},
    builder::{CodeBuilder, CodeFragment, Renderable},
};

/// Imports followed by top-level declarations.
///
/// Imports from the same module merge into one statement. Declarations
/// are separated by one blank line.
#[derive(Default)]
pub struct CodeFile {
    imports: ImportSet,
    body: Vec<Vec<CodeFragment>>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.add(import);
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::typescript();

        for import in self.imports.clone().into_vec() {
            builder.emit(&import);
        }
        if !self.imports.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, declaration) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            builder.emit(declaration);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Interface;

    #[test]
    fn test_empty_file() {
        assert_eq!(CodeFile::new().render(), "");
    }

    #[test]
    fn test_imports_are_merged() {
        let file = CodeFile::new()
            .import(Import::new("@nestjs/common").named("Module"))
            .import(Import::new("@nestjs/common").named("Global"));
        assert_eq!(file.render(), "import { Module, Global } from '@nestjs/common';\n");
    }

    #[test]
    fn test_declarations_separated_by_blank_line() {
        let file = CodeFile::new()
            .import(Import::new("./optin.interface").named("IOptinQueryDTO"))
            .add(Interface::new("IA").field("a", "string"))
            .add(CodeFragment::line("bootstrap();"));

        assert_eq!(
            file.render(),
            "import { IOptinQueryDTO } from './optin.interface';\n\nexport interface IA {\n  a: string;\n}\n\nbootstrap();\n"
        );
    }
}

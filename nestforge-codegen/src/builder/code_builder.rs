//! Fragment renderer producing indented TypeScript text.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates [`CodeFragment`]s into text.
///
/// ```
/// use nestforge_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::typescript();
/// builder.emit(&CodeFragment::braced(
///     "bootstrap() {",
///     vec![CodeFragment::line("return app;")],
/// ));
///
/// assert_eq!(builder.build(), "bootstrap() {\n  return app;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            out: String::new(),
        }
    }

    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    /// Append one line at the current depth. Empty lines carry no indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(self.indent.as_str());
            }
            self.out.push_str(s);
        }
        self.out.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.nested(body);
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Indent(body) => self.nested(body),
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::JsDoc(text) => {
                self.push_line(&format!("/** {} */", text));
            }
        }
    }

    pub fn build(self) -> String {
        self.out
    }

    fn nested(&mut self, body: Vec<CodeFragment>) {
        self.depth += 1;
        for f in body {
            self.apply_fragment(f);
        }
        self.depth -= 1;
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::typescript()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_has_no_trailing_indent() {
        let mut builder = CodeBuilder::typescript();
        builder.emit(&CodeFragment::Indent(vec![CodeFragment::line("")]));
        assert_eq!(builder.build(), "\n");
    }

    #[test]
    fn test_emit_nested_blocks() {
        let node = vec![CodeFragment::braced(
            "try {",
            vec![CodeFragment::braced(
                "if (!row) {",
                vec![CodeFragment::line("throw error;")],
            )],
        )];

        let mut builder = CodeBuilder::typescript();
        builder.emit(&node);
        assert_eq!(
            builder.build(),
            "try {\n  if (!row) {\n    throw error;\n  }\n}\n"
        );
    }

    #[test]
    fn test_emit_jsdoc_inside_class() {
        let mut builder = CodeBuilder::typescript();
        builder.emit(&CodeFragment::braced(
            "export class OptinQueryDTO {",
            vec![
                CodeFragment::jsdoc("Public identifier"),
                CodeFragment::line("externalId: string;"),
            ],
        ));
        assert_eq!(
            builder.build(),
            "export class OptinQueryDTO {\n  /** Public identifier */\n  externalId: string;\n}\n"
        );
    }
}

//! TypeScript decorator builder.

use super::{objects::JsObject, ts_string};
use crate::builder::{CodeFragment, Renderable};

/// A decorator application such as `@Column({ type: 'uuid' })`.
#[derive(Debug, Clone)]
pub struct Decorator {
    name: String,
    args: Vec<String>,
}

impl Decorator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add a raw expression argument.
    pub fn arg(mut self, expr: impl Into<String>) -> Self {
        self.args.push(expr.into());
        self
    }

    /// Add a quoted string argument.
    pub fn string_arg(self, value: &str) -> Self {
        self.arg(ts_string(value))
    }

    /// Add an object argument, skipped entirely when the object is empty.
    pub fn object_arg(self, value: JsObject) -> Self {
        if value.is_empty() {
            self
        } else {
            self.arg(value.build_inline())
        }
    }

    pub fn build(&self) -> String {
        format!("@{}({})", self.name, self.args.join(", "))
    }
}

impl Renderable for Decorator {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.build())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_decorator() {
        assert_eq!(Decorator::new("Injectable").build(), "@Injectable()");
    }

    #[test]
    fn test_decorator_with_args() {
        let d = Decorator::new("ManyToOne")
            .arg("() => OptinEntity")
            .object_arg(JsObject::new().raw("eager", "false"));
        assert_eq!(d.build(), "@ManyToOne(() => OptinEntity, { eager: false })");
    }

    #[test]
    fn test_empty_object_arg_is_omitted() {
        let d = Decorator::new("Column").object_arg(JsObject::new());
        assert_eq!(d.build(), "@Column()");
    }

    #[test]
    fn test_string_arg() {
        assert_eq!(
            Decorator::new("Entity").string_arg("tb_optin").build(),
            "@Entity('tb_optin')"
        );
    }
}

//! TypeScript/JavaScript object literal builder.

use super::{arrays::JsArray, ts_string};
use crate::builder::{CodeFragment, Renderable};

/// The value of an object property.
#[derive(Debug, Clone)]
enum PropertyValue {
    /// A literal string value (will be quoted).
    String(String),
    /// A raw expression (will not be quoted).
    Raw(String),
    /// A nested object.
    Object(JsObject),
    /// An array literal.
    Array(JsArray),
    /// A variable of the same name as the key (`{ externalId }`).
    Shorthand,
}

#[derive(Debug, Clone)]
struct Property {
    key: String,
    value: PropertyValue,
}

/// Builder for object literals.
///
/// Renders either inline (`{ name: 'id', type: 'int' }`, used in decorator
/// arguments) or as a multi-line block through [`Renderable`].
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<Property>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value,
        });
        self
    }

    /// Add a property with a string value (will be quoted).
    pub fn string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, PropertyValue::String(value.into()))
    }

    /// Add a property with a raw expression value (will not be quoted).
    pub fn raw(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, PropertyValue::Raw(value.into()))
    }

    /// Add a property with a nested object value.
    pub fn object(self, key: impl Into<String>, value: JsObject) -> Self {
        self.push(key, PropertyValue::Object(value))
    }

    /// Add an array property.
    pub fn array(self, key: impl Into<String>, value: JsArray) -> Self {
        self.push(key, PropertyValue::Array(value))
    }

    /// Add a shorthand property where key equals the variable name.
    pub fn shorthand(self, name: impl Into<String>) -> Self {
        self.push(name, PropertyValue::Shorthand)
    }

    /// Conditionally add a string property using an Option.
    pub fn string_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.string(key, v),
            None => self,
        }
    }

    /// Conditionally add a raw property.
    pub fn raw_if(self, condition: bool, key: impl Into<String>, value: impl Into<String>) -> Self {
        if condition { self.raw(key, value) } else { self }
    }

    /// Conditionally add a raw property using an Option.
    pub fn raw_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.raw(key, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Render on a single line.
    pub fn build_inline(&self) -> String {
        if self.properties.is_empty() {
            return "{}".to_string();
        }
        let props = self
            .properties
            .iter()
            .map(Property::inline)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {} }}", props)
    }

    /// Render as a multi-line block opened by `{prefix}{` and closed by `}{suffix}`.
    ///
    /// `JsObject::new().raw("a", "1").to_block("@Module(", ")")` renders
    /// `@Module({` / `  a: 1,` / `})`.
    pub fn to_block(&self, prefix: &str, suffix: &str) -> CodeFragment {
        CodeFragment::block(
            format!("{}{{", prefix),
            self.properties_to_fragments(),
            Some(format!("}}{}", suffix)),
        )
    }

    fn properties_to_fragments(&self) -> Vec<CodeFragment> {
        self.properties
            .iter()
            .map(|prop| match &prop.value {
                PropertyValue::Object(obj) if !obj.is_empty() => {
                    obj.to_block(&format!("{}: ", prop.key), ",")
                }
                _ => CodeFragment::Line(format!("{},", prop.inline())),
            })
            .collect()
    }
}

impl Property {
    fn inline(&self) -> String {
        match &self.value {
            PropertyValue::Shorthand => self.key.clone(),
            value => format!("{}: {}", self.key, value.inline()),
        }
    }
}

impl PropertyValue {
    fn inline(&self) -> String {
        match self {
            PropertyValue::Shorthand => String::new(),
            PropertyValue::String(s) => ts_string(s),
            PropertyValue::Raw(s) => s.clone(),
            PropertyValue::Object(obj) => obj.build_inline(),
            PropertyValue::Array(arr) => arr.build(),
        }
    }
}

impl Renderable for JsObject {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.to_block("", "")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_empty_object_inline() {
        assert_eq!(JsObject::new().build_inline(), "{}");
    }

    #[test]
    fn test_inline_object() {
        let obj = JsObject::new()
            .string("name", "external_id")
            .string("type", "uuid")
            .raw("nullable", "true");
        assert_eq!(
            obj.build_inline(),
            "{ name: 'external_id', type: 'uuid', nullable: true }"
        );
    }

    #[test]
    fn test_optional_properties() {
        let obj = JsObject::new()
            .string_opt("default", None::<&str>)
            .raw_opt("length", Some("100"))
            .raw_if(false, "nullable", "true");
        assert_eq!(obj.build_inline(), "{ length: 100 }");
    }

    #[test]
    fn test_shorthand_inline() {
        let obj = JsObject::new().object("where", JsObject::new().shorthand("externalId"));
        assert_eq!(obj.build_inline(), "{ where: { externalId } }");
    }

    #[test]
    fn test_block_with_nested_object() {
        let obj = JsObject::new()
            .array("imports", JsArray::from_raw(["HttpModule"]))
            .object("options", JsObject::new().raw("isGlobal", "true"))
            .shorthand("providers");

        assert_eq!(
            render(&obj.to_block("@Module(", ")")),
            "@Module({\n  imports: [HttpModule],\n  options: {\n    isGlobal: true,\n  },\n  providers,\n})\n"
        );
    }
}

//! TypeScript class builder with decorated members.

use super::decorators::Decorator;
use crate::builder::{CodeFragment, Renderable};

/// A class property, e.g. `@Column() label: string;`.
#[derive(Debug, Clone)]
pub struct Property {
    decorators: Vec<Decorator>,
    modifiers: Option<String>,
    name: String,
    ty: String,
    optional: bool,
    initializer: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            decorators: Vec::new(),
            modifiers: None,
            name: name.into(),
            ty: ty.into(),
            optional: false,
            initializer: None,
        }
    }

    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn decorators(mut self, decorators: impl IntoIterator<Item = Decorator>) -> Self {
        self.decorators.extend(decorators);
        self
    }

    /// Access modifiers such as `private readonly`.
    pub fn modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = Some(modifiers.into());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn initializer(mut self, expr: impl Into<String>) -> Self {
        self.initializer = Some(expr.into());
        self
    }

    fn declaration(&self) -> String {
        let modifiers = self
            .modifiers
            .as_deref()
            .map(|m| format!("{} ", m))
            .unwrap_or_default();
        let optional = if self.optional { "?" } else { "" };
        let init = self
            .initializer
            .as_deref()
            .map(|i| format!(" = {}", i))
            .unwrap_or_default();
        format!("{}{}{}: {}{};", modifiers, self.name, optional, self.ty, init)
    }
}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = decorator_lines(&self.decorators);
        fragments.push(CodeFragment::Line(self.declaration()));
        fragments
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    decorator: Option<Decorator>,
    modifiers: Option<String>,
    name: String,
    ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            decorator: None,
            modifiers: None,
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorator = Some(decorator);
        self
    }

    pub fn modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = Some(modifiers.into());
        self
    }

    fn build(&self) -> String {
        let mut out = String::new();
        if let Some(d) = &self.decorator {
            out.push_str(&d.build());
            out.push(' ');
        }
        if let Some(m) = &self.modifiers {
            out.push_str(m);
            out.push(' ');
        }
        out.push_str(&self.name);
        out.push_str(": ");
        out.push_str(&self.ty);
        out
    }
}

/// A class method (or the constructor).
#[derive(Debug, Clone)]
pub struct Method {
    decorators: Vec<Decorator>,
    visibility: Option<&'static str>,
    is_async: bool,
    name: String,
    params: Vec<Param>,
    returns: Option<String>,
    body: Vec<CodeFragment>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            decorators: Vec::new(),
            visibility: None,
            is_async: false,
            name: name.into(),
            params: Vec::new(),
            returns: None,
            body: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        Self::new("constructor")
    }

    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Some("private");
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    pub fn body(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    fn signature(&self) -> String {
        let visibility = self.visibility.map(|v| format!("{} ", v)).unwrap_or_default();
        let async_kw = if self.is_async { "async " } else { "" };
        let params = self
            .params
            .iter()
            .map(Param::build)
            .collect::<Vec<_>>()
            .join(", ");
        let returns = self
            .returns
            .as_deref()
            .map(|r| format!(": {}", r))
            .unwrap_or_default();
        format!("{}{}{}({}){}", visibility, async_kw, self.name, params, returns)
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = decorator_lines(&self.decorators);
        if self.body.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.signature())));
        } else {
            fragments.push(CodeFragment::braced(
                format!("{} {{", self.signature()),
                self.body.clone(),
            ));
        }
        fragments
    }
}

fn decorator_lines(decorators: &[Decorator]) -> Vec<CodeFragment> {
    decorators.iter().flat_map(|d| d.to_fragments()).collect()
}

#[derive(Debug, Clone)]
enum Member {
    Property(Property),
    Method(Method),
}

impl Renderable for Member {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Member::Property(p) => p.to_fragments(),
            Member::Method(m) => m.to_fragments(),
        }
    }
}

/// Builder for exported TypeScript classes.
#[derive(Debug, Clone)]
pub struct Class {
    decorators: Vec<Decorator>,
    name: String,
    implements: Vec<String>,
    members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            decorators: Vec::new(),
            name: name.into(),
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.members.push(Member::Property(property));
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.members.extend(properties.into_iter().map(Member::Property));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    fn header(&self) -> String {
        let implements = if self.implements.is_empty() {
            String::new()
        } else {
            format!(" implements {}", self.implements.join(", "))
        };
        format!("export class {}{}", self.name, implements)
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = decorator_lines(&self.decorators);

        if self.members.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.header())));
            return fragments;
        }

        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.to_fragments());
        }
        fragments.push(CodeFragment::braced(format!("{} {{", self.header()), body));
        fragments
    }
}

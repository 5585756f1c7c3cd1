//! Text layer under the TypeScript AST.
//!
//! AST nodes implement [`Renderable`] and produce [`CodeFragment`]s;
//! [`CodeBuilder`] turns fragments into indented text.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};

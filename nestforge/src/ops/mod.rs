//! Core operations.
//!
//! The work behind each command, separated from argument parsing and
//! report rendering.

pub mod generate;
pub mod introspect;
pub mod postprocess;

pub use generate::{GenerateOptions, generate};
pub use introspect::introspect;
pub use postprocess::postprocess;

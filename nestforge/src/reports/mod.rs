//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an [`Output`] target.

mod generate;
mod introspect;
mod output;

pub use generate::{GenerateReport, GenerationResult, StepOutcome, WrittenResult};
#[cfg(test)]
pub use generate::StepStatus;
pub use introspect::IntrospectReport;
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};

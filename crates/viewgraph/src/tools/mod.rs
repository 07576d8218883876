//! The tool-dispatch surface consumed by the reasoning loop.
//!
//! A fixed catalog of operations, each declared with a natural-language
//! description (the only signal the LLM has for choosing it), a JSON input
//! schema, and a typed output. Dispatch is synchronous and read-only: no
//! operation mutates the graph.

mod dispatch;
mod schemas;

pub use dispatch::ToolDispatcher;
pub use schemas::ToolSchema;

//! Diagnostic sink implementations.

pub mod memory;
pub mod tracing_sink;

pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

// ABOUTME: Tool module - defines tools, results, and the per-agent registry.
// ABOUTME: Core abstraction for what the model can call.

mod function;
mod registry;
mod result;
mod traits;

pub use function::*;
pub use registry::*;
pub use result::*;
pub use traits::*;

#[cfg(test)]
mod result_test;

// ABOUTME: LLM module - client abstraction for the model backend.
// ABOUTME: Defines request/response types, the client trait, and the Gemini client.

mod client;
mod gemini;
mod types;

pub use client::*;
pub use gemini::*;
pub use types::*;

#[cfg(test)]
mod types_test;

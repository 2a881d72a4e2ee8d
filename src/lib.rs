// ABOUTME: Root module for exam-profiler - a multi-agent LLM pipeline that
// ABOUTME: profiles exam papers and produces study plans.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod prelude;
pub mod profiler;
pub mod runner;
pub mod tool;
pub mod tools;

pub use error::ProfilerError;

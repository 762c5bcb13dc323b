//! OpenAI-backed classification oracle
//!
//! Implements the core's `ClassificationOracle` port over the Chat
//! Completions API with structured JSON output.

mod client;
mod types;

pub use client::OpenAiClient;

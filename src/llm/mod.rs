//! LLM provider clients and abstractions.
//!
//! This module provides a unified interface for the language models the
//! content generation layer rides on. Providers implement [`LLMClient`];
//! the rest of the application never sees a concrete provider type.

/// Core LLM client trait and provider selection.
pub mod client;
/// Local Ollama server client.
pub mod ollama;
/// OpenAI API client (and compatible endpoints).
pub mod openai;

pub use client::{LLMClient, Provider};

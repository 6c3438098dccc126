//! Concrete text-generation backends
//!
//! This module contains implementations of the LLMProvider trait for the
//! hosted completions API and for OpenAI-compatible chat servers.

#[cfg(feature = "together")]
pub mod together;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "together")]
pub use together::{TogetherConfig, TogetherProvider};

#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAIProvider};

//! Text-generation provider layer for mag7-newsletter
//!
//! This crate provides the provider-agnostic pieces the newsletter needs to
//! talk to a text-generation model:
//!
//! - Prompt-style completion request/response types
//! - Chat message types for chat-completion backends
//! - Decoding of the known completion response shapes
//! - Provider trait for text-generation backends
//! - Concrete backends (behind feature flags): a hosted Together-style
//!   completions endpoint and any OpenAI-compatible chat server

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod shape;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use shape::CompletionShape;

// Provider implementations (feature-gated)
#[cfg(any(feature = "together", feature = "openai"))]
pub mod providers;

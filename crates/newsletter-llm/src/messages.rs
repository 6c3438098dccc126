//! Chat message types
//!
//! Chat backends take a list of role-tagged messages rather than a bare
//! prompt. Completion requests are turned into at most two messages: an
//! optional system message and the user prompt.

use crate::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// System message
    System,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message text
    pub content: String,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Build the chat transcript for a completion request
    pub fn transcript(request: &CompletionRequest) -> Vec<Self> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(Self::system(system.clone()));
        }
        messages.push(Self::user(request.prompt.clone()));
        messages
    }
}

//! Shared utilities for mag7-newsletter
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and loading configuration from the environment.

pub mod env;
pub mod logging;

pub use env::{env_flag, env_or, load_env_file};
pub use logging::{init_tracing, init_tracing_with_filter};

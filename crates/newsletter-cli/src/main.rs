//! Command-line entry point for the Magnificent Seven newsletter
//!
//! Builds one newsletter and prints it to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! export SERPAPI_KEY="..."
//! export TOGETHER_API_KEY="..."
//! cargo run --bin mag7-newsletter
//!
//! # Local OpenAI-compatible server (LM Studio, llama.cpp, vLLM)
//! export LOCAL_LLM_API_BASE="http://localhost:1234/v1"
//! cargo run --bin mag7-newsletter -- --backend local --model qwen2.5-7b-instruct
//! ```

use clap::{Parser, ValueEnum};
use newsletter::config::DEFAULT_MODEL;
use newsletter::{LlmBackend, NewsletterBuilder, NewsletterConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Hosted completions API
    Hosted,
    /// Local OpenAI-compatible server
    Local,
}

impl From<Backend> for LlmBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Hosted => Self::Hosted,
            Backend::Local => Self::Local,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mag7-newsletter")]
#[command(about = "Generate today's Magnificent Seven stock newsletter", long_about = None)]
struct Args {
    /// Environment file loaded before reading configuration
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Text-generation backend (overrides NEWSLETTER_LLM_BACKEND)
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Model identifier (overrides NEWSLETTER_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Assemble company sections concurrently
    #[arg(long)]
    parallel: bool,

    /// Skip the duplicate-removal editing pass
    #[arg(long)]
    skip_edit: bool,
}

impl Args {
    /// Environment configuration with the command-line flags applied on top
    fn config(&self) -> NewsletterConfig {
        let mut config = NewsletterConfig::from_env().unwrap_or_else(|e| {
            warn!("Invalid configuration from environment ({}), using defaults", e);
            NewsletterConfig::default()
        });

        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if self.parallel {
            config.parallel_subjects = true;
        }
        if self.skip_edit {
            config.edit_newsletter = false;
        }

        // Only the model can be made invalid from the command line
        if let Err(e) = config.validate() {
            warn!("{}, using model {}", e, DEFAULT_MODEL);
            config.model = DEFAULT_MODEL.to_string();
        }

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_loaded = newsletter_utils::load_env_file(&args.env_file);
    newsletter_utils::init_tracing();

    if env_loaded {
        info!("Loaded environment from {}", args.env_file.display());
    }

    let config = args.config();
    let builder = NewsletterBuilder::from_config(&config)?;

    info!("Generating newsletter");
    let newsletter = builder.build().await;

    println!("{newsletter}");

    Ok(())
}

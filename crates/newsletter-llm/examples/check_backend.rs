//! Send one short prompt to the configured text-generation backend
//!
//! Useful for checking credentials or that a local model server is up
//! before running the full newsletter.
//!
//! # Usage
//!
//! ```bash
//! # Hosted completions API
//! export TOGETHER_API_KEY="..."
//! cargo run --example check_backend -p newsletter-llm -- hosted
//!
//! # Local OpenAI-compatible server (LM Studio, llama.cpp, vLLM, Ollama)
//! export LOCAL_LLM_API_BASE="http://localhost:1234/v1"
//! cargo run --example check_backend -p newsletter-llm -- local your-model-name
//! ```

use newsletter_llm::providers::{OpenAIProvider, TogetherProvider};
use newsletter_llm::{CompletionRequest, LLMProvider};
use std::env;

const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let backend = args.get(1).map_or("hosted", String::as_str);
    let model = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let provider: Box<dyn LLMProvider> = match backend {
        "local" => Box::new(OpenAIProvider::from_env()?),
        "hosted" => Box::new(TogetherProvider::from_env()?),
        other => return Err(format!("unknown backend '{other}', expected hosted or local").into()),
    };

    println!("Backend: {}", provider.name());
    println!("Model:   {model}\n");

    let request = CompletionRequest::builder(model)
        .prompt("Reply with one short sentence about the stock market.")
        .max_tokens(60)
        .temperature(0.7)
        .build();

    match provider.complete(request).await {
        Ok(response) => {
            println!("Response:\n{}", response.text);
            if let Some(usage) = response.usage {
                println!("\nTokens: {} in / {} out", usage.input_tokens, usage.output_tokens);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
            Err(e.into())
        }
    }
}

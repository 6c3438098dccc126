//! Prompt templates for summaries and the editing pass
//!
//! Templates use MiniJinja syntax and are rendered into plain completion
//! prompts.

use crate::error::Result;
use crate::news::Headline;
use minijinja::{Environment, context};

/// System prompt for headline summaries
pub const SUMMARY_PERSONA: &str = "You are a financial expert.";

/// System prompt for the editing pass
pub const EDITOR_PERSONA: &str = "You are an expert newsletter editor.";

const SUMMARY_TEMPLATE: &str = r"Provide a concise, informative, and engaging summary (under 200 words) of the following news articles related to {{ subject }} stock. Focus on key findings, important metrics, potential impacts on the stock price, and overall market sentiment. The summary should be well structured, written in a style similar to Inshorts, and directly presentable in a financial newsletter.

Do not add an introduction such as 'Here is a summary'. Do not repeat the summary or append a rewritten version of it.

News articles:
{{ articles }}

Respond with ONLY the summary.";

const EDITOR_TEMPLATE: &str = r#"You are provided with the content of a financial newsletter below. Your task is to remove any redundant or duplicate paragraphs that appear immediately after the "News Summary:" for each company. Ensure that the core news summary is retained, and only the immediately following duplicated paragraph is removed. Preserve all other content and formatting.

Newsletter Content:
{{ newsletter }}

Respond with ONLY the cleaned newsletter content."#;

/// Join headlines as `"{title}. {snippet}"` separated by `". "`
pub fn headline_text(headlines: &[Headline]) -> String {
    headlines
        .iter()
        .map(|h| format!("{}. {}", h.title, h.snippet_or_placeholder()))
        .collect::<Vec<_>>()
        .join(". ")
}

/// Prompt asking for a short newsletter summary of `headlines`
pub fn summary_prompt(subject: &str, headlines: &[Headline]) -> Result<String> {
    render(
        "summary",
        SUMMARY_TEMPLATE,
        context! {
            subject => subject,
            articles => headline_text(headlines),
        },
    )
}

/// Prompt asking to drop paragraphs duplicating a "News Summary:" line
pub fn editor_prompt(newsletter: &str) -> Result<String> {
    render(
        "editor",
        EDITOR_TEMPLATE,
        context! { newsletter => newsletter },
    )
}

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(name, source)?;
    let template = env.get_template(name)?;
    Ok(template.render(ctx)?)
}

//! Landing page copy synthesis.
//!
//! [`ContentService::generate`] is total: whatever happens upstream, the
//! caller gets usable copy back. A broken provider must never stop a landing
//! page from rendering.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::clients::openai::{ChatMessage, CompletionClient, CompletionError};
use crate::domain::{GeneratedContent, Industry};
use crate::parser::completion::parse_generated_content;

const SYSTEM_PROMPT: &str = "You are an expert copywriter and startup advisor. Generate compelling landing page content for startup ideas.
Create content that would make people want to sign up for early access or updates about this product.
Focus on the problem being solved, the solution, and create urgency around getting early access.

IMPORTANT: The headline should be punchy and specific to the idea. The pitch should be a brief, compelling description that complements the headline without repeating it. Keep the pitch concise and focused on the value proposition.";

pub struct ContentService {
    client: Arc<dyn CompletionClient>,
}

impl ContentService {
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Ask the model for copy, falling back to deterministic copy on any failure.
    pub async fn generate(&self, idea: &str) -> GeneratedContent {
        let messages = build_prompt(idea);

        let text = match self.client.complete(&messages).await {
            Ok(text) => text,
            Err(CompletionError::NotConfigured) => {
                debug!("No language model configured, using fallback copy");
                return fallback(idea);
            }
            Err(e) => {
                warn!(error = %e, "Content generation request failed");
                return fallback(idea);
            }
        };

        if let Some(content) = parse_generated_content(&text, idea) {
            metrics::counter!("content_generations_total", "outcome" => "generated").increment(1);
            content
        } else {
            error!(content = %text, "Invalid JSON response from language model");
            fallback(idea)
        }
    }
}

fn fallback(idea: &str) -> GeneratedContent {
    metrics::counter!("content_generations_total", "outcome" => "fallback").increment(1);
    GeneratedContent::fallback(idea)
}

#[must_use]
pub fn build_prompt(idea: &str) -> Vec<ChatMessage> {
    let industries = Industry::prompt_list();

    let system = format!(
        "{SYSTEM_PROMPT}\n\nAlso identify the industry category for the startup idea. Choose from: {industries}."
    );

    let user = format!(
        "Create landing page content for this startup idea: \"{idea}\"

Please provide:
1. A compelling headline (max 60 characters) - be specific and punchy
2. A brief pitch paragraph (1-2 sentences) - describe the value proposition without repeating the headline
3. A call-to-action button text (max 20 characters)
4. 3-4 key features/benefits (short phrases)
5. The industry category (choose from: {industries})

The pitch should be something like \"Join thousands of early adopters who are already excited about this innovation\" or similar, not a repeat of the headline.

Format as JSON with keys: headline, pitch, cta, features, industry"
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

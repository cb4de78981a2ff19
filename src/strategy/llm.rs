use futures::future::BoxFuture;
use log::{debug, error};
use serde_json::{Map, Value};

use super::{Categorization, CategorizationStrategy};
use crate::email::Email;
use crate::error::CategorizeError;
use crate::llm::TextGenerator;

/// Labels the model is asked to choose from. The reply is not checked against them.
pub const CATEGORY_LABELS: [&str; 6] = [
    "Invoice",
    "Meeting Request",
    "Job Application",
    "Spam/Marketing",
    "Personal Conversation",
    "Urgent Inquiry",
];

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_SUMMARY: &str = "Could not summarize.";

const USER_PROMPT_PREFIX: &str = "Please analyze this email:\n\n";

/// Classification through a text-generation model
pub struct LlmCategorizer<G: TextGenerator> {
    generator: G,
    system_prompt: String,
}

impl<G: TextGenerator> LlmCategorizer<G> {
    pub fn new(generator: G) -> Self {
        let labels = CATEGORY_LABELS
            .iter()
            .map(|label| format!("\"{}\"", label))
            .collect::<Vec<_>>()
            .join(", ");

        let system_prompt = format!(
            "You are an expert email analysis assistant. Your task is to analyze an email and return a structured JSON object.\n\
             The JSON object must have two keys:\n\
             1. \"category\": Classify the email into one of the following categories: [{}].\n\
             2. \"summary\": Provide a one-sentence summary of the email's content.\n\
             Analyze the email content provided and respond only with the valid JSON object.",
            labels
        );

        LlmCategorizer {
            generator,
            system_prompt,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    async fn try_categorize(&self, email: &Email) -> Result<Categorization, CategorizeError> {
        let user_prompt = format!("{}{}", USER_PROMPT_PREFIX, email.body);

        let response = self.generator.complete(&self.system_prompt, &user_prompt).await?;
        debug!("Model response for email {}: {}", email.id, response);

        parse_categorization(&response)
    }
}

impl<G: TextGenerator> CategorizationStrategy for LlmCategorizer<G> {
    fn categorize<'a>(&'a self, email: &'a Email) -> BoxFuture<'a, Categorization> {
        Box::pin(async move {
            match self.try_categorize(email).await {
                Ok(categorization) => categorization,
                Err(e) => {
                    error!("❌ Error categorizing email {}: {}", email.id, e);
                    Categorization::failed()
                }
            }
        })
    }

    fn strategy_name(&self) -> &str {
        "LLM"
    }
}

/// Slice from the first `{` to the last `}` inclusive
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    Some(&text[start..=end])
}

/// Read `category` and `summary` out of free-form model output.
///
/// Missing keys get defaults independently. Non-string values are kept in
/// their JSON text form.
pub fn parse_categorization(response: &str) -> Result<Categorization, CategorizeError> {
    let json = extract_json_object(response).ok_or(CategorizeError::NoJsonObject)?;
    let object: Map<String, Value> = serde_json::from_str(json)?;

    Ok(Categorization {
        category: field_or(&object, "category", DEFAULT_CATEGORY),
        summary: field_or(&object, "summary", DEFAULT_SUMMARY),
    })
}

fn field_or(object: &Map<String, Value>, key: &str, default: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => default.to_string(),
    }
}

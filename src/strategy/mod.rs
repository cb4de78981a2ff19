//! Email classification strategies.
//!
//! A strategy turns one `Email` into a category and a one-sentence summary.
//! Strategies are total: internal failures come back as the sentinel
//! [`Categorization::failed`] pair, never as an error.

pub mod embedding;
pub mod llm;

pub use embedding::EmbeddingCategorizer;
pub use llm::LlmCategorizer;

use futures::future::BoxFuture;

use crate::email::Email;

pub const ERROR_CATEGORY: &str = "Error";
pub const ERROR_SUMMARY: &str = "Failed to process email locally.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorization {
    pub category: String,
    pub summary: String,
}

impl Categorization {
    pub fn new(category: impl Into<String>, summary: impl Into<String>) -> Self {
        Categorization {
            category: category.into(),
            summary: summary.into(),
        }
    }

    /// The sentinel returned when a strategy could not process an email
    pub fn failed() -> Self {
        Self::new(ERROR_CATEGORY, ERROR_SUMMARY)
    }

    pub fn is_failure(&self) -> bool {
        self.category == ERROR_CATEGORY && self.summary == ERROR_SUMMARY
    }
}

/// Trait implemented by every classification backend
pub trait CategorizationStrategy: Send + Sync {
    fn categorize<'a>(&'a self, email: &'a Email) -> BoxFuture<'a, Categorization>;

    /// Get the name of this strategy (for logging)
    fn strategy_name(&self) -> &str;
}

/// Known strategy variants, chosen once when the pipeline is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    /// Ask a text-generation model
    Llm,
    /// Compare embeddings against category prototypes (not available yet)
    Embedding,
}

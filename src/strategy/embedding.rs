use futures::future::BoxFuture;
use log::warn;

use super::{Categorization, CategorizationStrategy};
use crate::email::Email;

/// Placeholder for classification by embedding similarity.
///
/// No embedding backend is wired in yet, so every email comes back with the
/// failure sentinel.
#[derive(Debug, Default)]
pub struct EmbeddingCategorizer;

impl CategorizationStrategy for EmbeddingCategorizer {
    fn categorize<'a>(&'a self, email: &'a Email) -> BoxFuture<'a, Categorization> {
        Box::pin(async move {
            warn!("Embedding strategy is not available, email {} left unclassified", email.id);
            Categorization::failed()
        })
    }

    fn strategy_name(&self) -> &str {
        "Embedding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_sentinel() {
        let email = Email {
            id: "e1".to_string(),
            sender: "a@example.com".to_string(),
            subject: "Hi".to_string(),
            body: String::new(),
            received_at: chrono::Local::now().fixed_offset(),
            category: None,
            summary: None,
        };

        let result = tokio_test::block_on(EmbeddingCategorizer.categorize(&email));
        assert!(result.is_failure());
    }
}

use log::{info, debug, warn};

use crate::email::{normalize, Email, MailSource, ProcessingSummary};
use crate::strategy::CategorizationStrategy;

/// Fetch, normalize and classify unread emails
pub struct EmailProcessor {
    source: Box<dyn MailSource>,
    strategy: Box<dyn CategorizationStrategy>,
}

impl EmailProcessor {
    pub fn new(source: Box<dyn MailSource>, strategy: Box<dyn CategorizationStrategy>) -> Self {
        info!(
            "Initializing email processor ({} source, {} strategy)",
            source.source_name(),
            strategy.strategy_name()
        );

        EmailProcessor { source, strategy }
    }

    /// Normalized emails, in the order the source returned them
    pub async fn fetch_emails(&self, max_results: u32) -> Vec<Email> {
        let raw_messages = self.source.list_unread(max_results).await;

        if raw_messages.is_empty() {
            info!("No unread emails from {}", self.source.source_name());
            return Vec::new();
        }

        raw_messages.iter().map(normalize).collect()
    }

    /// Normalized emails, each enriched with a category and summary
    pub async fn process_emails(&self, max_results: u32) -> Vec<Email> {
        info!("Starting email processing with {} strategy", self.strategy.strategy_name());

        let mut emails = self.fetch_emails(max_results).await;
        let mut summary = ProcessingSummary::new();
        let total = emails.len();

        // One at a time: a failed classification only affects its own email
        for (index, email) in emails.iter_mut().enumerate() {
            debug!("Classifying email {}/{} (ID: {})", index + 1, total, email.id);

            let categorization = self.strategy.categorize(email).await;
            if categorization.is_failure() {
                warn!("Email {} could not be classified", email.id);
            }

            email.apply_categorization(categorization);
            summary.record(email);
        }

        info!(
            "Processing completed: {} emails classified, {} failed",
            summary.emails_classified, summary.emails_failed
        );

        emails
    }
}

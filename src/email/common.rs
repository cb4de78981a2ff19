/// Common structures for email processing
use chrono::{DateTime, FixedOffset};
use log::warn;
use serde::Serialize;

use crate::strategy::{Categorization, ERROR_CATEGORY};

/// A normalized email, ready to be classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub received_at: DateTime<FixedOffset>,
    pub category: Option<String>,
    pub summary: Option<String>,
}

impl Email {
    /// Record the outcome of a classification.
    ///
    /// Classification happens once per email: a second call is ignored and
    /// returns `false`.
    pub fn apply_categorization(&mut self, categorization: Categorization) -> bool {
        if self.is_categorized() {
            warn!("Email {} is already categorized, ignoring new result", self.id);
            return false;
        }

        self.category = Some(categorization.category);
        self.summary = Some(categorization.summary);
        true
    }

    pub fn is_categorized(&self) -> bool {
        self.category.is_some() || self.summary.is_some()
    }
}

/// Result of a processing run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub emails_classified: usize,
    pub emails_failed: usize,
}

impl ProcessingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, email: &Email) {
        match email.category.as_deref() {
            Some(ERROR_CATEGORY) => self.emails_failed += 1,
            Some(_) => self.emails_classified += 1,
            None => {}
        }
    }

    pub fn total(&self) -> usize {
        self.emails_classified + self.emails_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> Email {
        Email {
            id: "18f0c2a1b".to_string(),
            sender: "Alice <alice@example.com>".to_string(),
            subject: "Lunch".to_string(),
            body: "Are you free tomorrow?".to_string(),
            received_at: chrono::Local::now().fixed_offset(),
            category: None,
            summary: None,
        }
    }

    #[test]
    fn test_categorization_is_set_once() {
        let mut email = sample_email();
        assert!(!email.is_categorized());

        assert!(email.apply_categorization(Categorization::new("Personal Conversation", "Lunch invite.")));
        assert!(!email.apply_categorization(Categorization::new("Spam/Marketing", "Ad.")));

        assert_eq!(email.category.as_deref(), Some("Personal Conversation"));
        assert_eq!(email.summary.as_deref(), Some("Lunch invite."));
    }

    #[test]
    fn test_summary_counts() {
        let mut ok = sample_email();
        ok.apply_categorization(Categorization::new("Invoice", "Bill due."));
        let mut failed = sample_email();
        failed.apply_categorization(Categorization::failed());
        let untouched = sample_email();

        let mut summary = ProcessingSummary::new();
        summary.record(&ok);
        summary.record(&failed);
        summary.record(&untouched);

        assert_eq!(summary.emails_classified, 1);
        assert_eq!(summary.emails_failed, 1);
        assert_eq!(summary.total(), 2);
    }
}

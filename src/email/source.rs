use futures::future::BoxFuture;

use super::wire::RawMessage;

/// Where unread messages come from.
///
/// Implementations swallow transport and authorization failures: they log
/// the problem and hand back an empty list.
pub trait MailSource: Send + Sync {
    fn list_unread(&self, max_results: u32) -> BoxFuture<'_, Vec<RawMessage>>;

    /// Get the name of this source (for logging)
    fn source_name(&self) -> &str;
}

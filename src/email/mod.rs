pub mod common;
pub mod normalizer;
pub mod source;
pub mod wire;

// Re-export commonly used items
pub use common::{Email, ProcessingSummary};
pub use normalizer::normalize;
pub use source::MailSource;
pub use wire::RawMessage;

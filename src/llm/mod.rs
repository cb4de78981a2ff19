//! Text generation backends.
//!
//! The categorizer only needs one thing from a model: given a system
//! instruction and a user prompt, return a single completion.

mod chat_client;

pub use chat_client::ChatCompletionClient;

use futures::future::BoxFuture;

use crate::error::GenerationError;

pub trait TextGenerator: Send + Sync {
    fn complete<'a>(
        &'a self,
        system_instruction: &'a str,
        user_content: &'a str,
    ) -> BoxFuture<'a, Result<String, GenerationError>>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn complete<'a>(
        &'a self,
        system_instruction: &'a str,
        user_content: &'a str,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        (**self).complete(system_instruction, user_content)
    }
}

// Library exports for mailtriage crate
// This allows tests and other crates to use the modules

pub mod config;
pub mod error;
pub mod email;
pub mod gmail_client;
pub mod llm;
pub mod processor;
pub mod strategy;

use anyhow::Result;
use log::warn;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub gmail: GmailConfig,
    pub llm: LlmConfig,
    pub max_results: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GmailConfig {
    pub credentials_path: String,
    pub token_cache_path: String,
}

/// Connection settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: "ollama".to_string(),
            model: "phi3:mini".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Load the configuration from the process environment.
    pub fn new() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_defaults = LlmConfig::default();

        Config {
            gmail: GmailConfig {
                credentials_path: lookup("GMAIL_CREDENTIALS_PATH")
                    .unwrap_or_else(|| "gmail_api_credentials.json".to_string()),
                token_cache_path: lookup("GMAIL_TOKEN_CACHE_PATH")
                    .unwrap_or_else(|| "token.json".to_string()),
            },
            llm: LlmConfig {
                base_url: lookup("LLM_BASE_URL").unwrap_or(llm_defaults.base_url),
                api_key: lookup("LLM_API_KEY").unwrap_or(llm_defaults.api_key),
                model: lookup("LLM_MODEL").unwrap_or(llm_defaults.model),
                timeout_secs: parse_or_default(&lookup, "LLM_TIMEOUT_SECS", llm_defaults.timeout_secs),
            },
            max_results: parse_or_default(&lookup, "MAX_RESULTS", 5),
        }
    }

    /// Check that the files needed to talk to Gmail are in place.
    pub fn validate(&self) -> Result<()> {
        if !std::path::Path::new(&self.gmail.credentials_path).exists() {
            anyhow::bail!(
                "OAuth2 client credentials not found: {}\n\
                 \n\
                 💡 Solutions :\n\
                 1. Download the OAuth client JSON from the Google Cloud console and save it as\n\
                    gmail_api_credentials.json in the working directory\n\
                 \n\
                 2. Or point to it explicitly (also works from a .env file):\n\
                    export GMAIL_CREDENTIALS_PATH=/path/to/client_credentials.json\n\
                    export GMAIL_TOKEN_CACHE_PATH=./token.json",
                self.gmail.credentials_path
            );
        }

        Ok(())
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

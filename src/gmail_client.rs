use anyhow::{Result, Context};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use futures::future::BoxFuture;
use google_gmail1::{api, Gmail, hyper, hyper_rustls, oauth2};
use log::{info, debug, error};

use crate::config::GmailConfig;
use crate::email::wire::{MessagePart, MessagePartBody, MessagePartHeader, RawMessage};
use crate::email::MailSource;

pub struct GmailClient {
    hub: Gmail<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>,
}

impl GmailClient {
    pub async fn new(config: &GmailConfig) -> Result<Self> {
        info!("Connecting to Gmail API via OAuth2");

        // Read OAuth2 client credentials from file
        let secret = oauth2::read_application_secret(&config.credentials_path)
            .await
            .context("Unable to read OAuth2 client credentials file")?;

        // Tokens are cached on disk so the browser flow only runs once
        let auth = oauth2::InstalledFlowAuthenticator::builder(
            secret,
            oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(&config.token_cache_path)
        .build()
        .await
        .context("Unable to create OAuth2 authenticator")?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        let client = hyper::Client::builder().build(connector);
        let hub = Gmail::new(client, auth);

        info!("✅ Gmail API connection established successfully");

        Ok(GmailClient { hub })
    }

    /// IDs of unread messages in the inbox, newest first
    pub async fn search_unread_emails(&self, max_results: u32) -> Result<Vec<String>> {
        info!("Searching for unread emails in INBOX (max {})", max_results);

        let result = self.hub
            .users()
            .messages_list("me")
            .add_label_ids("INBOX")
            .add_label_ids("UNREAD")
            .max_results(max_results)
            .add_scope(api::Scope::Readonly)
            .doit()
            .await
            .context("Error searching for emails")?;

        let message_ids: Vec<String> = result.1
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|msg| msg.id)
            .collect();

        info!("Found {} unread email(s)", message_ids.len());

        Ok(message_ids)
    }

    /// Full message in wire form
    pub async fn fetch_email_full(&self, message_id: &str) -> Result<RawMessage> {
        debug!("Full email retrieval for ID: {}", message_id);

        let result = self.hub
            .users()
            .messages_get("me", message_id)
            .format("full")
            .add_scope(api::Scope::Readonly)
            .doit()
            .await
            .with_context(|| format!("Unable to retrieve email {}", message_id))?;

        Ok(to_raw_message(result.1, message_id))
    }

    async fn fetch_unread(&self, max_results: u32) -> Result<Vec<RawMessage>> {
        let message_ids = self.search_unread_emails(max_results).await?;

        if message_ids.is_empty() {
            info!("No new unread messages found");
            return Ok(Vec::new());
        }

        info!("Fetching details for {} message(s)", message_ids.len());

        let mut messages = Vec::with_capacity(message_ids.len());
        for message_id in &message_ids {
            messages.push(self.fetch_email_full(message_id).await?);
        }

        Ok(messages)
    }
}

/// All or nothing: if listing or any single fetch fails, the error is logged
/// and the whole run yields an empty list.
impl MailSource for GmailClient {
    fn list_unread(&self, max_results: u32) -> BoxFuture<'_, Vec<RawMessage>> {
        Box::pin(async move {
            match self.fetch_unread(max_results).await {
                Ok(messages) => messages,
                Err(e) => {
                    error!("❌ Gmail API error: {:#}", e);
                    Vec::new()
                }
            }
        })
    }

    fn source_name(&self) -> &str {
        "Gmail"
    }
}

/// The API client hands back decoded bytes; put them back into the wire
/// encoding so every source produces the same shape.
fn to_raw_message(message: api::Message, fallback_id: &str) -> RawMessage {
    RawMessage {
        id: message.id.unwrap_or_else(|| fallback_id.to_string()),
        payload: message.payload.map(to_wire_part).unwrap_or_default(),
    }
}

fn to_wire_part(part: api::MessagePart) -> MessagePart {
    MessagePart {
        mime_type: part.mime_type,
        headers: part.headers
            .unwrap_or_default()
            .into_iter()
            .filter_map(|h| match (h.name, h.value) {
                (Some(name), Some(value)) => Some(MessagePartHeader { name, value }),
                _ => None,
            })
            .collect(),
        body: part.body.map(|body| MessagePartBody {
            data: body.data.map(|bytes| URL_SAFE.encode(bytes)),
            size: body.size,
        }),
        parts: part.parts.map(|parts| parts.into_iter().map(to_wire_part).collect()),
    }
}

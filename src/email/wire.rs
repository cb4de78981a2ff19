/// Gmail API message shapes, as they appear on the wire (`format=full`)
use serde::{Deserialize, Serialize};

/// One mailbox entry before normalization
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub id: String,
    #[serde(default)]
    pub payload: MessagePart,
}

/// A node of the body tree. The top-level payload is itself a part.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub headers: Vec<MessagePartHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MessagePartBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<MessagePart>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessagePartHeader {
    pub name: String,
    pub value: String,
}

/// Part payload; `data` is URL-safe base64
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessagePartBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

impl MessagePart {
    pub fn data(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.data.as_deref())
    }
}

//! Feishu message model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, WebhookError};

/// Message kinds supported by the client.
///
/// Feishu custom bots accept five message types; only `text` and `post`
/// are supported here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Plain text message
    Text,
    /// Rich-text card message
    Post,
}

impl MessageType {
    /// The wire name of this message type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "post" => Ok(Self::Post),
            other => Err(WebhookError::UnsupportedMessageType(other.to_string())),
        }
    }
}

/// A single element of a `post` message body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Tag {
    /// Plain text run
    Text {
        /// Text content
        text: String,
    },
    /// Hyperlink, rendered with the given label
    #[serde(rename = "a")]
    Link {
        /// Link label
        text: String,
        /// Link target
        href: String,
    },
}

impl Tag {
    /// Create a text tag.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a link tag.
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Rich-text card content for a `post` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostMessage {
    /// Card title
    pub title: String,
    /// Ordered body elements
    pub tags: Vec<Tag>,
}

impl PostMessage {
    /// Create a card with the given title and no body.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// Append a body element.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// A message to deliver, tagged by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text
    Text(String),
    /// Rich-text card
    Post(PostMessage),
}

impl Message {
    /// Create a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a rich-text card message.
    pub fn post(post: PostMessage) -> Self {
        Self::Post(post)
    }

    /// The type of this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Text(_) => MessageType::Text,
            Self::Post(_) => MessageType::Post,
        }
    }

    /// Validate a dynamically supplied (type name, value) parameter pair.
    ///
    /// Pipeline engines hand task parameters over as strings and JSON
    /// values; this is the boundary where they are checked. `text` requires
    /// a JSON string and `post` an object with `title` and `tags`; anything
    /// else is rejected before a payload is constructed.
    pub fn from_value(message_type: &str, value: serde_json::Value) -> Result<Self> {
        match message_type.parse::<MessageType>()? {
            MessageType::Text => match value {
                serde_json::Value::String(text) => Ok(Self::Text(text)),
                other => Err(WebhookError::InvalidMessage(format!(
                    "text message must be a string, got {}",
                    json_type_name(&other)
                ))),
            },
            MessageType::Post => serde_json::from_value::<PostMessage>(value)
                .map(Self::Post)
                .map_err(|e| {
                    WebhookError::InvalidMessage(format!(
                        "post message must be an object with title and tags: {e}"
                    ))
                }),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_type_parsing() {
        assert_eq!("text".parse::<MessageType>().unwrap(), MessageType::Text);
        assert_eq!("post".parse::<MessageType>().unwrap(), MessageType::Post);
    }

    #[test]
    fn test_unsupported_message_types() {
        for unsupported in ["image", "share_chat", "interactive", ""] {
            let result = unsupported.parse::<MessageType>();
            assert!(matches!(
                result,
                Err(WebhookError::UnsupportedMessageType(_))
            ));
        }
    }

    #[test]
    fn test_tag_wire_shapes() {
        let text = serde_json::to_value(Tag::text("hello")).unwrap();
        assert_eq!(text, json!({"tag": "text", "text": "hello"}));

        let link = serde_json::to_value(Tag::link("details", "https://example.com")).unwrap();
        assert_eq!(
            link,
            json!({"tag": "a", "text": "details", "href": "https://example.com"})
        );
    }

    #[test]
    fn test_from_value_text() {
        let message = Message::from_value("text", json!("hello")).unwrap();
        assert_eq!(message, Message::text("hello"));
    }

    #[test]
    fn test_from_value_text_wrong_shape() {
        let result = Message::from_value("text", json!({"text": "hello"}));
        assert!(matches!(result, Err(WebhookError::InvalidMessage(_))));
    }

    #[test]
    fn test_from_value_post() {
        let value = json!({
            "title": "T",
            "tags": [{"tag": "text", "text": "x"}]
        });

        let message = Message::from_value("post", value).unwrap();
        assert_eq!(
            message,
            Message::post(PostMessage::new("T").with_tag(Tag::text("x")))
        );
    }

    #[test]
    fn test_from_value_post_not_an_object() {
        let result = Message::from_value("post", json!("not a dict"));
        assert!(matches!(result, Err(WebhookError::InvalidMessage(_))));
    }

    #[test]
    fn test_from_value_rejects_unsupported_type_first() {
        let result = Message::from_value("image", json!({"key": "..."}));
        assert!(matches!(
            result,
            Err(WebhookError::UnsupportedMessageType(_))
        ));
    }
}

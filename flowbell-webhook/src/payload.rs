//! Outbound payload construction

use serde::Serialize;

use crate::message::{Message, Tag};
use crate::signature::Signature;

/// The JSON body POSTed to the webhook endpoint.
///
/// `timestamp` and `sign` appear together when the payload is signed and
/// are both absent otherwise; taking them as one [`Signature`] makes the
/// half-signed state unrepresentable.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign: Option<String>,
    msg_type: &'static str,
    content: Content,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Content {
    Text { text: String },
    Post { post: PostBody },
}

#[derive(Debug, Clone, Serialize)]
struct PostBody {
    zh_cn: PostLocale,
}

/// The tag sequence is nested as a single element of the outer array; this
/// is the shape the endpoint expects, not a flattened list.
#[derive(Debug, Clone, Serialize)]
struct PostLocale {
    title: String,
    content: Vec<Vec<Tag>>,
}

impl OutboundPayload {
    /// Build the wire payload for a message, optionally signed.
    pub fn build(message: &Message, signature: Option<&Signature>) -> Self {
        let content = match message {
            Message::Text(text) => Content::Text { text: text.clone() },
            Message::Post(post) => Content::Post {
                post: PostBody {
                    zh_cn: PostLocale {
                        title: post.title.clone(),
                        content: vec![post.tags.clone()],
                    },
                },
            },
        };

        Self {
            timestamp: signature.map(|s| s.timestamp().to_string()),
            sign: signature.map(|s| s.sign().to_string()),
            msg_type: message.message_type().as_str(),
            content,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::PostMessage;
    use serde_json::json;

    #[test]
    fn test_text_unsigned_shape() {
        let payload = OutboundPayload::build(&Message::text("hello"), None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"msg_type": "text", "content": {"text": "hello"}})
        );
    }

    #[test]
    fn test_post_shape_nests_tags_once() {
        let message = Message::post(PostMessage::new("T").with_tag(Tag::text("x")));
        let payload = OutboundPayload::build(&message, None);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "msg_type": "post",
                "content": {
                    "post": {
                        "zh_cn": {
                            "title": "T",
                            "content": [[{"tag": "text", "text": "x"}]]
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_signed_carries_both_fields() {
        let signature = Signature::generate(1609459200, "top-secret").unwrap();
        let payload = OutboundPayload::build(&Message::text("hi"), Some(&signature));
        let value = serde_json::to_value(&payload).unwrap();

        // timestamp is transmitted as a string of seconds
        assert_eq!(value["timestamp"], json!("1609459200"));
        assert_eq!(value["sign"], json!(signature.sign()));
    }

    #[test]
    fn test_unsigned_carries_neither_field() {
        let payload = OutboundPayload::build(&Message::text("hi"), None);
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("timestamp"));
        assert!(!object.contains_key("sign"));
    }

    #[test]
    fn test_post_with_link_tag() {
        let message = Message::post(
            PostMessage::new("alert")
                .with_tag(Tag::text("summary"))
                .with_tag(Tag::link("details", "https://ui.example.com/run?id=1")),
        );
        let value = serde_json::to_value(OutboundPayload::build(&message, None)).unwrap();

        let tags = &value["content"]["post"]["zh_cn"]["content"][0];
        assert_eq!(tags[0], json!({"tag": "text", "text": "summary"}));
        assert_eq!(
            tags[1],
            json!({"tag": "a", "text": "details", "href": "https://ui.example.com/run?id=1"})
        );
    }
}

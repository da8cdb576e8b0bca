//! Domain DTOs for the blog API.
//!
//! # Design
//! The backend's blog documents have an open-ended shape: beyond `_id`,
//! `title` and `content` they carry author, timestamps, media references and
//! whatever else the server decides to add. `BlogRecord` types the fields the
//! UI depends on and keeps the rest in a flattened `extra` map, so unknown
//! fields survive a fetch/update cycle untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::http::{FormPart, PartValue};

/// Multipart field name the backend expects for the media upload.
pub const IMAGE_FIELD: &str = "image";

/// A single blog post returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Null or non-string values read as an empty string, so one odd record
/// does not fail a whole list.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        _ => Ok(String::new()),
    }
}

impl BlogRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Records are matched by identifier only.
    pub fn same_identity(&self, other: &BlogRecord) -> bool {
        self.id == other.id
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// Partial update payload. Only the fields present are sent; omitted fields
/// remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.extra.is_empty()
    }
}

/// A media file attached to a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Form payload for creating a post. Sent as multipart so `image` can carry
/// a file; `fields` holds any further text fields the backend accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub image: Option<Attachment>,
    pub fields: Vec<(String, String)>,
}

impl NewBlog {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: None,
            fields: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: Attachment) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub(crate) fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", self.title.as_str()),
            FormPart::text("content", self.content.as_str()),
        ];
        parts.extend(
            self.fields
                .iter()
                .map(|(name, value)| FormPart::text(name.as_str(), value.as_str())),
        );
        if let Some(image) = &self.image {
            parts.push(FormPart {
                name: IMAGE_FIELD.to_string(),
                value: PartValue::File {
                    file_name: image.file_name.clone(),
                    content_type: image.content_type.clone(),
                    bytes: image.bytes.clone(),
                },
            });
        }
        parts
    }
}

use serde::{Deserialize, Serialize};

/// An immutable quote. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "content")]
    pub text: String,
    pub author: String,
}

impl Quote {
    /// Create a quote with a specific ID
    pub fn new(id: impl Into<String>, text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
        }
    }

    /// Create a quote with a generated UUID (remote quotes carry no stable id)
    pub fn with_generated_id(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), text, author)
    }
}

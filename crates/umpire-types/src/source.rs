use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Content longer than this is shown collapsed by default
const EXPANDABLE_CONTENT_CHARS: usize = 200;

/// Rule set a question was classified under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    Outdoor,
    Indoor,
    Hockey5s,
    Other(String),
}

impl Variant {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Outdoor => "outdoor",
            Self::Indoor => "indoor",
            Self::Hockey5s => "hockey5s",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Variant {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "outdoor" => Self::Outdoor,
            "indoor" => Self::Indoor,
            "hockey5s" | "hockey 5s" | "hockey_5s" => Self::Hockey5s,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Variant {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.as_str().to_string()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to a cited passage
///
/// Known keys are typed; anything else the backend sends is kept in `extra`.
/// Known keys are read leniently: a value of an unexpected type becomes `None`
/// instead of rejecting the whole answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocMetadata {
    #[serde(default, deserialize_with = "lenient_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rule_number: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Whole non-negative numbers, also when sent as `12.0` or `"12"`
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as f64).or_else(|| n.as_f64()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32))
}

/// Strings as-is; numbers and booleans in their JSON spelling
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A cited passage returned alongside an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDoc {
    pub page_content: String,
    #[serde(default)]
    pub metadata: SourceDocMetadata,
}

impl SourceDoc {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: SourceDocMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: SourceDocMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Chapter and heading joined with a bullet, if either is present
    pub fn header(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.metadata.chapter, &self.metadata.heading]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" • "))
        }
    }

    pub fn is_expandable(&self) -> bool {
        self.page_content.chars().count() > EXPANDABLE_CONTENT_CHARS
    }

    /// First `max_chars` characters of the passage, with an ellipsis if cut
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.page_content.chars().count() <= max_chars {
            return self.page_content.clone();
        }
        let mut cut: String = self.page_content.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

/// Jurisdiction offered by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3-letter code, e.g. "BEL"
    pub code: String,
    pub name: String,
}

/// One indexed document in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStat {
    pub source_file: String,
    pub variant: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub chunk_count: u64,
}

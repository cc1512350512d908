use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub mod format;
pub mod upload;

pub use format::{document_label, format_file_size, format_timestamp};
pub use upload::{
    check_extension, UploadParams, ACCEPTED_EXTENSIONS, CHUNK_OVERLAP_RANGE, CHUNK_SIZE_RANGE,
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
};

/// Document metadata as listed by the backend. The object exactly as the
/// server sent it is kept in `raw`; serialising a `Document` writes `raw`
/// back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub file_size: Option<u64>,
    pub file_type: Option<String>,
    pub created_at: Option<String>,
    pub is_active: Option<bool>,
    pub status: String,
    pub hash_code: Option<String>,
    pub raw: Value,
}

#[derive(Deserialize)]
struct DocumentFields {
    #[serde(default, deserialize_with = "null_as_default")]
    filename: String,
    #[serde(default)]
    file_size: Option<u64>,
    #[serde(default)]
    file_type: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
    #[serde(default)]
    hash_code: Option<String>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let f = DocumentFields::deserialize(&raw).map_err(de::Error::custom)?;
        Ok(Document {
            filename: f.filename,
            file_size: f.file_size,
            file_type: f.file_type,
            created_at: f.created_at,
            is_active: f.is_active,
            status: f.status,
            hash_code: f.hash_code,
            raw,
        })
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl Document {
    /// Hash code, treating an empty string the same as a missing one.
    pub fn hash(&self) -> Option<&str> {
        self.hash_code.as_deref().filter(|h| !h.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default)]
    pub hash_code: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// 字段为 null 时按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub hash_code: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

pub use qd_error::{QdError as Error, Result};

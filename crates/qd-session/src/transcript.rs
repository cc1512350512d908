use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub hash_code: String,
}

/// 本地对话记录
///
/// 只追加；只包含本会话自己发送过的消息，和服务端历史可能不一致。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: &str, response: &str, hash_code: &str) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            message: message.to_string(),
            response: response.to_string(),
            timestamp: Utc::now(),
            hash_code: hash_code.to_string(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// 指定文档的记录，最新的在前
    pub fn for_document<'a>(
        &'a self,
        hash_code: &'a str,
    ) -> impl Iterator<Item = &'a TranscriptEntry> + 'a {
        self.entries
            .iter()
            .rev()
            .filter(move |e| e.hash_code == hash_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

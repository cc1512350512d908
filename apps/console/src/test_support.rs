use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use qd_client::QueryDocsApi;
use qd_core::{ChatTurn, Document, UploadParams};
use qd_error::{QdError, Result};

use crate::screen::{Block, Screen};

/// In-memory backend that records every call it receives.
pub struct MockApi {
    pub documents: Result<Vec<Document>>,
    pub history: Result<Vec<ChatTurn>>,
    pub report: Result<String>,
    pub reply: Result<String>,
    pub upload: Result<Value>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            documents: Ok(Vec::new()),
            history: Ok(Vec::new()),
            report: Ok(String::new()),
            reply: Ok("ok".to_string()),
            upload: Ok(json!({})),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Ok(documents),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn has_error(screen: &Screen) -> bool {
    screen.blocks.iter().any(|b| matches!(b, Block::Error(_)))
}

pub fn status_error(action: &str, status: u16) -> QdError {
    QdError::Status {
        action: action.to_string(),
        status,
    }
}

pub fn doc(filename: &str, status: &str, hash: Option<&str>) -> Document {
    serde_json::from_value(json!({
        "filename": filename,
        "file_size": 2048,
        "file_type": "text/plain",
        "created_at": "2024-05-01T10:20:30.123456",
        "is_active": true,
        "status": status,
        "hash_code": hash,
    }))
    .unwrap()
}

pub fn turn(message: &str, response: &str, hash: Option<&str>, session: Option<&str>) -> ChatTurn {
    serde_json::from_value(json!({
        "message": message,
        "response": response,
        "timestamp": "2024-05-01T10:20:30",
        "hash_code": hash,
        "session_id": session,
    }))
    .unwrap()
}

#[async_trait]
impl QueryDocsApi for MockApi {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.record("list_documents".into());
        self.documents.clone()
    }

    async fn list_chat_history(&self) -> Result<Vec<ChatTurn>> {
        self.record("list_chat_history".into());
        self.history.clone()
    }

    async fn fetch_exception_report(&self) -> Result<String> {
        self.record("fetch_exception_report".into());
        self.report.clone()
    }

    async fn send_message(&self, message: &str, document_hash: &str, session_id: &str) -> Result<String> {
        self.record(format!("send_message:{message}:{document_hash}:{session_id}"));
        self.reply.clone()
    }

    async fn upload_document(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
        params: &UploadParams,
    ) -> Result<Value> {
        self.record(format!(
            "upload_document:{filename}:{}:{}:{}:{}",
            file_bytes.len(),
            params.chunk_size,
            params.chunk_overlap,
            params.session_id
        ));
        self.upload.clone()
    }
}

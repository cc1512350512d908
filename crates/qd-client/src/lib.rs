use std::error::Error as _;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use qd_core::{ChatHistory, ChatReply, ChatRequest, ChatTurn, Document, DocumentList, UploadParams};
pub use qd_error::{QdError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// The five backend calls the console depends on.
///
/// Every call is a single attempt: no retry, no timeout. Only HTTP 200 counts
/// as success.
#[async_trait]
pub trait QueryDocsApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Server-side history in server order, not filtered by session.
    async fn list_chat_history(&self) -> Result<Vec<ChatTurn>>;

    /// Pre-rendered report markup, returned untouched.
    async fn fetch_exception_report(&self) -> Result<String>;

    /// Returns the generated answer text.
    async fn send_message(&self, message: &str, document_hash: &str, session_id: &str)
        -> Result<String>;

    /// Returns the created document's metadata exactly as the server sent it.
    async fn upload_document(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
        params: &UploadParams,
    ) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Documents,
    ChatHistory,
    ExceptionReport,
    Chat,
    UploadDocument,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Documents => "/documents/",
            Endpoint::ChatHistory => "/chat/history/",
            Endpoint::ExceptionReport => "/api/exceptions/table/",
            Endpoint::Chat => "/chat/",
            Endpoint::UploadDocument => "/upload-document/",
        }
    }

    /// Used in `Failed to <action>: <status>`.
    pub fn action(self) -> &'static str {
        match self {
            Endpoint::Documents => "fetch documents",
            Endpoint::ChatHistory => "fetch chat history",
            Endpoint::ExceptionReport => "fetch exceptions",
            Endpoint::Chat => "send message",
            Endpoint::UploadDocument => "upload document",
        }
    }

    /// Used in `Error <activity>: <cause>`.
    pub fn activity(self) -> &'static str {
        match self {
            Endpoint::Documents => "fetching documents",
            Endpoint::ChatHistory => "fetching chat history",
            Endpoint::ExceptionReport => "fetching exceptions",
            Endpoint::Chat => "sending message",
            Endpoint::UploadDocument => "uploading document",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String, // e.g. http://127.0.0.1:8000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpQueryDocsClient {
    http: Client,
    cfg: ClientConfig,
}

impl HttpQueryDocsClient {
    pub fn new(cfg: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            cfg,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.cfg.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.cfg.base_url.trim_end_matches('/'), endpoint.path())
    }

    async fn dispatch(&self, endpoint: Endpoint, req: RequestBuilder) -> Result<Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| network_error(endpoint, &e))?;
        let status = resp.status();
        debug!(endpoint = endpoint.path(), status = %status, "response received");
        if status != StatusCode::OK {
            return Err(QdError::Status {
                action: endpoint.action().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

fn network_error(endpoint: Endpoint, err: &reqwest::Error) -> QdError {
    // reqwest 的 Display 只有最外层信息，拼上 source 链便于定位
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    QdError::Network {
        activity: endpoint.activity().to_string(),
        message,
    }
}

async fn decode<T: DeserializeOwned>(endpoint: Endpoint, resp: Response) -> Result<T> {
    let body = resp
        .bytes()
        .await
        .map_err(|e| network_error(endpoint, &e))?;
    serde_json::from_slice(&body).map_err(|e| QdError::Decode {
        activity: endpoint.activity().to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl QueryDocsApi for HttpQueryDocsClient {
    #[instrument(skip(self))]
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let endpoint = Endpoint::Documents;
        let resp = self
            .dispatch(endpoint, self.http.get(self.url(endpoint)))
            .await?;
        let data: DocumentList = decode(endpoint, resp).await?;
        Ok(data.documents)
    }

    #[instrument(skip(self))]
    async fn list_chat_history(&self) -> Result<Vec<ChatTurn>> {
        let endpoint = Endpoint::ChatHistory;
        let resp = self
            .dispatch(endpoint, self.http.get(self.url(endpoint)))
            .await?;
        let data: ChatHistory = decode(endpoint, resp).await?;
        Ok(data.chat_history)
    }

    #[instrument(skip(self))]
    async fn fetch_exception_report(&self) -> Result<String> {
        let endpoint = Endpoint::ExceptionReport;
        let resp = self
            .dispatch(endpoint, self.http.get(self.url(endpoint)))
            .await?;
        resp.text().await.map_err(|e| network_error(endpoint, &e))
    }

    #[instrument(skip(self, message))]
    async fn send_message(
        &self,
        message: &str,
        document_hash: &str,
        session_id: &str,
    ) -> Result<String> {
        let endpoint = Endpoint::Chat;
        let body = ChatRequest {
            message: message.to_string(),
            hash_code: document_hash.to_string(),
            session_id: session_id.to_string(),
        };
        let resp = self
            .dispatch(endpoint, self.http.post(self.url(endpoint)).json(&body))
            .await?;
        let data: ChatReply = decode(endpoint, resp).await?;
        Ok(data.response)
    }

    #[instrument(skip(self, file_bytes), fields(size = file_bytes.len()))]
    async fn upload_document(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
        params: &UploadParams,
    ) -> Result<Value> {
        let endpoint = Endpoint::UploadDocument;
        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        let part = Part::bytes(file_bytes)
            .file_name(filename.to_string())
            .mime_str(mime.as_ref())?;
        let form = Form::new().part("file", part);
        let req = self
            .http
            .post(self.url(endpoint))
            .query(params)
            .multipart(form);
        let resp = self.dispatch(endpoint, req).await?;
        decode(endpoint, resp).await
    }
}

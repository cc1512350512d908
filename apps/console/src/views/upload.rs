use serde_json::Value;

use qd_client::QueryDocsApi;
use qd_core::{check_extension, UploadParams, ACCEPTED_EXTENSIONS, CHUNK_OVERLAP_RANGE, CHUNK_SIZE_RANGE};
use qd_error::{QdError, Result};
use qd_session::SessionState;

use crate::router::{PageInput, UploadRequest};
use crate::screen::{Block, Screen};
use crate::views::ViewSettings;

pub async fn render(
    api: &dyn QueryDocsApi,
    state: &SessionState,
    settings: &ViewSettings,
    input: PageInput,
) -> Screen {
    let mut screen = Screen::new();
    screen.title("Upload Document");
    screen.push(Block::Labeled {
        label: "Accepted file types".to_string(),
        text: ACCEPTED_EXTENSIONS.join(", "),
    });
    screen.push(Block::Labeled {
        label: "Chunk Size".to_string(),
        text: format!(
            "{} ({}–{})",
            settings.default_chunk_size,
            CHUNK_SIZE_RANGE.start(),
            CHUNK_SIZE_RANGE.end()
        ),
    });
    screen.push(Block::Labeled {
        label: "Chunk Overlap".to_string(),
        text: format!(
            "{} ({}–{})",
            settings.default_chunk_overlap,
            CHUNK_OVERLAP_RANGE.start(),
            CHUNK_OVERLAP_RANGE.end()
        ),
    });

    match input {
        PageInput::Upload(req) => {
            screen.extend(upload(api, state, settings, &req).await);
        }
        _ => {
            screen.info("Choose a file with /upload <path> [chunk_size] [chunk_overlap]");
        }
    }
    screen
}

pub async fn upload(
    api: &dyn QueryDocsApi,
    state: &SessionState,
    settings: &ViewSettings,
    req: &UploadRequest,
) -> Vec<Block> {
    match try_upload(api, state, settings, req).await {
        Ok(meta) => vec![
            Block::Success("Document uploaded successfully!".to_string()),
            Block::Json(meta),
        ],
        Err(e) => {
            e.log("upload_view", "upload_document");
            vec![Block::Error(e.to_string())]
        }
    }
}

async fn try_upload(
    api: &dyn QueryDocsApi,
    state: &SessionState,
    settings: &ViewSettings,
    req: &UploadRequest,
) -> Result<Value> {
    let filename = req
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| QdError::validation(format!("{} is not a file", req.path.display())))?;
    check_extension(filename)?;
    let params = UploadParams::new(
        req.chunk_size.unwrap_or(settings.default_chunk_size),
        req.chunk_overlap.unwrap_or(settings.default_chunk_overlap),
        state.session_id(),
    )?;
    let bytes = tokio::fs::read(&req.path).await.map_err(|e| QdError::Io {
        message: format!("{}: {e}", req.path.display()),
    })?;
    api.upload_document(bytes, filename, &params).await
}

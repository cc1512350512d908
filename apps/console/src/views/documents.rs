use qd_client::QueryDocsApi;
use qd_core::{format_file_size, format_timestamp, Document};

use crate::screen::{Block, Screen};

pub const NO_DOCUMENTS: &str = "No documents uploaded yet";

const COLUMNS: [&str; 6] = [
    "filename",
    "file_size",
    "status",
    "created_at",
    "is_active",
    "hash_code",
];

pub async fn render(api: &dyn QueryDocsApi) -> Screen {
    let mut screen = Screen::new();
    screen.title("Uploaded Documents");

    let documents = match api.list_documents().await {
        Ok(docs) => docs,
        Err(e) => {
            e.log("documents_view", "list_documents");
            screen.error(e.to_string());
            Vec::new()
        }
    };
    if documents.is_empty() {
        screen.info(NO_DOCUMENTS);
        return screen;
    }

    screen.push(Block::Table {
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: documents.iter().map(table_row).collect(),
    });
    for doc in &documents {
        screen.push(Block::Expander {
            label: format!("Details: {}", doc.filename),
            body: vec![Block::Json(doc.raw.clone())],
        });
    }
    screen
}

fn table_row(doc: &Document) -> Vec<String> {
    vec![
        doc.filename.clone(),
        format_file_size(doc.file_size),
        doc.status.clone(),
        doc.created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default(),
        doc.is_active.map(|a| a.to_string()).unwrap_or_default(),
        doc.hash_code.clone().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{doc, has_error, status_error, MockApi};
    use serde_json::json;

    #[tokio::test]
    async fn test_table_and_details() {
        let sparse = json!({"filename": "b.csv", "status": "failed", "hash_code": "h2"});
        let no_size: Document = serde_json::from_value(sparse.clone()).unwrap();
        let api = MockApi::with_documents(vec![doc("a.txt", "processed", Some("h1")), no_size]);
        let screen = render(&api).await;

        let rows = screen
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            rows[0],
            vec!["a.txt", "2.00 KB", "processed", "2024-05-01 10:20:30", "true", "h1"]
        );
        assert_eq!(rows[1][1], "N/A");

        let expanders = screen.expanders();
        assert_eq!(expanders.len(), 2);
        assert_eq!(expanders[0].0, "Details: a.txt");
        match &expanders[0].1[0] {
            Block::Json(v) => {
                assert_eq!(v["hash_code"], json!("h1"));
                assert_eq!(v["created_at"], json!("2024-05-01T10:20:30.123456"));
            }
            other => panic!("unexpected block {other:?}"),
        }
        assert_eq!(expanders[1].1, &[Block::Json(sparse)]);
    }

    #[tokio::test]
    async fn test_empty_list_is_informational() {
        let api = MockApi::default();
        let screen = render(&api).await;
        assert!(screen.blocks.contains(&Block::Info(NO_DOCUMENTS.to_string())));
        assert!(!has_error(&screen));
    }

    #[tokio::test]
    async fn test_failure_shows_error() {
        let api = MockApi {
            documents: Err(status_error("fetch documents", 502)),
            ..MockApi::default()
        };
        let screen = render(&api).await;
        assert!(screen
            .blocks
            .contains(&Block::Error("Failed to fetch documents: 502".to_string())));
        assert!(screen.blocks.contains(&Block::Info(NO_DOCUMENTS.to_string())));
    }
}

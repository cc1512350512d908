use chrono::{DateTime, NaiveDateTime};

use crate::Document;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Size in KB with two decimals. A missing or zero size shows as `N/A`.
pub fn format_file_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{:.2} KB", b as f64 / 1024.0),
        _ => "N/A".to_string(),
    }
}

/// Reformats a server timestamp as `YYYY-MM-DD HH:MM:SS`; unparseable input
/// is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(TIMESTAMP_FORMAT).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    raw.to_string()
}

/// `filename (status)`, the label used when picking a document to chat with.
pub fn document_label(doc: &Document) -> String {
    let status = if doc.status.is_empty() { "unknown" } else { doc.status.as_str() };
    format!("{} ({status})", doc.filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(Some(2048)), "2.00 KB");
        assert_eq!(format_file_size(Some(1536)), "1.50 KB");
        assert_eq!(format_file_size(Some(100)), "0.10 KB");
        assert_eq!(format_file_size(None), "N/A");
        assert_eq!(format_file_size(Some(0)), "N/A");
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(
            format_timestamp("2024-05-01T10:20:30.123456"),
            "2024-05-01 10:20:30"
        );
        assert_eq!(format_timestamp("2024-05-01T10:20:30"), "2024-05-01 10:20:30");
        assert_eq!(
            format_timestamp("2024-05-01T10:20:30+02:00"),
            "2024-05-01 10:20:30"
        );
        assert_eq!(format_timestamp("2024-05-01 10:20:30"), "2024-05-01 10:20:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_document_label() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "filename": "report.pdf",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(document_label(&doc), "report.pdf (pending)");

        let doc: Document = serde_json::from_value(serde_json::json!({
            "filename": "draft.md",
            "status": null
        }))
        .unwrap();
        assert_eq!(document_label(&doc), "draft.md (unknown)");
    }
}

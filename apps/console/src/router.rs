use std::path::PathBuf;
use std::str::FromStr;

use strum::{Display, EnumIter, IntoEnumIterator};

use qd_client::QueryDocsApi;
use qd_error::QdError;
use qd_session::SessionState;

use crate::screen::Screen;
use crate::views::{self, ViewSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Page {
    #[default]
    #[strum(to_string = "Chat")]
    Chat,
    #[strum(to_string = "Upload Document")]
    UploadDocument,
    #[strum(to_string = "Documents")]
    Documents,
    #[strum(to_string = "Chat History")]
    ChatHistory,
    #[strum(to_string = "Exceptions")]
    Exceptions,
}

impl Page {
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Page::Chat => &["chat"],
            Page::UploadDocument => &["upload", "upload-document", "upload_document"],
            Page::Documents => &["documents", "docs"],
            Page::ChatHistory => &["history", "chat-history", "chat_history"],
            Page::Exceptions => &["exceptions", "errors"],
        }
    }
}

impl FromStr for Page {
    type Err = QdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Page::iter()
            .find(|p| p.to_string().to_ascii_lowercase() == wanted || p.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| {
                let names: Vec<String> = Page::iter().map(|p| p.aliases()[0].to_string()).collect();
                QdError::validation(format!("unknown page `{s}`, expected one of {}", names.join(", ")))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub chunk_size: Option<u32>,
    pub chunk_overlap: Option<u32>,
}

/// What the user asked the current page to do besides showing itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageInput {
    #[default]
    Show,
    Select(String),
    Send(String),
    Upload(UploadRequest),
}

/// Renders `page`. Every page refetches what it shows.
pub async fn render_page(
    page: Page,
    input: PageInput,
    api: &dyn QueryDocsApi,
    state: &mut SessionState,
    settings: &ViewSettings,
) -> Screen {
    match page {
        Page::Chat => views::chat::render(api, state, input).await,
        Page::UploadDocument => views::upload::render(api, state, settings, input).await,
        Page::Documents => views::documents::render(api).await,
        Page::ChatHistory => views::history::render(api).await,
        Page::Exceptions => views::exceptions::render(api, settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_chat() {
        assert_eq!(Page::default(), Page::Chat);
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("Chat".parse::<Page>().unwrap(), Page::Chat);
        assert_eq!("upload document".parse::<Page>().unwrap(), Page::UploadDocument);
        assert_eq!("upload".parse::<Page>().unwrap(), Page::UploadDocument);
        assert_eq!("DOCS".parse::<Page>().unwrap(), Page::Documents);
        assert_eq!("Chat History".parse::<Page>().unwrap(), Page::ChatHistory);
        assert_eq!("history".parse::<Page>().unwrap(), Page::ChatHistory);
        assert_eq!(" exceptions ".parse::<Page>().unwrap(), Page::Exceptions);
        let err = "settings".parse::<Page>().unwrap_err();
        assert!(err.to_string().contains("unknown page"));
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = Page::iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec!["Chat", "Upload Document", "Documents", "Chat History", "Exceptions"]
        );
    }
}

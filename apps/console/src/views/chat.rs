use chrono::SecondsFormat;

use qd_client::QueryDocsApi;
use qd_core::{document_label, Document};
use qd_session::{SessionState, TranscriptEntry};

use crate::router::PageInput;
use crate::screen::{Block, Screen};

pub const NO_DOCUMENTS: &str = "No documents available. Please upload a document first.";
const NO_HASHED_DOCUMENTS: &str = "None of the uploaded documents has a hash code yet.";
pub const MESSAGE_NOT_SENT: &str = "Message not sent: there is no document to chat with.";

pub async fn render(api: &dyn QueryDocsApi, state: &mut SessionState, input: PageInput) -> Screen {
    let mut screen = Screen::new();
    screen.title("QueryDocs");
    screen.subheader("Select Document");

    let documents = match api.list_documents().await {
        Ok(docs) => docs,
        Err(e) => {
            e.log("chat_view", "list_documents");
            screen.error(e.to_string());
            Vec::new()
        }
    };
    if documents.is_empty() {
        screen.warning(NO_DOCUMENTS);
        note_unsent(&mut screen, &input);
        return screen;
    }

    let options: Vec<&Document> = documents.iter().filter(|d| d.hash().is_some()).collect();
    if options.is_empty() {
        screen.warning(NO_HASHED_DOCUMENTS);
        note_unsent(&mut screen, &input);
        return screen;
    }

    if let PageInput::Select(choice) = &input {
        match resolve_choice(&options, choice) {
            Some(hash) => state.select_document(hash),
            None => {
                screen.error(format!("No document matches `{choice}`"));
            }
        }
    }

    // 未选择或已不在列表中时默认第一个
    let selected = options
        .iter()
        .position(|d| d.hash() == state.active_document())
        .unwrap_or(0);
    let doc = options[selected];
    let hash = doc.hash().unwrap_or_default().to_string();
    if state.active_document() != Some(hash.as_str()) {
        state.select_document(hash.clone());
    }

    screen.push(Block::Select {
        label: "Select a document to chat with:".to_string(),
        options: options.iter().map(|d| document_label(d)).collect(),
        selected: Some(selected),
    });
    screen.info(format!("Chatting with document: {}", doc.filename));
    screen.subheader("Chat Interface");

    if let PageInput::Send(message) = &input {
        let outcome = send(api, state, &hash, message).await;
        screen.extend(outcome);
    }

    let entries: Vec<&TranscriptEntry> = state.transcript.for_document(&hash).collect();
    if !entries.is_empty() {
        screen.subheader("Current Session Chat History");
        screen.extend(entries.into_iter().map(transcript_block));
    }
    screen
}

/// Sends one message against `hash`. Blank input is ignored without any
/// backend call.
pub async fn send(
    api: &dyn QueryDocsApi,
    state: &mut SessionState,
    hash: &str,
    message: &str,
) -> Vec<Block> {
    if message.trim().is_empty() {
        return Vec::new();
    }
    match api.send_message(message, hash, state.session_id()).await {
        Ok(response) => {
            state.record_turn(message, &response, hash);
            vec![
                Block::Success("Message sent successfully!".to_string()),
                Block::Labeled {
                    label: "AI Response".to_string(),
                    text: response,
                },
            ]
        }
        Err(e) => {
            e.log("chat_view", "send_message");
            vec![Block::Error(e.to_string())]
        }
    }
}

fn note_unsent(screen: &mut Screen, input: &PageInput) {
    if matches!(input, PageInput::Send(m) if !m.trim().is_empty()) {
        screen.warning(MESSAGE_NOT_SENT);
    }
}

/// `choice` is a 1-based option number or a hash code.
fn resolve_choice(options: &[&Document], choice: &str) -> Option<String> {
    let choice = choice.trim();
    if let Ok(n) = choice.parse::<usize>() {
        if let Some(doc) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return doc.hash().map(str::to_string);
        }
    }
    options
        .iter()
        .filter_map(|d| d.hash())
        .find(|h| *h == choice)
        .map(str::to_string)
}

fn transcript_block(entry: &TranscriptEntry) -> Block {
    Block::Expander {
        label: format!(
            "Chat at {}",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        body: vec![
            Block::Labeled {
                label: "User".to_string(),
                text: entry.message.clone(),
            },
            Block::Labeled {
                label: "AI".to_string(),
                text: entry.response.clone(),
            },
        ],
    }
}

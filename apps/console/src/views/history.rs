use qd_client::QueryDocsApi;
use qd_core::ChatTurn;

use crate::screen::{Block, Screen};

pub const NO_HISTORY: &str = "No chat history available";

pub async fn render(api: &dyn QueryDocsApi) -> Screen {
    let mut screen = Screen::new();
    screen.title("Chat History");

    let turns = match api.list_chat_history().await {
        Ok(turns) => turns,
        Err(e) => {
            e.log("history_view", "list_chat_history");
            screen.error(e.to_string());
            Vec::new()
        }
    };
    if turns.is_empty() {
        screen.info(NO_HISTORY);
        return screen;
    }
    screen.extend(turns.iter().map(turn_block));
    screen
}

fn turn_block(turn: &ChatTurn) -> Block {
    let mut body = vec![
        Block::Labeled {
            label: "User".to_string(),
            text: turn.message.clone(),
        },
        Block::Labeled {
            label: "AI".to_string(),
            text: turn.response.clone(),
        },
    ];
    if let Some(hash) = turn.hash_code.as_deref().filter(|h| !h.is_empty()) {
        body.push(Block::Labeled {
            label: "Document Hash".to_string(),
            text: hash.to_string(),
        });
    }
    if let Some(session) = turn.session_id.as_deref().filter(|s| !s.is_empty()) {
        body.push(Block::Labeled {
            label: "Session ID".to_string(),
            text: session.to_string(),
        });
    }
    Block::Expander {
        label: format!("Chat at {}", turn.timestamp),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{status_error, turn, MockApi};

    #[tokio::test]
    async fn test_server_order_and_optional_fields() {
        let api = MockApi {
            history: Ok(vec![
                turn("newer", "r2", Some("h1"), Some("s1")),
                turn("older", "r1", None, None),
            ]),
            ..MockApi::default()
        };
        let screen = render(&api).await;
        let expanders = screen.expanders();
        assert_eq!(expanders.len(), 2);
        assert_eq!(expanders[0].0, "Chat at 2024-05-01T10:20:30");

        let first = expanders[0].1;
        assert_eq!(first.len(), 4);
        assert_eq!(
            first[0],
            Block::Labeled {
                label: "User".into(),
                text: "newer".into()
            }
        );
        assert_eq!(
            first[3],
            Block::Labeled {
                label: "Session ID".into(),
                text: "s1".into()
            }
        );
        assert_eq!(expanders[1].1.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let api = MockApi::default();
        let screen = render(&api).await;
        assert_eq!(
            screen.blocks,
            vec![
                Block::Title("Chat History".into()),
                Block::Info(NO_HISTORY.into())
            ]
        );
        assert_eq!(api.calls(), vec!["list_chat_history"]);
    }

    #[tokio::test]
    async fn test_failure() {
        let api = MockApi {
            history: Err(status_error("fetch chat history", 500)),
            ..MockApi::default()
        };
        let screen = render(&api).await;
        assert!(screen
            .blocks
            .contains(&Block::Error("Failed to fetch chat history: 500".to_string())));
    }
}

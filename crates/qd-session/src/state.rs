use tracing::debug;

use crate::{Session, Transcript, TranscriptEntry};

/// 控制台运行期状态，由入口持有并以引用传给各视图
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub session: Session,
    pub transcript: Transcript,
    active_document: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> &str {
        &self.session.id
    }

    pub fn active_document(&self) -> Option<&str> {
        self.active_document.as_deref()
    }

    pub fn select_document(&mut self, hash_code: impl Into<String>) {
        let hash_code = hash_code.into();
        debug!(session_id = %self.session.id, hash_code = %hash_code, "document selected");
        self.active_document = Some(hash_code);
    }

    /// 记录一次成功的问答
    pub fn record_turn(&mut self, message: &str, response: &str, hash_code: &str) -> &TranscriptEntry {
        self.transcript.append(message, response, hash_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_record() {
        let mut state = SessionState::new();
        assert!(state.active_document().is_none());
        state.select_document("h1");
        assert_eq!(state.active_document(), Some("h1"));

        let entry = state.record_turn("hi", "hello", "h1").clone();
        assert_eq!(entry.message, "hi");
        assert_eq!(entry.hash_code, "h1");
        assert_eq!(state.transcript.len(), 1);

        state.select_document("h2");
        assert_eq!(state.active_document(), Some("h2"));
    }

    #[test]
    fn test_states_have_distinct_sessions() {
        assert_ne!(SessionState::new().session_id(), SessionState::new().session_id());
    }
}

pub mod session;
pub mod state;
pub mod transcript;

// 重新导出核心类型
pub use session::Session;
pub use state::SessionState;
pub use transcript::{Transcript, TranscriptEntry};

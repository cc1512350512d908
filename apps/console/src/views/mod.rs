pub mod chat;
pub mod documents;
pub mod exceptions;
pub mod history;
pub mod upload;

use qd_core::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Knobs the views read from configuration.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub default_chunk_size: u32,
    pub default_chunk_overlap: u32,
    pub exceptions_height: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            exceptions_height: 40,
        }
    }
}

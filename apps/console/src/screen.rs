use serde_json::Value;

/// One display element of a rendered page.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Subheader(String),
    Text(String),
    /// `label: text`, label emphasised.
    Labeled { label: String, text: String },
    Info(String),
    Warning(String),
    Success(String),
    Error(String),
    /// Numbered choice list; `selected` indexes into `options`.
    Select {
        label: String,
        options: Vec<String>,
        selected: Option<usize>,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Json(Value),
    /// Collapsed by default, opened with `/open <n>`.
    Expander { label: String, body: Vec<Block> },
    /// Pre-rendered markup shown in a viewport of at most `height` lines.
    Viewport { markup: String, height: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub blocks: Vec<Block>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) -> &mut Self {
        self.blocks.extend(blocks);
        self
    }

    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Title(text.into()))
    }

    pub fn subheader(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Subheader(text.into()))
    }

    pub fn info(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Info(text.into()))
    }

    pub fn warning(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Warning(text.into()))
    }

    pub fn error(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Error(text.into()))
    }

    pub fn success(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Success(text.into()))
    }

    /// Expanders in display order; `/open <n>` is 1-based into this list.
    pub fn expanders(&self) -> Vec<(&str, &[Block])> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Expander { label, body } => Some((label.as_str(), body.as_slice())),
                _ => None,
            })
            .collect()
    }
}

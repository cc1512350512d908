use std::io::{self, Write};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

use qd_client::QueryDocsApi;
use qd_session::SessionState;

use crate::command::{self, Command, HELP};
use crate::render::Renderer;
use crate::router::{self, Page, PageInput};
use crate::screen::{Block, Screen};
use crate::views::ViewSettings;

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A full page, printed under the navigation header.
    Render(Screen),
    /// Loose blocks such as help text or a parse error.
    Blocks(Vec<Block>),
    /// Body of an expander from the last page.
    Expand { label: String, body: Vec<Block> },
    Nothing,
    Quit,
}

/// Owns the session state and the current page; one command at a time.
pub struct Console<A: QueryDocsApi> {
    api: A,
    state: SessionState,
    page: Page,
    settings: ViewSettings,
    last: Option<Screen>,
}

impl<A: QueryDocsApi> Console<A> {
    pub fn new(api: A, settings: ViewSettings, page: Page) -> Self {
        Self {
            api,
            state: SessionState::new(),
            page,
            settings,
            last: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn handle_line(&mut self, line: &str) -> Step {
        match command::parse(line) {
            Ok(cmd) => self.handle(cmd).await,
            Err(e) => Step::Blocks(vec![Block::Error(e.to_string())]),
        }
    }

    pub async fn handle(&mut self, cmd: Command) -> Step {
        debug!(page = %self.page, command = ?cmd, "handling command");
        match cmd {
            Command::Empty => Step::Nothing,
            Command::Quit => Step::Quit,
            Command::Help => Step::Blocks(vec![Block::Text(HELP.to_string())]),
            Command::Session => Step::Blocks(self.session_blocks()),
            Command::Refresh => self.show(PageInput::Show).await,
            Command::Go(page) => {
                self.page = page;
                self.show(PageInput::Show).await
            }
            Command::Select(choice) => {
                self.page = Page::Chat;
                self.show(PageInput::Select(choice)).await
            }
            Command::Upload(req) => {
                self.page = Page::UploadDocument;
                self.show(PageInput::Upload(req)).await
            }
            Command::Say(text) if self.page == Page::Chat => self.show(PageInput::Send(text)).await,
            Command::Say(_) => Step::Blocks(vec![Block::Info(
                "Messages are sent from the Chat page, switch with /chat".to_string(),
            )]),
            Command::Open(n) => self.open(n),
        }
    }

    async fn show(&mut self, input: PageInput) -> Step {
        let screen =
            router::render_page(self.page, input, &self.api, &mut self.state, &self.settings).await;
        self.last = Some(screen.clone());
        Step::Render(screen)
    }

    fn session_blocks(&self) -> Vec<Block> {
        let transcript = &self.state.transcript;
        let sent = if transcript.is_empty() {
            "none yet".to_string()
        } else {
            transcript.len().to_string()
        };
        vec![
            Block::Labeled {
                label: "Session ID".to_string(),
                text: self.state.session_id().to_string(),
            },
            Block::Labeled {
                label: "Started".to_string(),
                text: self.state.session.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            },
            Block::Labeled {
                label: "Messages sent".to_string(),
                text: sent,
            },
        ]
    }

    fn open(&self, n: usize) -> Step {
        let found = self
            .last
            .as_ref()
            .and_then(|s| s.expanders().get(n.checked_sub(1)?).map(|(l, b)| (l.to_string(), b.to_vec())));
        match found {
            Some((label, body)) => Step::Expand { label, body },
            None => Step::Blocks(vec![Block::Warning(format!(
                "No expandable section [{n}] on this page"
            ))]),
        }
    }
}

/// Interactive loop: read a line, handle it, print the outcome.
pub async fn run<A: QueryDocsApi>(mut console: Console<A>, renderer: Renderer) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut stdout = io::stdout();

    info!(session_id = %console.state().session_id(), "console started");
    let first = console.handle(Command::Refresh).await;
    present(&mut stdout, &renderer, &console, first)?;
    writeln!(stdout, "Type {} for commands.", "/help".yellow())?;

    loop {
        let prompt = format!("{}> ", console.page().to_string().green());
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match console.handle_line(&line).await {
                    Step::Quit => break,
                    step => present(&mut stdout, &renderer, &console, step)?,
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn present<A: QueryDocsApi>(
    out: &mut dyn Write,
    renderer: &Renderer,
    console: &Console<A>,
    step: Step,
) -> io::Result<()> {
    match step {
        Step::Render(screen) => {
            renderer.header(out, console.page(), console.state().session_id())?;
            renderer.render(out, &screen)?;
        }
        Step::Blocks(blocks) => {
            renderer.render(out, &Screen { blocks })?;
        }
        Step::Expand { label, body } => renderer.render_body(out, &label, &body)?,
        Step::Nothing | Step::Quit => {}
    }
    out.flush()
}

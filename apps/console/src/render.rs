use std::io::{self, Write};

use colored::Colorize;
use strum::IntoEnumIterator;

use crate::router::Page;
use crate::screen::{Block, Screen};

const INDENT: usize = 4;

/// Prints screens to a terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub wrap_width: usize,
    pub expand_all: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            expand_all: false,
        }
    }
}

impl Renderer {
    /// Navigation line and session id, printed above every page.
    pub fn header(&self, out: &mut dyn Write, current: Page, session_id: &str) -> io::Result<()> {
        let nav: Vec<String> = Page::iter()
            .map(|p| {
                if p == current {
                    format!("[{}]", p).bold().green().to_string()
                } else {
                    p.to_string().dimmed().to_string()
                }
            })
            .collect();
        writeln!(out, "{}  {}", "QueryDocs".bold(), nav.join(" | "))?;
        writeln!(out, "{}", format!("Session ID: {session_id}").dimmed())?;
        writeln!(out, "{}", "─".repeat(self.rule_width()).dimmed())
    }

    pub fn render(&self, out: &mut dyn Write, screen: &Screen) -> io::Result<()> {
        let mut expander_no = 0;
        for block in &screen.blocks {
            self.block(out, block, 0, &mut expander_no)?;
        }
        Ok(())
    }

    /// Prints an expander body on its own, used by `/open`.
    pub fn render_body(&self, out: &mut dyn Write, label: &str, body: &[Block]) -> io::Result<()> {
        writeln!(out, "{} {}", "▾".cyan(), label.bold())?;
        let mut expander_no = 0;
        for block in body {
            self.block(out, block, INDENT, &mut expander_no)?;
        }
        Ok(())
    }

    fn rule_width(&self) -> usize {
        self.wrap_width.min(80)
    }

    fn block(
        &self,
        out: &mut dyn Write,
        block: &Block,
        indent: usize,
        expander_no: &mut usize,
    ) -> io::Result<()> {
        let pad = " ".repeat(indent);
        match block {
            Block::Title(t) => {
                writeln!(out)?;
                writeln!(out, "{pad}{}", t.bold().bright_cyan())?;
            }
            Block::Subheader(t) => {
                writeln!(out)?;
                writeln!(out, "{pad}{}", t.bold())?;
            }
            Block::Text(t) => {
                for line in t.lines() {
                    writeln!(out, "{pad}{line}")?;
                }
            }
            Block::Labeled { label, text } => {
                writeln!(out, "{pad}{} {}", format!("{label}:").bold(), text)?;
            }
            Block::Info(t) => writeln!(out, "{pad}{} {}", "ℹ".blue(), t)?,
            Block::Warning(t) => writeln!(out, "{pad}{} {}", "⚠".yellow(), t.yellow())?,
            Block::Success(t) => writeln!(out, "{pad}{} {}", "✔".green(), t.green())?,
            Block::Error(t) => writeln!(out, "{pad}{} {}", "✖".red(), t.red())?,
            Block::Select {
                label,
                options,
                selected,
            } => {
                writeln!(out, "{pad}{label}")?;
                for (i, opt) in options.iter().enumerate() {
                    if Some(i) == *selected {
                        writeln!(out, "{pad}  {} {}", format!("{:>2}.", i + 1).green(), opt.bold())?;
                    } else {
                        writeln!(out, "{pad}  {:>2}. {}", i + 1, opt)?;
                    }
                }
            }
            Block::Table { columns, rows } => {
                for line in table_lines(columns, rows) {
                    writeln!(out, "{pad}{line}")?;
                }
            }
            Block::Json(v) => {
                let pretty = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
                for line in pretty.lines() {
                    writeln!(out, "{pad}{line}")?;
                }
            }
            Block::Expander { label, body } => {
                if indent == 0 {
                    *expander_no += 1;
                }
                if self.expand_all {
                    writeln!(out, "{pad}{} {}", "▾".cyan(), label.bold())?;
                    for inner in body {
                        self.block(out, inner, indent + INDENT, expander_no)?;
                    }
                } else {
                    writeln!(out, "{pad}{} {} {}", format!("[{expander_no}]").cyan(), "▸".cyan(), label)?;
                }
            }
            Block::Viewport { markup, height } => {
                let (lines, hidden) = viewport_lines(markup, self.wrap_width, *height);
                let rule = "─".repeat(self.rule_width());
                writeln!(out, "{pad}{}", rule.dimmed())?;
                for line in lines {
                    writeln!(out, "{pad}{line}")?;
                }
                if hidden > 0 {
                    writeln!(out, "{pad}{}", format!("… {hidden} more lines").dimmed())?;
                }
                writeln!(out, "{pad}{}", rule.dimmed())?;
            }
        }
        Ok(())
    }
}

/// Converts markup to terminal text and keeps the first `height` lines.
/// Returns the kept lines and how many were cut.
pub fn viewport_lines(markup: &str, width: usize, height: usize) -> (Vec<String>, usize) {
    let text = html2text::from_read(markup.as_bytes(), width.max(20));
    let all: Vec<&str> = text.lines().collect();
    let hidden = all.len().saturating_sub(height);
    let kept = all.into_iter().take(height).map(str::to_string).collect();
    (kept, hidden)
}

/// Left-aligned plain-text table with a header rule.
pub fn table_lines(columns: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let fmt_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(fmt_row(columns));
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(fmt_row(row));
    }
    lines
}

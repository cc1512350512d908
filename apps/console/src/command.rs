use std::path::PathBuf;

use qd_error::{QdError, Result};

use crate::router::{Page, UploadRequest};

pub const HELP: &str = "\
Commands:
  /chat /upload /documents /history /exceptions   switch page
  /go <page>                                      switch page by name
  /select <n|hash>                                choose the document to chat with
  /upload <path> [chunk_size] [chunk_overlap]     upload a txt, md, csv or pdf file
  /open <n>                                       expand section [n] of the last page
  /refresh                                        reload the current page
  /session                                        show the session id
  /help                                           this list
  /quit                                           leave
Any other text on the Chat page is sent to the selected document.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Go(Page),
    Select(String),
    Upload(UploadRequest),
    Open(usize),
    Refresh,
    Session,
    Help,
    Quit,
    /// Plain text, a chat message.
    Say(String),
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Say(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match name.as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "h" | "?" => Command::Help,
        "refresh" | "r" => Command::Refresh,
        "session" => Command::Session,
        "go" | "page" => {
            if args.is_empty() {
                return Err(QdError::validation("usage: /go <page>"));
            }
            Command::Go(args.join(" ").parse()?)
        }
        "select" => {
            if args.len() != 1 {
                return Err(QdError::validation("usage: /select <n|hash>"));
            }
            Command::Select(args[0].to_string())
        }
        "open" => {
            let n = args
                .first()
                .and_then(|a| a.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .ok_or_else(|| QdError::validation("usage: /open <n>"))?;
            Command::Open(n)
        }
        "upload" if !args.is_empty() => Command::Upload(parse_upload(&args)),
        other => match other.parse::<Page>() {
            Ok(page) => Command::Go(page),
            Err(_) => {
                return Err(QdError::validation(format!(
                    "unknown command /{other}, type /help for the list"
                )))
            }
        },
    };
    Ok(command)
}

/// Trailing numbers are chunk size then overlap; everything before is the path.
fn parse_upload(args: &[&str]) -> UploadRequest {
    let mut end = args.len();
    let mut numbers = Vec::new();
    while end > 1 && numbers.len() < 2 {
        match args[end - 1].parse::<u32>() {
            Ok(n) => {
                numbers.push(n);
                end -= 1;
            }
            Err(_) => break,
        }
    }
    numbers.reverse();
    UploadRequest {
        path: PathBuf::from(args[..end].join(" ")),
        chunk_size: numbers.first().copied(),
        chunk_overlap: numbers.get(1).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(parse("  what is this? ").unwrap(), Command::Say("what is this?".into()));
        assert_eq!(parse("").unwrap(), Command::Empty);
        assert_eq!(parse("   ").unwrap(), Command::Empty);
    }

    #[test]
    fn test_page_switches() {
        assert_eq!(parse("/chat").unwrap(), Command::Go(Page::Chat));
        assert_eq!(parse("/upload").unwrap(), Command::Go(Page::UploadDocument));
        assert_eq!(parse("/documents").unwrap(), Command::Go(Page::Documents));
        assert_eq!(parse("/history").unwrap(), Command::Go(Page::ChatHistory));
        assert_eq!(parse("/Exceptions").unwrap(), Command::Go(Page::Exceptions));
        assert_eq!(parse("/go chat history").unwrap(), Command::Go(Page::ChatHistory));
        assert!(parse("/go").is_err());
    }

    #[test]
    fn test_select_and_open() {
        assert_eq!(parse("/select 2").unwrap(), Command::Select("2".into()));
        assert_eq!(parse("/select abc123").unwrap(), Command::Select("abc123".into()));
        assert!(parse("/select").is_err());
        assert_eq!(parse("/open 3").unwrap(), Command::Open(3));
        assert!(parse("/open 0").is_err());
        assert!(parse("/open x").is_err());
    }

    #[test]
    fn test_upload_arguments() {
        assert_eq!(
            parse("/upload docs/a.pdf").unwrap(),
            Command::Upload(UploadRequest {
                path: PathBuf::from("docs/a.pdf"),
                chunk_size: None,
                chunk_overlap: None,
            })
        );
        assert_eq!(
            parse("/upload a.txt 600").unwrap(),
            Command::Upload(UploadRequest {
                path: PathBuf::from("a.txt"),
                chunk_size: Some(600),
                chunk_overlap: None,
            })
        );
        assert_eq!(
            parse("/upload my notes.md 500 200").unwrap(),
            Command::Upload(UploadRequest {
                path: PathBuf::from("my notes.md"),
                chunk_size: Some(500),
                chunk_overlap: Some(200),
            })
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("/settings").unwrap_err();
        assert!(err.to_string().contains("unknown command /settings"));
        assert_eq!(parse("/quit").unwrap(), Command::Quit);
        assert_eq!(parse("/exit").unwrap(), Command::Quit);
    }
}

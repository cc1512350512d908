use qd_client::QueryDocsApi;

use crate::screen::{Block, Screen};
use crate::views::ViewSettings;

pub const NO_EXCEPTIONS: &str = "No exception logs available";

/// A failed fetch is treated as "nothing to show": logged, never an error block.
pub async fn render(api: &dyn QueryDocsApi, settings: &ViewSettings) -> Screen {
    let mut screen = Screen::new();
    screen.title("Exception Logs");

    let report = match api.fetch_exception_report().await {
        Ok(report) => report,
        Err(e) => {
            e.log("exceptions_view", "fetch_exception_report");
            String::new()
        }
    };
    if report.trim().is_empty() {
        screen.info(NO_EXCEPTIONS);
    } else {
        screen.push(Block::Viewport {
            markup: report,
            height: settings.exceptions_height,
        });
    }
    screen
}

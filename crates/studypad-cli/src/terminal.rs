//! Terminal implementations of the presentation capability traits.

use std::io::{self, Write};
use std::sync::Mutex;
use studypad_core::editor::{AuthEvents, EditorChrome, EditorSurface};

/// Routes the gateway's session-invalidation event to the terminal. The
/// CLI equivalent of redirecting to the login page.
pub struct CliAuthEvents;

impl AuthEvents for CliAuthEvents {
    fn session_expired(&self) {
        eprintln!("Session expired; stored credentials were cleared. Run `studypad login`.");
    }
}

/// Editor chrome that prints to stderr and asks questions on stdin.
pub struct CliChrome;

impl EditorChrome for CliChrome {
    fn set_title(&self, title: &str) {
        eprintln!("== {title} ==");
    }

    fn set_save_status(&self, status: &str) {
        eprintln!("[{status}]");
    }

    fn toast(&self, message: &str) {
        eprintln!("> {message}");
    }

    fn confirm_discard(&self) -> bool {
        prompt_confirm("You have unsaved changes. Continue?")
    }
}

/// Blocking y/N prompt on the controlling terminal.
pub fn prompt_confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    io::stderr().flush().ok();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

/// In-memory editing surface for the CLI flows.
///
/// The "cursor" of this surface is always the end of the document, so image
/// locators are appended.
#[derive(Default)]
pub struct BufferSurface {
    content: Mutex<String>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorSurface for BufferSurface {
    fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }

    fn set_content(&self, html: &str) {
        *self.content.lock().unwrap() = html.to_string();
    }

    fn insert_image(&self, url: &str) {
        self.content
            .lock()
            .unwrap()
            .push_str(&format!("<img src=\"{url}\">"));
    }
}

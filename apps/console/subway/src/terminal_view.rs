//! [`View`] for an interactive terminal.
//!
//! Page state is kept by a [`MemoryView`]; every change redraws the page as
//! plain text. `confirm` blocks on the same input the command loop reads.

use client_core::router::{HOME_PATH, LINES_PATH, SECTIONS_PATH, SIGN_UP_PATH, STATIONS_PATH};
use client_core::view::{MemoryView, Region, View, ViewSnapshot};

use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, warn};

const CONFIRM_SUFFIX: &str = " [y/N] ";
const MENU_TITLE_SIGN_UP: &str = "Sign up";
const RULE: &str = "----------------------------------------";

pub struct TerminalView {
    state: MemoryView,
    output: Mutex<Box<dyn Write + Send>>,
    input: Mutex<Box<dyn BufRead + Send>>,
}

impl TerminalView {
    pub fn new(output: Box<dyn Write + Send>, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            state: MemoryView::new(),
            output: Mutex::new(output),
            input: Mutex::new(input),
        }
    }

    pub fn stdio() -> Self {
        Self::new(
            Box::new(io::stdout()),
            Box::new(BufReader::new(io::stdin())),
        )
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.snapshot()
    }

    /// Prompt and read one line. `Ok(None)` on end of input.
    pub fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        self.write(prompt);
        let mut line = String::new();
        let read = match self.input.lock() {
            Ok(mut input) => input.read_line(&mut line)?,
            Err(_) => return Err(io::Error::other("terminal input lock poisoned")),
        };
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print a line outside the page (help, hints).
    pub fn notice(&self, message: &str) {
        self.write(&format!("{message}\n"));
    }

    fn write(&self, text: &str) {
        let Ok(mut output) = self.output.lock() else {
            warn!("Terminal output lock poisoned");
            return;
        };
        if let Err(e) = output.write_all(text.as_bytes()).and_then(|()| output.flush()) {
            warn!("Failed to write to terminal: {e}");
        }
    }

    fn redraw(&self) {
        let snapshot = self.state.snapshot();
        self.write(&format!(
            "{RULE}\n{}\n{RULE}\n{}\n",
            menu_line(&snapshot),
            render_text(&snapshot.main)
        ));
    }
}

impl View for TerminalView {
    fn replace_main(&self, markup: &str) {
        self.state.replace_main(markup);
        self.redraw();
    }

    fn replace_region(&self, region: Region, markup: &str) {
        self.state.replace_region(region, markup);
        self.redraw();
    }

    fn append_to_region(&self, region: Region, markup: &str) {
        self.state.append_to_region(region, markup);
        self.redraw();
    }

    fn set_sign_in_control(&self, label: &str, href: &str) {
        self.state.set_sign_in_control(label, href);
    }

    fn set_session_menu_visible(&self, visible: bool) {
        self.state.set_session_menu_visible(visible);
    }

    fn set_modal_open(&self, open: bool) {
        self.state.set_modal_open(open);
        if open {
            self.notice("(line form open: pick a color, then 'line add ...')");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.state.confirm(message);
        match self.read_line(&format!("{message}{CONFIRM_SUFFIX}")) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read confirmation: {e}");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        self.state.alert(message);
        self.notice(&format!("! {message}"));
    }

    fn show_snackbar(&self, message: &str, show_time: Duration) {
        debug!("Snackbar for {show_time:?}: {message}");
        self.state.show_snackbar(message, show_time);
        self.notice(&format!("* {message}"));
    }
}

/// Navigation entries as `label (path)`, following the session visibility.
pub fn menu_line(snapshot: &ViewSnapshot) -> String {
    let mut entries = vec![format!("Home ({HOME_PATH})")];
    if snapshot.session_menu_visible {
        entries.push(format!("Stations ({STATIONS_PATH})"));
        entries.push(format!("Lines ({LINES_PATH})"));
        entries.push(format!("Sections ({SECTIONS_PATH})"));
    } else {
        entries.push(format!("{MENU_TITLE_SIGN_UP} ({SIGN_UP_PATH})"));
    }
    if !snapshot.sign_in_label.is_empty() {
        entries.push(format!(
            "{} ({})",
            snapshot.sign_in_label, snapshot.sign_in_href
        ));
    }
    entries.join(" | ")
}

/// Flatten page markup into readable lines.
pub fn render_text(markup: &str) -> String {
    let mut text = String::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => {
                apply_tag(&rest[open + 1..open + close], &mut text);
                rest = &rest[open + close + 1..];
            }
            None => {
                text.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    unescape(&text)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_tag(tag: &str, text: &mut String) {
    let closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();

    match (name, closing) {
        ("h2", false) => text.push_str("\n== "),
        ("h2", true) => text.push_str(" ==\n"),
        ("li", false) => text.push_str("\n  * "),
        ("option", false) => {
            text.push_str("\n  - ");
            text.push_str(attribute(tag, "value").unwrap_or_default());
        }
        ("input", _) => {
            if let Some(field) = attribute(tag, "name") {
                text.push_str(&format!("\n  <{field}>"));
            }
        }
        ("button", false) => text.push_str(" ["),
        ("button", true) => text.push(']'),
        ("span", true) => text.push(' '),
        ("a", false) => {
            if let Some(href) = attribute(tag, "href") {
                text.push_str(&format!("\n  -> {href}: "));
            }
        }
        ("p" | "section" | "form" | "ul" | "div" | "datalist", _) => text.push('\n'),
        _ => {}
    }
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!("{name}=\"");
    let start = tag.find(&marker)? + marker.len();
    let end = start + tag[start..].find('"')?;
    Some(&tag[start..end])
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

//! Headless [`View`] that keeps the rendered state in memory.

use crate::view::{Region, View};

use std::sync::Mutex;
use std::time::Duration;

use log::{trace, warn};

/// Everything a [`MemoryView`] has rendered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub main: String,
    pub main_writes: usize,
    pub sign_in_label: String,
    pub sign_in_href: String,
    pub session_menu_visible: bool,
    pub modal_open: bool,
    pub confirm_prompts: Vec<String>,
    pub alerts: Vec<String>,
    pub snackbars: Vec<String>,
}

impl ViewSnapshot {
    /// Number of times `needle` appears in the main content.
    pub fn count_in_main(&self, needle: &str) -> usize {
        self.main.matches(needle).count()
    }

    /// Inner markup of a region, if the current page has it.
    pub fn region(&self, region: Region) -> Option<&str> {
        region_bounds(&self.main, region).map(|(start, end)| &self.main[start..end])
    }
}

#[derive(Debug)]
pub struct MemoryView {
    state: Mutex<ViewSnapshot>,
    confirm_answer: Mutex<bool>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewSnapshot::default()),
            confirm_answer: Mutex::new(true),
        }
    }

    /// Answer given to every later `confirm` prompt.
    pub fn answer_confirm(&self, answer: bool) {
        if let Ok(mut current) = self.confirm_answer.lock() {
            *current = answer;
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    fn with_state(&self, f: impl FnOnce(&mut ViewSnapshot)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte range of a region's inner markup within `main`.
fn region_bounds(main: &str, region: Region) -> Option<(usize, usize)> {
    let class_attr = format!("class=\"{}\"", region.class_name());
    let class_at = main.find(&class_attr)?;
    let start = class_at + main[class_at..].find('>')? + 1;
    let close_tag = format!("</{}>", region.tag());
    let end = start + main[start..].find(&close_tag)?;
    Some((start, end))
}

impl View for MemoryView {
    fn replace_main(&self, markup: &str) {
        trace!("MemoryView: replace main ({} bytes)", markup.len());
        self.with_state(|state| {
            state.main = markup.to_string();
            state.main_writes += 1;
        });
    }

    fn replace_region(&self, region: Region, markup: &str) {
        self.with_state(|state| match region_bounds(&state.main, region) {
            Some((start, end)) => state.main.replace_range(start..end, markup),
            None => warn!("MemoryView: region {region:?} is not on the current page"),
        });
    }

    fn append_to_region(&self, region: Region, markup: &str) {
        self.with_state(|state| match region_bounds(&state.main, region) {
            Some((_, end)) => state.main.insert_str(end, markup),
            None => warn!("MemoryView: region {region:?} is not on the current page"),
        });
    }

    fn set_sign_in_control(&self, label: &str, href: &str) {
        self.with_state(|state| {
            state.sign_in_label = label.to_string();
            state.sign_in_href = href.to_string();
        });
    }

    fn set_session_menu_visible(&self, visible: bool) {
        self.with_state(|state| state.session_menu_visible = visible);
    }

    fn set_modal_open(&self, open: bool) {
        self.with_state(|state| state.modal_open = open);
    }

    fn confirm(&self, message: &str) -> bool {
        self.with_state(|state| state.confirm_prompts.push(message.to_string()));
        self.confirm_answer.lock().map(|answer| *answer).unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        self.with_state(|state| state.alerts.push(message.to_string()));
    }

    fn show_snackbar(&self, message: &str, _show_time: Duration) {
        self.with_state(|state| state.snackbars.push(message.to_string()));
    }
}

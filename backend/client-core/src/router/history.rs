//! Browser history seam.

use std::sync::Mutex;

use log::trace;

pub trait History: Send + Sync {
    /// Push a new entry (the browser's `pushState`).
    fn push(&self, path: &str);

    /// Path of the current entry.
    fn current(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct Entries {
    paths: Vec<String>,
    index: usize,
}

/// In-memory session history with back/forward traversal.
///
/// `back` and `forward` return the path a popstate event would carry; the
/// caller hands it to the router's `render`, never to `route`.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Entries>,
}

impl MemoryHistory {
    /// History whose first entry is the page the app was loaded on.
    pub fn starting_at(path: &str) -> Self {
        Self {
            entries: Mutex::new(Entries {
                paths: vec![path.to_string()],
                index: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.paths.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn back(&self) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        if entries.index == 0 || entries.paths.is_empty() {
            return None;
        }
        entries.index -= 1;
        entries.paths.get(entries.index).cloned()
    }

    pub fn forward(&self) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        if entries.index + 1 >= entries.paths.len() {
            return None;
        }
        entries.index += 1;
        entries.paths.get(entries.index).cloned()
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if !entries.paths.is_empty() {
                // Pushing drops any forward entries.
                let keep = entries.index + 1;
                entries.paths.truncate(keep);
            }
            entries.paths.push(path.to_string());
            entries.index = entries.paths.len() - 1;
            trace!("History push {path} (depth {})", entries.paths.len());
        }
    }

    fn current(&self) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries.paths.get(entries.index).cloned()
    }
}

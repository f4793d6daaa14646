//! The rendering surface the core drives.
//!
//! Everything the browser DOM would do for the client goes through [`View`]:
//! swapping the main content region, editing a named list region, toggling the
//! navigation controls, and the three kinds of user feedback (blocking confirm,
//! blocking alert, transient snackbar).

pub mod memory;

pub use memory::{MemoryView, ViewSnapshot};

use std::time::Duration;

/// Named sub-regions of a page that are edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    StationList,
    LineList,
    SectionList,
    StationOptions,
}

impl Region {
    /// Class attribute of the region's wrapper element.
    pub fn class_name(&self) -> &'static str {
        match self {
            Region::StationList => "station-list-wrapper",
            Region::LineList => "line-list-wrapper",
            Region::SectionList => "section-list-wrapper",
            Region::StationOptions => "station-option-wrapper",
        }
    }

    /// Tag name of the wrapper element.
    pub fn tag(&self) -> &'static str {
        match self {
            Region::StationOptions => "datalist",
            _ => "ul",
        }
    }
}

pub trait View: Send + Sync {
    /// Replace the whole main content region.
    fn replace_main(&self, markup: &str);

    /// Replace the contents of a region inside the main content.
    fn replace_region(&self, region: Region, markup: &str);

    /// Append markup at the end of a region inside the main content.
    fn append_to_region(&self, region: Region, markup: &str);

    /// Update the sign-in/sign-out navigation control.
    fn set_sign_in_control(&self, label: &str, href: &str);

    /// Show or hide the menu controls that only make sense with a session.
    fn set_session_menu_visible(&self, visible: bool);

    fn set_modal_open(&self, open: bool);

    /// Blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Blocking notification.
    fn alert(&self, message: &str);

    /// Transient notification.
    fn show_snackbar(&self, message: &str, show_time: Duration);
}

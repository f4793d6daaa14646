// Unit tests for the terminal view
// Output is captured through a shared buffer; input is scripted

use crate::terminal_view::{TerminalView, menu_line, render_text};

use client_core::templates;
use client_core::view::{Region, View, ViewSnapshot};

use models::Station;

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub(crate) fn scripted_view(input: &str) -> (TerminalView, SharedBuffer) {
    let output = SharedBuffer::default();
    let view = TerminalView::new(
        Box::new(output.clone()),
        Box::new(Cursor::new(input.as_bytes().to_vec())),
    );
    (view, output)
}

/// **VALUE**: Verifies page markup flattens into readable lines with entities decoded.
///
/// **BUG THIS CATCHES**: Would catch raw tags or `&amp;` reaching the terminal.
#[test]
fn given_stations_page_when_rendered_as_text_then_items_listed() {
    let list: String = [(1, "Gangnam"), (2, "Seoul & Co")]
        .iter()
        .map(|(id, name)| {
            templates::station_item(&Station {
                id: *id,
                name: name.to_string(),
            })
        })
        .collect();

    let text = render_text(&templates::stations_page(&list));

    assert!(text.contains("== Stations =="));
    assert!(text.contains("  * Gangnam"));
    assert!(text.contains("  * Seoul & Co"));
    assert!(text.contains("<station-name>"));
    assert!(!text.contains("<li"));
}

#[test]
fn given_options_region_when_rendered_then_option_values_shown() {
    let text = render_text(
        r#"<datalist class="station-option-wrapper"><option value="Jamsil"></option></datalist>"#,
    );

    assert_eq!(text, "  - Jamsil");
}

#[test]
fn given_unterminated_tag_when_rendered_then_text_kept() {
    assert_eq!(render_text("Gangnam <b"), "Gangnam <b");
}

/// **VALUE**: Verifies the confirm prompt reads the answer from the input.
///
/// **WHY THIS MATTERS**: Sign-out asks first; anything but an explicit yes
/// must keep the user signed in.
///
/// **BUG THIS CATCHES**: Would catch a default-yes confirmation.
#[test]
fn given_answers_when_confirming_then_only_yes_accepts() {
    let (view, output) = scripted_view("y\nno\n\nYES\n");

    assert!(view.confirm("Sign out?"));
    assert!(!view.confirm("Sign out?"));
    assert!(!view.confirm("Sign out?"));
    assert!(view.confirm("Sign out?"));
    assert!(!view.confirm("Sign out?"), "end of input declines");
    assert!(output.contents().contains("Sign out? [y/N] "));
}

#[test]
fn given_region_edit_when_applied_then_page_redrawn() {
    let (view, output) = scripted_view("");
    view.replace_main(&templates::stations_page(""));

    view.append_to_region(
        Region::StationList,
        &templates::station_item(&Station {
            id: 9,
            name: "Jamsil".to_string(),
        }),
    );

    let snapshot = view.snapshot();
    assert!(snapshot.region(Region::StationList).unwrap().contains("Jamsil"));
    assert!(output.contents().contains("  * Jamsil"));
}

#[test]
fn given_session_menu_when_listing_then_entries_follow_visibility() {
    let signed_out = ViewSnapshot {
        sign_in_label: "Sign in".to_string(),
        sign_in_href: "/signin".to_string(),
        ..ViewSnapshot::default()
    };
    let signed_in = ViewSnapshot {
        sign_in_label: "Sign out".to_string(),
        sign_in_href: "/signout".to_string(),
        session_menu_visible: true,
        ..ViewSnapshot::default()
    };

    assert_eq!(
        menu_line(&signed_out),
        "Home (/) | Sign up (/signup) | Sign in (/signin)"
    );
    assert!(menu_line(&signed_in).contains("Lines (/lines)"));
    assert!(menu_line(&signed_in).ends_with("Sign out (/signout)"));
}

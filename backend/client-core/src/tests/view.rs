use crate::templates;
use crate::view::{MemoryView, Region, View};

use models::Station;

fn station(id: u64, name: &str) -> Station {
    Station {
        id,
        name: name.to_string(),
    }
}

/// **VALUE**: Verifies region edits only touch the named region.
///
/// **BUG THIS CATCHES**: Would catch an append landing after the form or a
/// replace wiping the whole page.
#[test]
fn given_stations_page_when_editing_list_region_then_rest_of_page_is_kept() {
    let view = MemoryView::new();
    let list = templates::station_item(&station(1, "Gangnam"));
    view.replace_main(&templates::stations_page(&list));

    view.append_to_region(Region::StationList, &templates::station_item(&station(2, "Jamsil")));

    let snapshot = view.snapshot();
    let region = snapshot.region(Region::StationList).unwrap();
    assert_eq!(region.matches(templates::STATION_ITEM_CLASS).count(), 2);
    assert!(region.find("Gangnam").unwrap() < region.find("Jamsil").unwrap());
    assert!(snapshot.main.contains("<form"));

    view.replace_region(Region::StationList, "");
    let snapshot = view.snapshot();
    assert_eq!(snapshot.region(Region::StationList), Some(""));
    assert!(snapshot.main.contains("<form"));
}

#[test]
fn given_markup_with_html_characters_when_rendering_then_names_are_escaped() {
    let markup = templates::station_item(&station(7, "<b>Seoul & Co</b>"));

    assert!(markup.contains("&lt;b&gt;Seoul &amp; Co&lt;/b&gt;"));
    assert!(!markup.contains("<b>"));
}

#[test]
fn given_confirm_answer_when_prompted_then_prompt_is_recorded() {
    let view = MemoryView::new();
    view.answer_confirm(false);

    assert!(!view.confirm("Really?"));
    assert_eq!(view.snapshot().confirm_prompts, vec!["Really?".to_string()]);
}

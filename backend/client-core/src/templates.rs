//! Markup for pages and list entries.
//!
//! Pages are substituted wholesale into the main content region; list entries
//! are rendered into (or appended to) a page's [`Region`] wrapper.

use crate::router::Page;
use crate::view::Region;

use models::{Line, Station};

pub const STATION_ITEM_CLASS: &str = "station-list-item";
pub const LINE_ITEM_CLASS: &str = "line-list-item";
pub const SECTION_ITEM_CLASS: &str = "section-list-item";
pub const ROUTER_LINK_CLASS: &str = "main-menu-router";

/// Minimal text escaping for user-supplied names.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn region(region: Region, inner: &str) -> String {
    format!(
        r#"<{tag} class="{class}">{inner}</{tag}>"#,
        tag = region.tag(),
        class = region.class_name(),
    )
}

pub fn home_page() -> String {
    String::from(
        r#"<section class="home"><h2>Subway Network Manager</h2><p>Manage stations, lines and sections.</p></section>"#,
    )
}

pub fn sign_in_page() -> String {
    format!(
        r#"<section class="sign-in"><h2>Sign in</h2><form class="sign-in-form"><input name="email" type="email"/><input name="password" type="password"/><button type="submit">Sign in</button></form><a class="{ROUTER_LINK_CLASS}" href="{signup}">Sign up</a></section>"#,
        signup = Page::SignUp.path(),
    )
}

pub fn sign_up_page() -> String {
    String::from(
        r#"<section class="sign-up"><h2>Sign up</h2><form class="sign-up-form"><input name="email" type="email"/><input name="name"/><input name="age" type="number"/><input name="password" type="password"/><input name="password-confirm" type="password"/><button type="submit">Sign up</button></form></section>"#,
    )
}

pub fn not_found_page(path: &str) -> String {
    format!(
        r#"<section class="not-found"><h2>Page not found</h2><p>{}</p></section>"#,
        escape(path)
    )
}

pub fn stations_page(list: &str) -> String {
    format!(
        r#"<section class="stations"><h2>Stations</h2><form class="station-form"><input name="station-name"/><button type="submit">Add</button></form>{}</section>"#,
        region(Region::StationList, list)
    )
}

pub fn station_item(station: &Station) -> String {
    format!(
        r#"<li class="{STATION_ITEM_CLASS}" data-station-id="{id}"><span>{name}</span><button class="station-delete-button">Delete</button></li>"#,
        id = station.id,
        name = escape(&station.name),
    )
}

pub fn station_option(station: &Station) -> String {
    format!(r#"<option value="{}"></option>"#, escape(&station.name))
}

pub fn lines_page(list: &str) -> String {
    format!(
        r#"<section class="lines"><h2>Lines</h2><button class="create-line-btn">Add line</button>{list}<div class="modal"><form class="modal__line-form"><input name="subway-line-name"/><input name="up-station" list="stations"/><input name="down-station" list="stations"/><input name="distance" type="number"/><input name="duration" type="number"/>{options}<button type="submit">Create</button></form></div></section>"#,
        list = region(Region::LineList, list),
        options = region(Region::StationOptions, ""),
    )
}

pub fn line_item(line: &Line) -> String {
    format!(
        r#"<li class="{LINE_ITEM_CLASS}" data-line-id="{id}"><span class="subway-line-color-dot {color}"></span><span>{name}</span><button class="line-delete-button">Delete</button></li>"#,
        id = line.id,
        color = escape(&line.color),
        name = escape(&line.name),
    )
}

pub fn sections_page(list: &str) -> String {
    format!(
        r#"<section class="sections"><h2>Sections</h2><form class="section-form"><input name="line-name"/><input name="up-station"/><input name="down-station"/><input name="distance" type="number"/><input name="duration" type="number"/><button type="submit">Add</button></form>{}</section>"#,
        region(Region::SectionList, list)
    )
}

/// One entry per line: its sections in order, or its stations when the
/// backend did not send section details.
pub fn line_sections_item(line: &Line) -> String {
    let stops: Vec<String> = if line.sections.is_empty() {
        line.stations
            .iter()
            .map(|station| format!("<span>{}</span>", escape(&station.name)))
            .collect()
    } else {
        line.sections
            .iter()
            .map(|section| {
                format!(
                    "<span>{up} - {down} ({distance}km, {duration}min)</span>",
                    up = escape(&section.up_station.name),
                    down = escape(&section.down_station.name),
                    distance = section.distance,
                    duration = section.duration,
                )
            })
            .collect()
    };

    format!(
        r#"<li class="{SECTION_ITEM_CLASS}" data-line-id="{id}"><strong class="{color}">{name}</strong>{stops}</li>"#,
        id = line.id,
        color = escape(&line.color),
        name = escape(&line.name),
        stops = stops.join(""),
    )
}

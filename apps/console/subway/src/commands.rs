//! Typed commands to UI events.
//!
//! Navigation commands become router-link clicks, so they go through the same
//! recognition as a menu click. Multi-field forms take comma-separated fields.

use crate::error::SubwayError;

use client_core::app::{ClickEvent, FormSubmission, PageCommand, UiEvent};
use client_core::features::{LineForm, SectionForm, SignUpForm};
use client_core::router::SIGN_OUT_PATH;

use models::{Credentials, EntityId};

pub const HELP_TEXT: &str = "\
Navigation:
  go <path> | click <path>       open /, /signin, /signup, /stations, /lines, /sections
  back | forward                 move through history
  signout                        sign out (asks first)
Account:
  signin <email> <password>
  signup <email>, <name>, <age>, <password>, <password again>
Stations:
  station add <name>
  station rm <id>
Lines:
  line new | line form          open the create form
  line color <bg-color-class>    e.g. bg-red-600
  line add <name>, <up station>, <down station>, <distance>, <duration>
  line edit <id>, <name>, <color>
  line rm <id>
Sections:
  section add <line>, <up station>, <down station>, <distance>, <duration>
  section rm <line id> <station id>
Other:
  help | quit";

/// One parsed command line.
#[derive(Debug, Clone)]
pub enum Input {
    Event(UiEvent),
    Back,
    Forward,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Input, SubwayError> {
    let line = line.trim();
    let (verb, rest) = split_word(line);

    match verb {
        "go" | "click" => {
            if rest.is_empty() {
                return Err(SubwayError::input("Usage: go <path>"));
            }
            Ok(click(rest))
        }
        "back" => Ok(Input::Back),
        "forward" => Ok(Input::Forward),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        "signout" => Ok(click(SIGN_OUT_PATH)),
        "signin" => parse_sign_in(rest),
        "signup" => parse_sign_up(rest),
        "station" => parse_station(rest),
        "line" => parse_line(rest),
        "section" => parse_section(rest),
        "" => Err(SubwayError::input("Empty command")),
        other => Err(SubwayError::input(format!("Unknown command: {other}"))),
    }
}

fn click(href: &str) -> Input {
    Input::Event(UiEvent::Click(ClickEvent::on_link(href)))
}

fn submit(submission: FormSubmission) -> Input {
    Input::Event(UiEvent::Submit(submission))
}

fn command(command: PageCommand) -> Input {
    Input::Event(UiEvent::Command(command))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

/// Exactly `count` comma-separated, trimmed fields.
fn fields<'a>(rest: &'a str, count: usize, usage: &str) -> Result<Vec<&'a str>, SubwayError> {
    let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
    if fields.len() != count {
        return Err(SubwayError::input(format!("Usage: {usage}")));
    }
    Ok(fields)
}

fn number<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, SubwayError> {
    field
        .parse()
        .map_err(|_| SubwayError::input(format!("{what} must be a number, got '{field}'")))
}

fn parse_sign_in(rest: &str) -> Result<Input, SubwayError> {
    let (email, password) = split_word(rest);
    if email.is_empty() || password.is_empty() {
        return Err(SubwayError::input("Usage: signin <email> <password>"));
    }
    Ok(submit(FormSubmission::SignIn(Credentials::new(
        email, password,
    ))))
}

fn parse_sign_up(rest: &str) -> Result<Input, SubwayError> {
    let f = fields(
        rest,
        5,
        "signup <email>, <name>, <age>, <password>, <password again>",
    )?;
    Ok(submit(FormSubmission::SignUp(SignUpForm {
        email: f[0].to_string(),
        name: f[1].to_string(),
        age: number(f[2], "Age")?,
        password: f[3].to_string(),
        password_confirm: f[4].to_string(),
    })))
}

fn parse_station(rest: &str) -> Result<Input, SubwayError> {
    match split_word(rest) {
        ("add", name) => Ok(submit(FormSubmission::CreateStation {
            name: name.to_string(),
        })),
        ("rm", id) => Ok(command(PageCommand::DeleteStation(number(id, "Station id")?))),
        _ => Err(SubwayError::input("Usage: station add <name> | station rm <id>")),
    }
}

fn parse_line(rest: &str) -> Result<Input, SubwayError> {
    match split_word(rest) {
        ("new" | "form", _) => Ok(command(PageCommand::OpenLineForm)),
        ("color", color) if !color.is_empty() => {
            Ok(command(PageCommand::SelectLineColor(color.to_string())))
        }
        ("add", args) => {
            let f = fields(
                args,
                5,
                "line add <name>, <up station>, <down station>, <distance>, <duration>",
            )?;
            Ok(submit(FormSubmission::CreateLine(LineForm {
                name: f[0].to_string(),
                up_station: f[1].to_string(),
                down_station: f[2].to_string(),
                distance: number(f[3], "Distance")?,
                duration: number(f[4], "Duration")?,
            })))
        }
        ("edit", args) => {
            let f = fields(args, 3, "line edit <id>, <name>, <color>")?;
            Ok(command(PageCommand::UpdateLine {
                id: number(f[0], "Line id")?,
                name: f[1].to_string(),
                color: f[2].to_string(),
            }))
        }
        ("rm", id) => Ok(command(PageCommand::DeleteLine(number(id, "Line id")?))),
        _ => Err(SubwayError::input(
            "Usage: line new | line color <c> | line add ... | line edit ... | line rm <id>",
        )),
    }
}

fn parse_section(rest: &str) -> Result<Input, SubwayError> {
    match split_word(rest) {
        ("add", args) => {
            let f = fields(
                args,
                5,
                "section add <line>, <up station>, <down station>, <distance>, <duration>",
            )?;
            Ok(submit(FormSubmission::CreateSection(SectionForm {
                line: f[0].to_string(),
                up_station: f[1].to_string(),
                down_station: f[2].to_string(),
                distance: number(f[3], "Distance")?,
                duration: number(f[4], "Duration")?,
            })))
        }
        ("rm", args) => {
            let (line_id, station_id) = split_word(args);
            let line_id: EntityId = number(line_id, "Line id")?;
            let station_id: EntityId = number(station_id, "Station id")?;
            Ok(command(PageCommand::DeleteSection {
                line_id,
                station_id,
            }))
        }
        _ => Err(SubwayError::input(
            "Usage: section add ... | section rm <line id> <station id>",
        )),
    }
}

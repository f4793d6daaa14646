use crate::error::model_error::ModelError;
use crate::subway::section::{Section, validate_endpoints};
use crate::subway::station::Station;
use crate::subway::{Entity, EntityId};

use common::ErrorLocation;

use std::panic::Location;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Line colors are palette classes such as `bg-green-600`.
const LINE_COLOR_PATTERN: &str = r"^bg-[a-z]+-[1-9]00$";

static LINE_COLOR_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

#[track_caller]
pub(crate) fn line_color_regex() -> Result<&'static Regex, ModelError> {
    match LINE_COLOR_REGEX.get_or_init(|| Regex::new(LINE_COLOR_PATTERN)) {
        Ok(regex) => Ok(regex),
        Err(error) => Err(ModelError::Pattern {
            message: format!("Line color pattern failed to compile: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Entity for Line {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLine {
    pub name: String,
    pub color: String,
    pub up_station_id: EntityId,
    pub down_station_id: EntityId,
    pub distance: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineUpdate {
    pub name: String,
    pub color: String,
}

impl LineUpdate {
    #[track_caller]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let color = color.into();
        validate_name(&name)?;
        validate_color(&color)?;
        Ok(Self { name, color })
    }
}

/// Builder for creating validated NewLine payloads.
#[derive(Debug, Default)]
pub struct NewLineBuilder {
    name: Option<String>,
    color: Option<String>,
    up_station_id: Option<EntityId>,
    down_station_id: Option<EntityId>,
    distance: Option<u32>,
    duration: Option<u32>,
}

impl NewLineBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_up_station(mut self, id: EntityId) -> Self {
        self.up_station_id = Some(id);
        self
    }

    pub fn with_down_station(mut self, id: EntityId) -> Self {
        self.down_station_id = Some(id);
        self
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Build the NewLine with validation.
    #[track_caller]
    pub fn build(self) -> Result<NewLine, ModelError> {
        let name = self.name.ok_or_else(|| ModelError::Validation {
            message: String::from("Line name is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        validate_name(&name)?;

        let color = self.color.ok_or_else(|| ModelError::Validation {
            message: String::from("Line color is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        validate_color(&color)?;

        let up_station_id = self.up_station_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Up station is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let down_station_id = self.down_station_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Down station is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let distance = self.distance.unwrap_or_default();
        let duration = self.duration.unwrap_or_default();
        validate_endpoints(up_station_id, down_station_id, distance, duration)?;

        Ok(NewLine {
            name,
            color,
            up_station_id,
            down_station_id,
            distance,
            duration,
        })
    }
}

#[track_caller]
fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation {
            message: String::from("Line name cannot be empty"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
fn validate_color(color: &str) -> Result<(), ModelError> {
    if color.is_empty() {
        return Err(ModelError::Validation {
            message: String::from("Please select a line color"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if !line_color_regex()?.is_match(color) {
        return Err(ModelError::Validation {
            message: format!("Invalid line color: {color}"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

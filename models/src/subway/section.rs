use crate::error::model_error::ModelError;
use crate::subway::EntityId;
use crate::subway::station::Station;

use common::ErrorLocation;

use std::panic::Location;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub up_station: Station,
    pub down_station: Station,
    pub distance: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub up_station_id: EntityId,
    pub down_station_id: EntityId,
    pub distance: u32,
    pub duration: u32,
}

impl NewSection {
    #[track_caller]
    pub fn new(
        up_station_id: EntityId,
        down_station_id: EntityId,
        distance: u32,
        duration: u32,
    ) -> Result<Self, ModelError> {
        validate_endpoints(up_station_id, down_station_id, distance, duration)?;

        Ok(Self {
            up_station_id,
            down_station_id,
            distance,
            duration,
        })
    }
}

/// Shared by line and section payloads: distinct endpoints, positive spans.
#[track_caller]
pub(crate) fn validate_endpoints(
    up_station_id: EntityId,
    down_station_id: EntityId,
    distance: u32,
    duration: u32,
) -> Result<(), ModelError> {
    if up_station_id == down_station_id {
        return Err(ModelError::Validation {
            message: String::from("Up and down stations must be different"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if distance == 0 {
        return Err(ModelError::Validation {
            message: String::from("Distance must be greater than zero"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if duration == 0 {
        return Err(ModelError::Validation {
            message: String::from("Duration must be greater than zero"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

use crate::subway::{Entity, EntityId};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: EntityId,
    pub name: String,
}

impl Entity for Station {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStation {
    pub name: String,
}

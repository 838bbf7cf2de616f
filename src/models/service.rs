use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Collection, Record};
use crate::utils::constants::STORAGE_KEY_SERVICES;
use crate::utils::serde_helpers::{f64_from_any, id_from_any};

/// Tipo de servicio ofrecido (precio en yuanes, duración en minutos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "f64_from_any")]
    pub price: f64,
    pub duration: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Service {
    const ENTITY: &'static str = "Servicio";
    const COLLECTION: Collection = Collection::Services;
    const STORAGE_KEY: &'static str = STORAGE_KEY_SERVICES;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }
}

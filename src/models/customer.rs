use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Collection, Record};
use crate::utils::constants::STORAGE_KEY_USERS;
use crate::utils::serde_helpers::id_from_any;

/// Cliente final (colección `users` del backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub visits: u32,
    #[serde(default)]
    pub last_visit: Option<NaiveDate>,
}

impl Customer {
    /// Registra una visita nueva
    pub fn record_visit(&mut self, date: NaiveDate) {
        self.visits = self.visits.saturating_add(1);
        if self.last_visit.map_or(true, |last| date > last) {
            self.last_visit = Some(date);
        }
    }
}

impl Record for Customer {
    const ENTITY: &'static str = "Cliente";
    const COLLECTION: Collection = Collection::Users;
    const STORAGE_KEY: &'static str = STORAGE_KEY_USERS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_user_row() {
        let raw = r#"{"id": 1, "name": "用户1", "phone": "13800000001", "visits": 5, "lastVisit": "2023-05-15"}"#;
        let mut user: Customer = serde_json::from_str(raw).unwrap();
        assert_eq!(user.last_visit, NaiveDate::from_ymd_opt(2023, 5, 15));

        user.record_visit(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(user.visits, 6);
        assert_eq!(user.last_visit, NaiveDate::from_ymd_opt(2023, 5, 15));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Collection, Record};
use crate::utils::constants::STORAGE_KEY_TECHNICIANS;
use crate::utils::serde_helpers::{f64_from_any, id_from_any};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicianStatus {
    Active,
    Inactive,
}

impl TechnicianStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicianStatus::Active => "active",
            TechnicianStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TechnicianStatus::Active => "在职",
            TechnicianStatus::Inactive => "离职",
        }
    }
}

impl Default for TechnicianStatus {
    fn default() -> Self {
        TechnicianStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub rating: f64,
    #[serde(default)]
    pub job_count: u32,
    #[serde(default)]
    pub status: TechnicianStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Technician {
    /// Añade una especialidad si no existe (conjunto sin duplicados)
    pub fn add_specialty(&mut self, specialty: impl Into<String>) -> bool {
        let specialty = specialty.into();
        if self.specialties.contains(&specialty) {
            return false;
        }
        self.specialties.push(specialty);
        true
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    pub fn is_active(&self) -> bool {
        self.status == TechnicianStatus::Active
    }
}

impl Record for Technician {
    const ENTITY: &'static str = "Técnico";
    const COLLECTION: Collection = Collection::Technicians;
    const STORAGE_KEY: &'static str = STORAGE_KEY_TECHNICIANS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.phone.as_str()];
        fields.extend(self.specialties.iter().map(String::as_str));
        fields
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_with_string_rating() {
        let raw = r#"{"id": 1, "name": "张技师", "rating": "4.8", "specialties": ["足底按摩"]}"#;
        let tech: Technician = serde_json::from_str(raw).unwrap();
        assert_eq!(tech.id, "1");
        assert_eq!(tech.rating, 4.8);
        assert!(tech.is_active());
        assert_eq!(tech.job_count, 0);
    }

    #[test]
    fn test_specialties_behave_like_a_set() {
        let mut tech: Technician =
            serde_json::from_str(r#"{"id": "t", "name": "李工"}"#).unwrap();
        assert!(tech.add_specialty("网络配置"));
        assert!(!tech.add_specialty("网络配置"));
        assert!(tech.has_specialty("网络配置"));
        assert_eq!(tech.search_fields(), vec!["李工", "", "网络配置"]);
    }
}

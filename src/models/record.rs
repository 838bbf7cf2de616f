use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::utils::constants::API_PATH_PREFIX;

/// Colecciones del backend en la nube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Orders,
    Services,
    Technicians,
    Users,
    Auth,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Orders,
        Collection::Services,
        Collection::Technicians,
        Collection::Users,
        Collection::Auth,
    ];

    /// Endpoint lógico, p.ej. `/api/orders`
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Orders => "/api/orders",
            Collection::Services => "/api/services",
            Collection::Technicians => "/api/technicians",
            Collection::Users => "/api/users",
            Collection::Auth => "/api/auth",
        }
    }

    /// `collection_name` enviado al backend
    pub fn name(&self) -> &'static str {
        collection_from_path(self.path())
    }

    /// Nombre mostrado en avisos
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Orders => "订单",
            Collection::Services => "服务",
            Collection::Technicians => "技术人员",
            Collection::Users => "用户",
            Collection::Auth => "认证",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let name = collection_from_path(path);
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Primer segmento tras `/api/`: `/api/orders/123` → `orders`
pub fn collection_from_path(path: &str) -> &str {
    let rest = path.strip_prefix(API_PATH_PREFIX).unwrap_or(path);
    rest.split('/').next().unwrap_or_default()
}

/// Entidad persistida como lista JSON bajo una clave fija
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    const ENTITY: &'static str;
    const COLLECTION: Collection;
    const STORAGE_KEY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Valor comparado por el filtro `status` (None = sin estado)
    fn status_key(&self) -> Option<&str> {
        None
    }

    /// Campos recorridos por la búsqueda de texto
    fn search_fields(&self) -> Vec<&str>;

    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_follow_paths() {
        assert_eq!(Collection::Orders.name(), "orders");
        assert_eq!(Collection::Users.name(), "users");
        assert_eq!(collection_from_path("/api/orders/abc"), "orders");
        assert_eq!(collection_from_path("technicians"), "technicians");
        assert_eq!(Collection::from_path("/api/auth"), Some(Collection::Auth));
        assert_eq!(Collection::from_path("/api/community"), None);
    }
}

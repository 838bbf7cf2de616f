use serde::{Deserialize, Serialize};

use crate::utils::constants::DEFAULT_CLOUD_ENDPOINT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
    pub cloud: CloudDefaults,
    pub admin: AdminCredentials,
    pub storage: StorageConfig,
    pub mock: MockConfig,
    pub pagination: PaginationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            system_name: "计算机服务管理系统".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 10,
            cloud: CloudDefaults::default(),
            admin: AdminCredentials::default(),
            storage: StorageConfig::default(),
            mock: MockConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

/// Valores iniciales de `ht_settings` en el primer arranque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudDefaults {
    pub endpoint: String,
    pub space_id: String,
    pub client_secret: String,
}

impl Default for CloudDefaults {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLOUD_ENDPOINT.to_string(),
            space_id: String::new(),
            client_secret: String::new(),
        }
    }
}

/// Credenciales fijas del login simulado (modo local)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub debug_log_capacity: usize,
    pub token_expiry_days: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            debug_log_capacity: 500,
            token_expiry_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    pub order_count: usize,
    pub technician_count: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            order_count: 30,
            technician_count: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

fn env_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: env_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            network_timeout_seconds: env_or(
                option_env!("NETWORK_TIMEOUT_SECONDS"),
                defaults.network_timeout_seconds,
            ),
            cloud: CloudDefaults {
                endpoint: option_env!("CLOUD_ENDPOINT")
                    .unwrap_or(DEFAULT_CLOUD_ENDPOINT)
                    .to_string(),
                space_id: option_env!("CLOUD_SPACE_ID").unwrap_or("").to_string(),
                client_secret: option_env!("CLOUD_CLIENT_SECRET").unwrap_or("").to_string(),
            },
            admin: AdminCredentials {
                username: option_env!("ADMIN_USERNAME").unwrap_or("admin").to_string(),
                password: option_env!("ADMIN_PASSWORD").unwrap_or("admin123").to_string(),
            },
            storage: StorageConfig {
                debug_log_capacity: env_or(
                    option_env!("DEBUG_LOG_CAPACITY"),
                    defaults.storage.debug_log_capacity,
                ),
                token_expiry_days: env_or(
                    option_env!("TOKEN_EXPIRY_DAYS"),
                    defaults.storage.token_expiry_days,
                ),
            },
            mock: MockConfig {
                order_count: env_or(option_env!("MOCK_ORDER_COUNT"), defaults.mock.order_count),
                technician_count: env_or(
                    option_env!("MOCK_TECHNICIAN_COUNT"),
                    defaults.mock.technician_count,
                ),
            },
            pagination: PaginationConfig {
                default_page_size: env_or(
                    option_env!("DEFAULT_PAGE_SIZE"),
                    defaults.pagination.default_page_size,
                ),
                ..defaults.pagination.clone()
            },
            ..defaults
        }
    }

    /// Timeout del cliente remoto
    pub fn network_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.network_timeout_seconds))
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Configuración global estática (solo lectura)
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_constants() {
        let config = AppConfig::default();
        assert_eq!(config.network_timeout().as_secs(), 10);
        assert_eq!(config.storage.debug_log_capacity, 500);
        assert_eq!(config.storage.token_expiry_days, 7);
        assert_eq!(config.mock.order_count, 30);
        assert_eq!(config.mock.technician_count, 5);
        assert_eq!(config.pagination.page_size_options, vec![10, 20, 50, 100]);
        assert_eq!(config.cloud.endpoint, DEFAULT_CLOUD_ENDPOINT);
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or(Some("42"), 7usize), 42);
        assert_eq!(env_or(Some("abc"), 7usize), 7);
        assert_eq!(env_or::<u32>(None, 3), 3);
    }
}

// ============================================================================
// CONSTANTES - claves de localStorage y contrato del backend en la nube
// ============================================================================

// Datasets por entidad
pub const STORAGE_KEY_ORDERS: &str = "ht_orders";
pub const STORAGE_KEY_SERVICES: &str = "ht_services";
pub const STORAGE_KEY_TECHNICIANS: &str = "ht_technicians";
pub const STORAGE_KEY_USERS: &str = "ht_users";

// Log de depuración
pub const STORAGE_KEY_DEBUG_LOGS: &str = "ht_debug_logs";
pub const STORAGE_KEY_DEBUG_SESSION: &str = "ht_debug_session";

// Ajustes y sesión
pub const STORAGE_KEY_SETTINGS: &str = "ht_settings";
pub const STORAGE_KEY_LOGIN_TOKEN: &str = "ht_login_token";
pub const STORAGE_KEY_LOGIN_USER: &str = "ht_login_user";
pub const STORAGE_KEY_IS_LOGGED_IN: &str = "ht_is_logged_in";

/// Valor plano `local` | `cloud` (no JSON)
pub const STORAGE_KEY_MODE: &str = "storage_mode";

pub const DEFAULT_CLOUD_ENDPOINT: &str = "https://api.next.bspapp.com";

/// Método RPC único del backend serverless
pub const CLOUD_RPC_METHOD: &str = "serverless.db.collection.operation";
pub const HEADER_CLIENT_SECRET: &str = "x-basement-token";
pub const API_PATH_PREFIX: &str = "/api/";

// ============================================================================
// APP CONTEXT - dependencias compartidas, construidas una vez al arrancar
// ============================================================================
// Sustituye a los objetos globales mutables: la fachada y los servicios
// reciben `&AppContext`.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use super::mode_state::{ModeSelector, StorageMode};
use super::notifications::Notifications;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult, RemoteError, StorageError};
use crate::models::{CloudSettings, LogLevel};
use crate::services::api_client::RemoteClient;
use crate::services::debug_log_service::DebugLog;
use crate::services::local_store::LocalStore;
use crate::services::mock_data::MockDataset;
use crate::services::transport::Transport;
use crate::utils::browser::is_file_protocol;
use crate::utils::constants::{STORAGE_KEY_LOGIN_TOKEN, STORAGE_KEY_SETTINGS};
use crate::utils::ids::generate_id;
use crate::utils::storage::{KeyValueStore, MemoryStore};

pub const NETWORK_DOWNGRADE_MESSAGE: &str = "网络连接失败，已自动切换到本地模式";
pub const CORS_HINT: &str = "云端请求被CORS策略拦截，请通过HTTP服务器访问或检查云端跨域设置";
pub const FILE_PROTOCOL_WARNING: &str = "检测到通过file://协议访问，云端API可能因CORS限制无法访问";

pub struct AppContext {
    pub config: AppConfig,
    pub store: LocalStore,
    pub mode: ModeSelector,
    pub debug_log: DebugLog,
    pub notifications: Notifications,
    settings: RefCell<CloudSettings>,
    transport: Rc<dyn Transport>,
    rng: RefCell<StdRng>,
    page_protocol: Option<String>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        kv: Rc<dyn KeyValueStore>,
        transport: Rc<dyn Transport>,
        rng: StdRng,
        page_protocol: Option<String>,
    ) -> Self {
        let store = LocalStore::new(kv);
        let settings = load_settings(&store, &config);
        let mode = ModeSelector::load(store.clone());
        let debug_log = DebugLog::new(store.clone(), config.storage.debug_log_capacity);

        let ctx = Self {
            config,
            store,
            mode,
            debug_log,
            notifications: Notifications::new(),
            settings: RefCell::new(settings),
            transport,
            rng: RefCell::new(rng),
            page_protocol,
        };
        ctx.debug_log
            .start_session(&mut *ctx.rng.borrow_mut(), Utc::now());
        ctx
    }

    /// Contexto en memoria con RNG determinista (entorno nativo y tests)
    pub fn in_memory(config: AppConfig, transport: Rc<dyn Transport>, seed: u64) -> Self {
        Self::new(
            config,
            Rc::new(MemoryStore::new()),
            transport,
            StdRng::seed_from_u64(seed),
            None,
        )
    }

    /// localStorage + fetch del navegador
    #[cfg(target_arch = "wasm32")]
    pub fn bootstrap_browser(config: AppConfig) -> Result<Self, StorageError> {
        use crate::services::transport::ReqwestTransport;
        use crate::utils::browser::page_protocol;
        use crate::utils::storage::BrowserStore;

        let kv = Rc::new(BrowserStore::open()?);
        let transport = Rc::new(ReqwestTransport::new(config.network_timeout()));
        Ok(Self::new(
            config,
            kv,
            transport,
            StdRng::from_entropy(),
            page_protocol(),
        ))
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    pub fn generate_id(&self) -> String {
        generate_id(&mut *self.rng.borrow_mut(), self.now())
    }

    pub fn cloud_settings(&self) -> CloudSettings {
        self.settings.borrow().clone()
    }

    pub fn save_cloud_settings(&self, settings: CloudSettings) -> Result<(), StorageError> {
        self.store.set_json(STORAGE_KEY_SETTINGS, &settings)?;
        *self.settings.borrow_mut() = settings;
        log::info!("⚙️ Ajustes de nube guardados");
        Ok(())
    }

    pub fn auth_token(&self) -> Option<String> {
        self.store
            .get_raw(STORAGE_KEY_LOGIN_TOKEN)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    /// Cliente remoto con los ajustes y el token actuales
    pub fn remote(&self) -> RemoteClient {
        RemoteClient::new(
            self.transport.clone(),
            self.cloud_settings(),
            self.auth_token(),
        )
    }

    /// Dataset local de la entidad (generado la primera vez)
    pub fn load_local<T: MockDataset>(&self) -> Result<Vec<T>, StorageError> {
        let now = self.now();
        self.store
            .load_or_generate(&mut *self.rng.borrow_mut(), &self.config.mock, now)
    }

    pub fn debug(&self, level: LogLevel, message: &str, data: Option<Value>) {
        self.debug_log.record(level, message, data, self.now());
    }

    /// Página abierta como `file:` con modo nube activo
    pub fn cors_warning_required(&self) -> bool {
        is_file_protocol(self.page_protocol.as_deref()) && self.mode.is_cloud()
    }

    /// Registra un fallo remoto y avisa al usuario. Los errores de red pasan
    /// el modo a local (persistido; los ajustes de nube se conservan).
    /// Devuelve `true` si hubo cambio a modo local.
    pub fn report_remote_failure(&self, context: &str, err: &RemoteError) -> bool {
        self.debug(
            LogLevel::Error,
            &format!("{}失败", context),
            Some(json!({ "error": err.to_string() })),
        );

        if !err.is_network() {
            self.notifications.error(format!("{}失败: {}", context, err));
            return false;
        }

        if err.is_cors() {
            self.debug(LogLevel::Warn, CORS_HINT, None);
        }
        if let Err(e) = self.mode.set(StorageMode::Local) {
            log::error!("❌ No se pudo guardar el modo local: {}", e);
        }
        self.debug(LogLevel::Warn, NETWORK_DOWNGRADE_MESSAGE, None);
        self.notifications.warning(NETWORK_DOWNGRADE_MESSAGE);
        true
    }

    /// Nube si el modo lo indica; ante un error de red, local. Los demás
    /// errores remotos se propagan.
    pub async fn dispatch<T, F, Fut, L>(&self, context: &str, remote: F, local: L) -> AppResult<T>
    where
        F: FnOnce(RemoteClient) -> Fut,
        Fut: Future<Output = AppResult<T>>,
        L: FnOnce() -> AppResult<T>,
    {
        if self.mode.is_cloud() {
            match remote(self.remote()).await {
                Ok(value) => return Ok(value),
                Err(AppError::Remote(err)) => {
                    if !self.report_remote_failure(context, &err) {
                        return Err(err.into());
                    }
                }
                Err(other) => return Err(other),
            }
        }
        local()
    }
}

/// `ht_settings`; en el primer arranque se siembra con los valores de config
fn load_settings(store: &LocalStore, config: &AppConfig) -> CloudSettings {
    match store.get_json_lenient::<CloudSettings>(STORAGE_KEY_SETTINGS) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            let settings = CloudSettings::from(&config.cloud);
            if let Err(e) = store.set_json(STORAGE_KEY_SETTINGS, &settings) {
                log::warn!("⚠️ No se pudieron guardar los ajustes iniciales: {}", e);
            }
            settings
        }
        Err(e) => {
            log::warn!("⚠️ Ajustes ilegibles, usando valores por defecto: {}", e);
            CloudSettings::from(&config.cloud)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkErrorKind;
    use crate::services::mock_transport::MockTransport;
    use crate::state::notifications::NotificationLevel;
    use crate::utils::constants::{STORAGE_KEY_DEBUG_SESSION, STORAGE_KEY_MODE};

    fn context() -> AppContext {
        AppContext::in_memory(AppConfig::default(), Rc::new(MockTransport::new()), 7)
    }

    #[test]
    fn test_startup_seeds_settings_and_session() {
        let ctx = context();
        assert_eq!(ctx.cloud_settings().endpoint, ctx.config.cloud.endpoint);
        assert!(ctx
            .store
            .get_json::<CloudSettings>(STORAGE_KEY_SETTINGS)
            .unwrap()
            .is_some());
        assert!(ctx
            .store
            .get_raw(STORAGE_KEY_DEBUG_SESSION)
            .unwrap()
            .unwrap()
            .starts_with("session_"));
        assert_eq!(ctx.mode.get(), StorageMode::Local);
    }

    #[test]
    fn test_network_failure_downgrades_and_keeps_credentials() {
        let ctx = context();
        let settings = CloudSettings {
            space_id: "s".into(),
            client_secret: "c".into(),
            endpoint: "https://api.example.com".into(),
        };
        ctx.save_cloud_settings(settings.clone()).unwrap();
        ctx.mode.set(StorageMode::Cloud).unwrap();

        let err = RemoteError::network(NetworkErrorKind::Cors, "blocked by CORS policy");
        assert!(ctx.report_remote_failure("加载订单", &err));

        assert_eq!(ctx.mode.get(), StorageMode::Local);
        assert_eq!(
            ctx.store.get_raw(STORAGE_KEY_MODE).unwrap().as_deref(),
            Some("local")
        );
        assert_eq!(ctx.cloud_settings(), settings);

        let messages: Vec<_> = ctx.debug_log.entries().into_iter().map(|e| e.message).collect();
        assert!(messages.contains(&"加载订单失败".to_string()));
        assert!(messages.contains(&CORS_HINT.to_string()));

        let toasts = ctx.notifications.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, NotificationLevel::Warning);
        assert_eq!(toasts[0].message, NETWORK_DOWNGRADE_MESSAGE);
    }

    #[test]
    fn test_other_failures_keep_mode() {
        let ctx = context();
        ctx.mode.set(StorageMode::Cloud).unwrap();
        assert!(!ctx.report_remote_failure("加载订单", &RemoteError::Http { status: 500 }));
        assert_eq!(ctx.mode.get(), StorageMode::Cloud);
        assert_eq!(ctx.notifications.drain()[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_cors_warning_only_for_file_pages_in_cloud_mode() {
        let ctx = AppContext::new(
            AppConfig::default(),
            Rc::new(MemoryStore::new()),
            Rc::new(MockTransport::new()),
            StdRng::seed_from_u64(1),
            Some("file:".into()),
        );
        assert!(!ctx.cors_warning_required());
        ctx.mode.set(StorageMode::Cloud).unwrap();
        assert!(ctx.cors_warning_required());
        assert!(!context().cors_warning_required());
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let kv = Rc::new(MemoryStore::new());
        kv.set_item(STORAGE_KEY_SETTINGS, "[broken").unwrap();
        let ctx = AppContext::new(
            AppConfig::default(),
            kv,
            Rc::new(MockTransport::new()),
            StdRng::seed_from_u64(1),
            None,
        );
        assert_eq!(ctx.cloud_settings(), CloudSettings::from(&ctx.config.cloud));
    }
}

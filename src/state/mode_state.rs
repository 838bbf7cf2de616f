// ============================================================================
// MODE STATE - selector persistente local | cloud
// ============================================================================

use serde::{Deserialize, Serialize};

use super::reactivity::ReactiveState;
use crate::error::{AppError, StorageError};
use crate::services::local_store::LocalStore;
use crate::utils::constants::STORAGE_KEY_MODE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Cloud,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Local => "local",
            StorageMode::Cloud => "cloud",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "local" => Some(StorageMode::Local),
            "cloud" => Some(StorageMode::Cloud),
            _ => None,
        }
    }

    /// Texto del indicador de modo
    pub fn label(&self) -> &'static str {
        match self {
            StorageMode::Local => "本地模式",
            StorageMode::Cloud => "云端模式",
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modo actual; solo puede valer `local` o `cloud`
pub struct ModeSelector {
    store: LocalStore,
    state: ReactiveState<StorageMode>,
}

impl ModeSelector {
    /// Lee `storage_mode` una vez al arrancar; ausente o inválido → local
    pub fn load(store: LocalStore) -> Self {
        let mode = match store.get_raw(STORAGE_KEY_MODE) {
            Ok(Some(raw)) => StorageMode::parse(&raw).unwrap_or_else(|| {
                log::warn!("⚠️ Modo guardado inválido '{}', usando local", raw);
                StorageMode::Local
            }),
            Ok(None) => StorageMode::Local,
            Err(e) => {
                log::warn!("⚠️ No se pudo leer el modo: {}", e);
                StorageMode::Local
            }
        };
        log::info!("🔀 Modo de datos: {}", mode);
        Self {
            store,
            state: ReactiveState::new(mode),
        }
    }

    pub fn get(&self) -> StorageMode {
        self.state.get()
    }

    pub fn is_cloud(&self) -> bool {
        self.get() == StorageMode::Cloud
    }

    /// Persiste y notifica. Si falla el guardado el modo no cambia.
    pub fn set(&self, mode: StorageMode) -> Result<(), StorageError> {
        self.store.set_raw(STORAGE_KEY_MODE, mode.as_str())?;
        if self.state.set(mode) {
            log::info!("🔀 Modo cambiado a {}", mode);
        }
        Ok(())
    }

    /// Valor en bruto (desde la UI); lo inválido se registra y se ignora
    pub fn set_raw(&self, raw: &str) -> Result<StorageMode, AppError> {
        match StorageMode::parse(raw) {
            Some(mode) => {
                self.set(mode)?;
                Ok(mode)
            }
            None => {
                log::error!("❌ Modo de almacenamiento inválido: '{}'", raw);
                Err(AppError::InvalidMode(raw.to_string()))
            }
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StorageMode) + 'static,
    {
        self.state.subscribe(callback);
    }
}

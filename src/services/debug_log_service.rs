// ============================================================================
// DEBUG LOG - buffer persistente visible para el usuario (FIFO con tope)
// ============================================================================

use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::Value;

use super::local_store::LocalStore;
use crate::error::StorageError;
use crate::models::{LogEntry, LogLevel};
use crate::utils::constants::{STORAGE_KEY_DEBUG_LOGS, STORAGE_KEY_DEBUG_SESSION};
use crate::utils::format::format_clock;
use crate::utils::ids::session_id;

#[derive(Clone)]
pub struct DebugLog {
    store: LocalStore,
    capacity: usize,
}

impl DebugLog {
    pub fn new(store: LocalStore, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Nuevo id de sesión en `ht_debug_session`
    pub fn start_session<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> String {
        let id = session_id(rng, now);
        if let Err(e) = self.store.set_raw(STORAGE_KEY_DEBUG_SESSION, &id) {
            log::warn!("⚠️ No se pudo guardar la sesión de depuración: {}", e);
        }
        log::info!("🐞 Sesión de depuración: {}", id);
        id
    }

    pub fn session(&self) -> Option<String> {
        self.store.get_raw(STORAGE_KEY_DEBUG_SESSION).ok().flatten()
    }

    /// Añade una entrada y la replica en `log`. Un fallo de almacenamiento
    /// no se propaga: el log de depuración nunca rompe al llamador.
    pub fn record(&self, level: LogLevel, message: &str, data: Option<Value>, now: DateTime<Utc>) {
        let data = data.map(|v| v.to_string());
        match &data {
            Some(d) => log::log!(level.to_log_level(), "{} {}", message, d),
            None => log::log!(level.to_log_level(), "{}", message),
        }

        let entry = LogEntry {
            timestamp: now,
            level,
            message: message.to_string(),
            data,
        };
        if let Err(e) = self.append(entry) {
            log::error!("❌ No se pudo guardar el log de depuración: {}", e);
        }
    }

    fn append(&self, entry: LogEntry) -> Result<(), StorageError> {
        let mut entries = self.entries();
        entries.push(entry);
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }
        self.store.set_json(STORAGE_KEY_DEBUG_LOGS, &entries)
    }

    /// Entradas en orden de llegada; buffer ilegible → vacío
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.store.get_json::<Vec<LogEntry>>(STORAGE_KEY_DEBUG_LOGS) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                log::warn!("⚠️ Log de depuración ilegible, se descarta: {}", e);
                Vec::new()
            }
        }
    }

    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(STORAGE_KEY_DEBUG_LOGS)
    }

    /// Texto plano para copiar/descargar
    pub fn export_text(&self) -> String {
        self.entries()
            .iter()
            .map(|entry| {
                let mut line = format!(
                    "[{}] [{}] {}",
                    format_clock(&entry.timestamp),
                    entry.level.as_str().to_uppercase(),
                    entry.message
                );
                if let Some(data) = &entry.data {
                    line.push_str("\n  ");
                    line.push_str(data);
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// BOOKING ADMIN - panel de reservas: fachada de datos local/nube (RUST PURO)
// ============================================================================
// - Models: registros y tipos de cable (camelCase como el backend)
// - Services: HTTP, almacenamiento local, fachada de datos, auth, log
// - State: contexto explícito, modo local/nube, avisos
// - Bindings: API WASM consumida por la UI
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use config::{AppConfig, CONFIG};
pub use error::{AppError, AppResult, NetworkErrorKind, RemoteError, StorageError};
pub use services::{AuthService, DataService};
pub use state::{AppContext, StorageMode};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    let config = CONFIG.clone();
    if config.enable_logging {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 {} v{} ({})", config.system_name, config.version, config.environment);

    let ctx = AppContext::bootstrap_browser(config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    bindings::install(ctx);
    Ok(())
}

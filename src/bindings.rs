// ============================================================================
// BINDINGS - API WASM para la capa de UI (JSON de entrada y salida)
// ============================================================================

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{
    CloudSettings, Collection, Customer, ListFilter, LogLevel, LoginRequest, Order, OrderStatus,
    Service, Technician,
};
use crate::services::{AuthService, DataService, MockDataset};
use crate::state::AppContext;
use crate::utils::format;
use crate::utils::pagination::Pagination;

thread_local! {
    static APP: RefCell<Option<Rc<AppContext>>> = RefCell::new(None);
}

pub(crate) fn install(ctx: AppContext) {
    APP.with(|cell| *cell.borrow_mut() = Some(Rc::new(ctx)));
}

fn context() -> Result<Rc<AppContext>, JsValue> {
    APP.with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("App no está inicializada"))
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(js_error)
}

fn parse_filter(json: Option<String>) -> Result<ListFilter, JsValue> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(ListFilter::default()),
        Some(raw) => from_json(raw),
    }
}

fn collection(name: &str) -> Result<Collection, JsValue> {
    Collection::ALL
        .into_iter()
        .find(|c| c.name() == name)
        .ok_or_else(|| JsValue::from_str(&format!("Colección desconocida: {}", name)))
}

// ============================================================================
// LISTAS
// ============================================================================

async fn list_json<T: MockDataset>(filter: Option<String>) -> Result<String, JsValue> {
    let ctx = context()?;
    let rows = DataService::new(&ctx)
        .list::<T>(&parse_filter(filter)?)
        .await
        .map_err(js_error)?;
    to_json(&rows)
}

#[wasm_bindgen]
pub async fn get_orders(filter: Option<String>) -> Result<String, JsValue> {
    list_json::<Order>(filter).await
}

#[wasm_bindgen]
pub async fn get_technicians(filter: Option<String>) -> Result<String, JsValue> {
    list_json::<Technician>(filter).await
}

#[wasm_bindgen]
pub async fn get_services(filter: Option<String>) -> Result<String, JsValue> {
    list_json::<Service>(filter).await
}

#[wasm_bindgen]
pub async fn get_customers(filter: Option<String>) -> Result<String, JsValue> {
    list_json::<Customer>(filter).await
}

// ============================================================================
// ESCRITURAS
// ============================================================================

async fn create_json<T: MockDataset>(json: &str) -> Result<String, JsValue> {
    let ctx = context()?;
    let record: T = from_json(json)?;
    let saved = DataService::new(&ctx).create(record).await.map_err(js_error)?;
    to_json(&saved)
}

async fn update_json<T: MockDataset>(json: &str) -> Result<String, JsValue> {
    let ctx = context()?;
    let record: T = from_json(json)?;
    let saved = DataService::new(&ctx).update(record).await.map_err(js_error)?;
    to_json(&saved)
}

async fn remove_id<T: MockDataset>(id: &str) -> Result<(), JsValue> {
    let ctx = context()?;
    DataService::new(&ctx).remove::<T>(id).await.map_err(js_error)
}

/// `collection`: `orders` | `services` | `technicians` | `users`
#[wasm_bindgen]
pub async fn create_record(collection_name: String, json: String) -> Result<String, JsValue> {
    match collection(&collection_name)? {
        Collection::Orders => create_json::<Order>(&json).await,
        Collection::Services => create_json::<Service>(&json).await,
        Collection::Technicians => create_json::<Technician>(&json).await,
        Collection::Users => create_json::<Customer>(&json).await,
        Collection::Auth => Err(JsValue::from_str("auth no admite escrituras")),
    }
}

#[wasm_bindgen]
pub async fn update_record(collection_name: String, json: String) -> Result<String, JsValue> {
    match collection(&collection_name)? {
        Collection::Orders => update_json::<Order>(&json).await,
        Collection::Services => update_json::<Service>(&json).await,
        Collection::Technicians => update_json::<Technician>(&json).await,
        Collection::Users => update_json::<Customer>(&json).await,
        Collection::Auth => Err(JsValue::from_str("auth no admite escrituras")),
    }
}

#[wasm_bindgen]
pub async fn remove_record(collection_name: String, id: String) -> Result<(), JsValue> {
    match collection(&collection_name)? {
        Collection::Orders => remove_id::<Order>(&id).await,
        Collection::Services => remove_id::<Service>(&id).await,
        Collection::Technicians => remove_id::<Technician>(&id).await,
        Collection::Users => remove_id::<Customer>(&id).await,
        Collection::Auth => Err(JsValue::from_str("auth no admite escrituras")),
    }
}

#[wasm_bindgen]
pub async fn change_order_status(id: String, status: String) -> Result<String, JsValue> {
    let ctx = context()?;
    let status = OrderStatus::parse(&status)
        .ok_or_else(|| JsValue::from_str(&format!("Estado inválido: {}", status)))?;
    let order = DataService::new(&ctx)
        .change_order_status(&id, status)
        .await
        .map_err(js_error)?;
    to_json(&order)
}

#[wasm_bindgen]
pub async fn assign_technician(id: String, technician: String) -> Result<String, JsValue> {
    let ctx = context()?;
    let order = DataService::new(&ctx)
        .assign_technician(&id, &technician)
        .await
        .map_err(js_error)?;
    to_json(&order)
}

// ============================================================================
// PANEL Y SINCRONIZACIÓN
// ============================================================================

#[wasm_bindgen]
pub async fn load_dashboard() -> Result<String, JsValue> {
    let ctx = context()?;
    let data = DataService::new(&ctx).load_dashboard().await.map_err(js_error)?;
    to_json(&data)
}

/// Devuelve los totales sincronizados
#[wasm_bindgen]
pub async fn sync_from_cloud() -> Result<String, JsValue> {
    let ctx = context()?;
    let snapshot = DataService::new(&ctx).sync_from_cloud().await.map_err(js_error)?;
    to_json(&serde_json::json!({
        "orders": snapshot.orders.len(),
        "technicians": snapshot.technicians.len(),
        "services": snapshot.services.len(),
        "users": snapshot.customers.len(),
    }))
}

// ============================================================================
// AUTENTICACIÓN
// ============================================================================

#[wasm_bindgen]
pub async fn login(username: String, password: String) -> Result<String, JsValue> {
    let ctx = context()?;
    let user = AuthService::new(&ctx)
        .login(&LoginRequest { username, password })
        .await
        .map_err(js_error)?;
    to_json(&user)
}

#[wasm_bindgen]
pub fn check_auth() -> Result<bool, JsValue> {
    let ctx = context()?;
    Ok(AuthService::new(&ctx).check_auth())
}

#[wasm_bindgen]
pub fn current_user() -> Result<Option<String>, JsValue> {
    let ctx = context()?;
    AuthService::new(&ctx)
        .current_user()
        .map(|user| to_json(&user))
        .transpose()
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    let ctx = context()?;
    AuthService::new(&ctx).logout().map_err(js_error)
}

// ============================================================================
// MODO Y AJUSTES
// ============================================================================

#[wasm_bindgen]
pub fn get_mode() -> Result<String, JsValue> {
    Ok(context()?.mode.get().as_str().to_string())
}

#[wasm_bindgen]
pub fn set_mode(mode: String) -> Result<String, JsValue> {
    let ctx = context()?;
    let mode = ctx.mode.set_raw(&mode).map_err(js_error)?;
    Ok(mode.as_str().to_string())
}

/// `callback(mode)` en cada cambio de modo
#[wasm_bindgen]
pub fn on_mode_change(callback: js_sys::Function) -> Result<(), JsValue> {
    context()?.mode.subscribe(move |mode| {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(mode.as_str())) {
            log::error!("❌ Error en callback de modo: {:?}", e);
        }
    });
    Ok(())
}

#[wasm_bindgen]
pub fn cors_warning_required() -> Result<bool, JsValue> {
    Ok(context()?.cors_warning_required())
}

#[wasm_bindgen]
pub fn get_settings() -> Result<String, JsValue> {
    to_json(&context()?.cloud_settings())
}

#[wasm_bindgen]
pub fn save_settings(json: String) -> Result<(), JsValue> {
    let settings: CloudSettings = from_json(&json)?;
    context()?.save_cloud_settings(settings).map_err(js_error)
}

// ============================================================================
// LOG DE DEPURACIÓN Y AVISOS
// ============================================================================

#[wasm_bindgen]
pub fn debug_log_entries(level: Option<String>) -> Result<String, JsValue> {
    let ctx = context()?;
    let entries = match level {
        Some(level) => ctx.debug_log.entries_at(LogLevel::parse_lenient(&level)),
        None => ctx.debug_log.entries(),
    };
    to_json(&entries)
}

#[wasm_bindgen]
pub fn record_debug(level: String, message: String, data: Option<String>) -> Result<(), JsValue> {
    let ctx = context()?;
    let data = data
        .map(|raw| serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw)));
    ctx.debug(LogLevel::parse_lenient(&level), &message, data);
    Ok(())
}

#[wasm_bindgen]
pub fn clear_debug_log() -> Result<(), JsValue> {
    context()?.debug_log.clear().map_err(js_error)
}

#[wasm_bindgen]
pub fn export_debug_log() -> Result<String, JsValue> {
    Ok(context()?.debug_log.export_text())
}

#[wasm_bindgen]
pub fn take_notifications() -> Result<String, JsValue> {
    to_json(&context()?.notifications.drain())
}

// ============================================================================
// FORMATEO
// ============================================================================

#[wasm_bindgen(js_name = formatAmount)]
pub fn format_amount(amount: f64) -> String {
    format::format_amount(amount)
}

#[wasm_bindgen(js_name = formatDateTime)]
pub fn format_date_time(input: String, pattern: Option<String>) -> String {
    let pattern = pattern.unwrap_or_else(|| format::DEFAULT_DATE_PATTERN.to_string());
    format::format_date_time(&input, &pattern)
}

/// Estado del control de paginación para `total_items` filas
#[wasm_bindgen]
pub fn pagination(total_items: usize, page_size: usize, current_page: usize) -> Result<String, JsValue> {
    let page = Pagination::for_items(total_items, page_size, current_page);
    let window = page.window();
    to_json(&serde_json::json!({
        "currentPage": page.current_page,
        "totalPages": page.total_pages,
        "visible": page.is_visible(),
        "pages": window.collect::<Vec<_>>(),
        "hasPrev": page.has_prev(),
        "hasNext": page.has_next(),
        "showFirst": page.show_first_link(),
        "leadingEllipsis": page.leading_ellipsis(),
        "showLast": page.show_last_link(),
        "trailingEllipsis": page.trailing_ellipsis(),
    }))
}

#[wasm_bindgen]
pub fn status_label(status: String) -> String {
    crate::models::order::status_label(&status).to_string()
}

#[wasm_bindgen]
pub fn app_info() -> Result<String, JsValue> {
    let ctx = context()?;
    let config = &ctx.config;
    to_json(&serde_json::json!({
        "systemName": config.system_name,
        "version": config.version,
        "environment": config.environment,
        "mode": ctx.mode.get(),
        "modeLabel": ctx.mode.get().label(),
        "defaultPageSize": config.pagination.default_page_size,
        "pageSizeOptions": config.pagination.page_size_options,
    }))
}

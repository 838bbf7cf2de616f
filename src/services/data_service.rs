// ============================================================================
// DATA SERVICE - fachada única local/nube para la UI
// ============================================================================
// Modo nube: petición remota, filtros reenviados como `data`, resultado tal
// cual. Modo local: dataset persistido (generado la primera vez) y filtros
// aplicados aquí. Error de red en nube → modo local y datos locales.
// ============================================================================

use serde::Serialize;
use serde_json::{json, Value};

use super::api_client::Operation;
use super::mock_data::MockDataset;
use crate::error::{AppError, AppResult};
use crate::models::stats::DashboardStats;
use crate::models::{
    Collection, Customer, DashboardData, DataSource, ListFilter, LogLevel, Order, OrderStatus,
    Record, Service, Technician,
};
use crate::state::app_state::FILE_PROTOCOL_WARNING;
use crate::state::AppContext;

/// Copia de las cuatro colecciones tras sincronizar con la nube
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub orders: Vec<Order>,
    pub technicians: Vec<Technician>,
    pub services: Vec<Service>,
    pub customers: Vec<Customer>,
}

pub struct DataService<'a> {
    ctx: &'a AppContext,
}

fn encode<T: Serialize>(entity: &'static str, value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Encode {
        entity,
        message: e.to_string(),
    })
}

/// Respuesta de `add`/`update`: el registro completo, solo `{id}`, o nada
fn merge_reply<T: Record>(sent: T, reply: Value) -> T {
    if let Ok(record) = serde_json::from_value::<T>(reply.clone()) {
        if !record.id().is_empty() {
            return record;
        }
    }
    let mut sent = sent;
    if let Some(id) = reply.get("id").and_then(Value::as_str) {
        sent.set_id(id.to_string());
    }
    sent
}

impl<'a> DataService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // LECTURAS
    // ========================================================================

    pub async fn list<T: MockDataset>(&self, filter: &ListFilter) -> AppResult<Vec<T>> {
        let payload = if filter.is_empty() {
            None
        } else {
            Some(encode(T::ENTITY, filter)?)
        };
        let collection = T::COLLECTION;

        self.ctx
            .dispatch(
                &format!("加载{}", collection.label()),
                |client| async move {
                    client
                        .read_list::<T>(collection.name(), payload)
                        .await
                        .map_err(AppError::from)
                },
                || Ok(filter.apply(self.ctx.load_local::<T>()?)),
            )
            .await
    }

    pub async fn get_orders(&self, filter: &ListFilter) -> AppResult<Vec<Order>> {
        self.list(filter).await
    }

    pub async fn get_technicians(&self, filter: &ListFilter) -> AppResult<Vec<Technician>> {
        self.list(filter).await
    }

    pub async fn get_services(&self, filter: &ListFilter) -> AppResult<Vec<Service>> {
        self.list(filter).await
    }

    pub async fn get_customers(&self, filter: &ListFilter) -> AppResult<Vec<Customer>> {
        self.list(filter).await
    }

    pub async fn find<T: MockDataset>(&self, id: &str) -> AppResult<T> {
        self.list::<T>(&ListFilter::default())
            .await?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound {
                entity: T::ENTITY,
                id: id.to_string(),
            })
    }

    // ========================================================================
    // ESCRITURAS
    // ========================================================================

    pub async fn create<T: MockDataset>(&self, record: T) -> AppResult<T> {
        let payload = encode(T::ENTITY, &record)?;
        let sent = record.clone();
        let collection = T::COLLECTION;

        self.ctx
            .dispatch(
                &format!("新增{}", collection.label()),
                |client| async move {
                    let reply = client
                        .execute(collection.name(), Operation::Add, Some(payload))
                        .await?;
                    Ok::<_, AppError>(merge_reply(sent, reply))
                },
                || self.create_local(record),
            )
            .await
    }

    pub async fn update<T: MockDataset>(&self, record: T) -> AppResult<T> {
        let payload = encode(T::ENTITY, &record)?;
        let sent = record.clone();
        let collection = T::COLLECTION;

        self.ctx
            .dispatch(
                &format!("更新{}", collection.label()),
                |client| async move {
                    let reply = client
                        .execute(collection.name(), Operation::Update, Some(payload))
                        .await?;
                    Ok::<_, AppError>(merge_reply(sent, reply))
                },
                || self.update_local(record),
            )
            .await
    }

    pub async fn remove<T: MockDataset>(&self, id: &str) -> AppResult<()> {
        let collection = T::COLLECTION;
        let payload = json!({ "id": id });

        self.ctx
            .dispatch(
                &format!("删除{}", collection.label()),
                |client| async move {
                    client
                        .execute(collection.name(), Operation::Remove, Some(payload))
                        .await?;
                    Ok::<_, AppError>(())
                },
                || self.remove_local::<T>(id),
            )
            .await
    }

    fn create_local<T: MockDataset>(&self, mut record: T) -> AppResult<T> {
        let mut rows = self.ctx.load_local::<T>()?;
        if record.id().is_empty() {
            record.set_id(self.ctx.generate_id());
        }
        record.stamp_created(self.ctx.now());
        rows.push(record.clone());
        self.ctx.store.save_records(&rows)?;
        log::info!("➕ {} creado: {}", T::ENTITY, record.id());
        Ok(record)
    }

    fn update_local<T: MockDataset>(&self, mut record: T) -> AppResult<T> {
        let mut rows = self.ctx.load_local::<T>()?;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| AppError::NotFound {
                entity: T::ENTITY,
                id: record.id().to_string(),
            })?;
        record.stamp_updated(self.ctx.now());
        *slot = record.clone();
        self.ctx.store.save_records(&rows)?;
        log::info!("✏️ {} actualizado: {}", T::ENTITY, record.id());
        Ok(record)
    }

    fn remove_local<T: MockDataset>(&self, id: &str) -> AppResult<()> {
        let mut rows = self.ctx.load_local::<T>()?;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(AppError::NotFound {
                entity: T::ENTITY,
                id: id.to_string(),
            });
        }
        self.ctx.store.save_records(&rows)?;
        log::info!("🗑️ {} eliminado: {}", T::ENTITY, id);
        Ok(())
    }

    // ========================================================================
    // PEDIDOS
    // ========================================================================

    pub async fn change_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let mut order = self.find::<Order>(id).await?;
        order.transition(status, self.ctx.now());
        self.ctx.debug(
            LogLevel::Info,
            "订单状态已更新",
            Some(json!({ "id": id, "status": status.as_str() })),
        );
        self.update(order).await
    }

    pub async fn assign_technician(&self, id: &str, technician: &str) -> AppResult<Order> {
        let mut order = self.find::<Order>(id).await?;
        order.assign(technician, self.ctx.now());
        self.ctx.debug(
            LogLevel::Info,
            "订单已分配技术人员",
            Some(json!({ "id": id, "technician": technician })),
        );
        self.update(order).await
    }

    // ========================================================================
    // SINCRONIZACIÓN Y PANEL
    // ========================================================================

    /// Descarga las cuatro colecciones a la vez y las guarda en local
    pub async fn sync_from_cloud(&self) -> AppResult<Snapshot> {
        if !self.ctx.mode.is_cloud() {
            return Err(AppError::CloudDisabled);
        }

        let client = self.ctx.remote();
        let fetched = futures::try_join!(
            client.read_list::<Order>(Collection::Orders.name(), None),
            client.read_list::<Technician>(Collection::Technicians.name(), None),
            client.read_list::<Service>(Collection::Services.name(), None),
            client.read_list::<Customer>(Collection::Users.name(), None),
        );
        let (orders, technicians, services, customers) = match fetched {
            Ok(collections) => collections,
            Err(err) => {
                self.ctx.report_remote_failure("同步云端数据", &err);
                return Err(err.into());
            }
        };

        self.ctx.store.save_records(&orders)?;
        self.ctx.store.save_records(&technicians)?;
        self.ctx.store.save_records(&services)?;
        self.ctx.store.save_records(&customers)?;

        self.ctx.debug(
            LogLevel::Info,
            "云端数据同步完成",
            Some(json!({
                "orders": orders.len(),
                "technicians": technicians.len(),
                "services": services.len(),
                "users": customers.len(),
            })),
        );

        Ok(Snapshot {
            orders,
            technicians,
            services,
            customers,
        })
    }

    /// Carga inicial del panel: nube si es posible, si no datos locales
    pub async fn load_dashboard(&self) -> AppResult<DashboardData> {
        if self.ctx.cors_warning_required() {
            self.ctx.debug(LogLevel::Warn, FILE_PROTOCOL_WARNING, None);
            self.ctx.notifications.warning(FILE_PROTOCOL_WARNING);
        }

        let mut source = DataSource::Local;
        if self.ctx.mode.is_cloud() {
            if self.ctx.cloud_settings().is_complete() {
                match self.sync_from_cloud().await {
                    Ok(snapshot) => {
                        return Ok(self.assemble(DataSource::Cloud, snapshot));
                    }
                    Err(e) => {
                        // El aviso ya lo emitió report_remote_failure
                        log::warn!("⚠️ Panel sin nube, usando datos locales: {}", e);
                        source = DataSource::LocalFallback;
                    }
                }
            } else {
                self.ctx
                    .debug(LogLevel::Warn, "云端配置不完整，使用本地数据", None);
            }
        }

        let snapshot = Snapshot {
            orders: self.ctx.load_local()?,
            technicians: self.ctx.load_local()?,
            services: self.ctx.load_local()?,
            customers: self.ctx.load_local()?,
        };
        Ok(self.assemble(source, snapshot))
    }

    fn assemble(&self, source: DataSource, snapshot: Snapshot) -> DashboardData {
        let data = DashboardData::assemble(
            source,
            snapshot.orders,
            snapshot.technicians,
            snapshot.services,
            snapshot.customers,
        );
        let DashboardStats {
            total_orders,
            total_revenue,
            pending_orders,
            completed_orders,
            ..
        } = data.stats;
        self.ctx.debug(
            LogLevel::Info,
            "仪表盘统计数据加载完成",
            Some(json!({
                "totalOrders": total_orders,
                "totalRevenue": total_revenue,
                "pendingOrders": pending_orders,
                "completedOrders": completed_orders,
            })),
        );
        data
    }
}

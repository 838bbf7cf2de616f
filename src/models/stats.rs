use serde::Serialize;

use super::order::{Order, OrderStatus};
use super::{Customer, Service, Technician};

/// Origen de los datos mostrados en el panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Cloud,
    Local,
    /// Nube configurada pero inaccesible
    LocalFallback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_technicians: usize,
}

impl DashboardStats {
    pub fn compute(orders: &[Order], technicians: &[Technician]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total_orders: orders.len(),
            total_revenue: orders.iter().map(|o| o.price).sum(),
            pending_orders: count(OrderStatus::Pending),
            completed_orders: count(OrderStatus::Completed),
            total_technicians: technicians.len(),
        }
    }
}

/// Los `limit` pedidos más recientes (por `createdAt`, descendente)
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Todo lo que necesita la vista del panel tras la carga inicial
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub source: DataSource,
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub orders: Vec<Order>,
    pub technicians: Vec<Technician>,
    pub services: Vec<Service>,
    pub customers: Vec<Customer>,
}

impl DashboardData {
    pub const RECENT_LIMIT: usize = 5;

    pub fn assemble(
        source: DataSource,
        orders: Vec<Order>,
        technicians: Vec<Technician>,
        services: Vec<Service>,
        customers: Vec<Customer>,
    ) -> Self {
        Self {
            source,
            stats: DashboardStats::compute(&orders, &technicians),
            recent_orders: recent_orders(&orders, Self::RECENT_LIMIT),
            orders,
            technicians,
            services,
            customers,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Collection, Record};
use crate::utils::constants::STORAGE_KEY_ORDERS;
use crate::utils::serde_helpers::{f64_from_any, id_from_any};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    // Datos antiguos del panel usaban "processing"
    #[serde(alias = "processing")]
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Assigned,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Texto mostrado en la tabla
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "待处理",
            OrderStatus::Assigned => "已分配",
            OrderStatus::InProgress => "处理中",
            OrderStatus::Completed => "已完成",
            OrderStatus::Cancelled => "已取消",
        }
    }

    /// Clase de la etiqueta de estado
    pub fn style(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "warning",
            OrderStatus::Assigned => "primary",
            OrderStatus::InProgress => "info",
            OrderStatus::Completed => "success",
            OrderStatus::Cancelled => "danger",
        }
    }

    /// Estados en los que no puede haber técnico asignado
    pub fn is_unassigned(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Cancelled)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "processing" => Some(OrderStatus::InProgress),
            _ => Self::ALL.into_iter().find(|s| s.as_str() == raw),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Texto para un estado en bruto; desconocido → "未知状态"
pub fn status_label(raw: &str) -> &'static str {
    OrderStatus::parse(raw)
        .map(|s| s.label())
        .unwrap_or("未知状态")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(deserialize_with = "f64_from_any")]
    pub price: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub assigned_technician: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Cambia el estado manteniendo las invariantes:
    /// `completed_at` solo si completado, sin técnico si pendiente/cancelado
    pub fn transition(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == OrderStatus::Completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
        } else {
            self.completed_at = None;
        }
        if status.is_unassigned() {
            self.assigned_technician = None;
        }
        self.updated_at = now;
    }

    /// Asigna un técnico; un pedido pendiente pasa a `assigned`
    pub fn assign(&mut self, technician: impl Into<String>, now: DateTime<Utc>) {
        if self.status.is_unassigned() {
            self.transition(OrderStatus::Assigned, now);
        }
        self.assigned_technician = Some(technician.into());
        self.updated_at = now;
    }

    pub fn is_consistent(&self) -> bool {
        let completion_ok = (self.status == OrderStatus::Completed) == self.completed_at.is_some();
        let technician_ok = !(self.status.is_unassigned() && self.assigned_technician.is_some());
        completion_ok && technician_ok
    }
}

impl Record for Order {
    const ENTITY: &'static str = "Pedido";
    const COLLECTION: Collection = Collection::Orders;
    const STORAGE_KEY: &'static str = STORAGE_KEY_ORDERS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.customer_name.as_str(),
            self.order_number.as_str(),
            self.service_type.as_str(),
        ]
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: "o1".into(),
            order_number: "ORD123001".into(),
            customer_name: "客户1".into(),
            customer_phone: "13800000001".into(),
            service_type: "电脑维修".into(),
            description: String::new(),
            address: "北京市朝阳区XX路XX号".into(),
            price: 200.0,
            status,
            assigned_technician: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    #[test]
    fn test_status_wire_names_and_labels() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let legacy: OrderStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(legacy, OrderStatus::InProgress);
        assert_eq!(status_label("completed"), "已完成");
        assert_eq!(status_label("weird"), "未知状态");
        assert_eq!(OrderStatus::Cancelled.style(), "danger");
    }

    #[test]
    fn test_transition_keeps_invariants() {
        let now = Utc::now();
        let mut order = sample(OrderStatus::Pending);
        order.assign("张工", now);
        assert_eq!(order.status, OrderStatus::Assigned);
        assert!(order.is_consistent());

        order.transition(OrderStatus::Completed, now);
        assert_eq!(order.completed_at, Some(now));
        assert_eq!(order.assigned_technician.as_deref(), Some("张工"));
        assert!(order.is_consistent());

        order.transition(OrderStatus::Cancelled, now);
        assert!(order.completed_at.is_none());
        assert!(order.assigned_technician.is_none());
        assert!(order.is_consistent());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let order = sample(OrderStatus::Pending);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderNumber"], "ORD123001");
        assert_eq!(value["assignedTechnician"], serde_json::Value::Null);
        assert_eq!(value["status"], "pending");
    }
}

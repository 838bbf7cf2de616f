pub mod auth;
pub mod customer;
pub mod debug_log;
pub mod filter;
pub mod order;
pub mod record;
pub mod service;
pub mod settings;
pub mod stats;
pub mod technician;

pub use auth::{LoginRequest, UserInfo, UserRole};
pub use customer::Customer;
pub use debug_log::{LogEntry, LogLevel};
pub use filter::ListFilter;
pub use order::{Order, OrderStatus};
pub use record::{Collection, Record};
pub use service::Service;
pub use settings::CloudSettings;
pub use stats::{DashboardData, DashboardStats, DataSource};
pub use technician::{Technician, TechnicianStatus};

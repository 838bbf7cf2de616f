pub mod api_client;
pub mod auth_service;
pub mod data_service;
pub mod debug_log_service;
pub mod local_store;
pub mod mock_data;
#[cfg(test)]
pub mod mock_transport;
pub mod transport;

pub use api_client::{Operation, RemoteClient};
pub use auth_service::AuthService;
pub use data_service::{DataService, Snapshot};
pub use debug_log_service::DebugLog;
pub use local_store::LocalStore;
pub use mock_data::MockDataset;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

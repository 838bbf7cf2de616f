// Utils compartidos

pub mod browser;
pub mod constants;
pub mod format;
pub mod ids;
pub mod pagination;
pub mod serde_helpers;
pub mod storage;

pub use constants::*;
pub use format::*;
pub use ids::*;
pub use pagination::Pagination;
pub use storage::{KeyValueStore, MemoryStore};

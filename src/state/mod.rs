// ============================================================================
// STATE MODULE - Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod mode_state;
pub mod notifications;
pub mod reactivity;

pub use app_state::AppContext;
pub use mode_state::{ModeSelector, StorageMode};
pub use notifications::{Notification, NotificationLevel, Notifications};
pub use reactivity::ReactiveState;

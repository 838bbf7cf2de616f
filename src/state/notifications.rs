// ============================================================================
// NOTIFICATIONS - cola de avisos (toasts) para la capa de UI
// ============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;

use serde::Serialize;

pub const DEFAULT_DURATION_MS: u32 = 3000;
/// Avisos pendientes como máximo; se descartan los más antiguos
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration_ms: u32,
}

pub struct Notifications {
    queue: RefCell<VecDeque<Notification>>,
    capacity: usize,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) {
        let mut queue = self.queue.borrow_mut();
        while queue.len() >= self.capacity {
            if let Some(dropped) = queue.pop_front() {
                log::debug!("🔕 Aviso descartado sin mostrar: {}", dropped.message);
            }
        }
        queue.push_back(Notification {
            level,
            message: message.into(),
            duration_ms: DEFAULT_DURATION_MS,
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// Saca todos los avisos pendientes, en orden
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let notifications = Notifications::new();
        notifications.warning("a");
        notifications.error("b");
        assert_eq!(notifications.len(), 2);

        let drained = notifications.drain();
        assert_eq!(drained[0].level, NotificationLevel::Warning);
        assert_eq!(drained[1].message, "b");
        assert_eq!(drained[1].duration_ms, DEFAULT_DURATION_MS);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_undrained_queue_keeps_only_the_newest() {
        let notifications = Notifications::with_capacity(3);
        for i in 0..5 {
            notifications.info(format!("aviso {}", i));
        }
        assert_eq!(notifications.len(), 3);

        let messages: Vec<_> = notifications.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["aviso 2", "aviso 3", "aviso 4"]);
        assert_eq!(Notifications::new().capacity, DEFAULT_CAPACITY);
    }
}

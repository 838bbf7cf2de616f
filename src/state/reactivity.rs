// ============================================================================
// REACTIVITY - valor observable con subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Estado reactivo: notifica a los subscribers solo cuando el valor cambia
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: RefCell<Vec<Callback<T>>>,
}

impl<T: Clone + PartialEq> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Devuelve `true` si el valor cambió
    pub fn set(&self, new_value: T) -> bool {
        if *self.value.borrow() == new_value {
            return false;
        }
        *self.value.borrow_mut() = new_value;
        self.notify();
        true
    }

    /// Se puede suscribir desde dentro de un callback; el nuevo subscriber
    /// recibe a partir del siguiente cambio
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        let current = self.get();
        let subscribers: Vec<Callback<T>> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(&current);
        }
    }
}

use std::cell::RefCell;

/// Callbacks registered through a component's `on_change`.
///
/// Listeners run in registration order. A listener must not register
/// another listener on the same component while being notified.
pub(crate) struct Listeners<T> {
    callbacks: RefCell<Vec<Box<dyn FnMut(&T)>>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Listeners<T> {
    pub(crate) fn push(&self, listener: impl FnMut(&T) + 'static) {
        self.callbacks.borrow_mut().push(Box::new(listener));
    }

    pub(crate) fn notify(&self, value: &T) {
        for callback in self.callbacks.borrow_mut().iter_mut() {
            callback(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Listeners;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_notify_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listeners = Listeners::default();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            listeners.push(move |value: &u8| seen.borrow_mut().push((tag, *value)));
        }
        listeners.notify(&1);
        listeners.notify(&2);
        assert_eq!(*seen.borrow(), [("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }
}

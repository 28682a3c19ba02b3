//! Push-based change notification for the state holders.
//!
//! Each state holder owns a `Notifier` keyed by the field that changed.
//! Subscribers run synchronously, in registration order, before the mutating
//! call returns.

pub type SubscriptionId = usize;

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct Notifier<F, E> {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, F, Handler<E>)>,
}

impl<F: Copy + PartialEq, E> Notifier<F, E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register `handler` for changes of `field`. Returns an id for `unsubscribe`.
    pub fn subscribe<H>(&mut self, field: F, handler: H) -> SubscriptionId
    where
        H: FnMut(&E) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, field, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn notify(&mut self, field: F, event: &E) {
        for (_, sub_field, handler) in self.subscribers.iter_mut() {
            if *sub_field == field {
                handler(event);
            }
        }
    }
}

impl<F: Copy + PartialEq, E> Default for Notifier<F, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Field {
        A,
        B,
    }

    #[test]
    fn test_notify_runs_matching_handlers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier: Notifier<Field, u32> = Notifier::new();

        let l = Rc::clone(&log);
        notifier.subscribe(Field::A, move |v| l.borrow_mut().push(format!("first {v}")));
        let l = Rc::clone(&log);
        notifier.subscribe(Field::B, move |v| l.borrow_mut().push(format!("b {v}")));
        let l = Rc::clone(&log);
        notifier.subscribe(Field::A, move |v| l.borrow_mut().push(format!("second {v}")));

        notifier.notify(Field::A, &7);
        assert_eq!(*log.borrow(), vec!["first 7", "second 7"]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_handler() {
        let hits = Rc::new(RefCell::new(0));
        let mut notifier: Notifier<Field, ()> = Notifier::new();

        let h = Rc::clone(&hits);
        let id = notifier.subscribe(Field::A, move |_| *h.borrow_mut() += 1);
        let h = Rc::clone(&hits);
        notifier.subscribe(Field::A, move |_| *h.borrow_mut() += 10);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(Field::A, &());
        assert_eq!(*hits.borrow(), 10);
    }
}

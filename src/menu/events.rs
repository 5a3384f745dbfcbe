//! Selection-change notifications.
//!
//! Every effective change of the selection index emits `input` followed by
//! `change`, synchronously, before the call that changed the index returns.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a menu instance. Events always name the menu itself as their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(u64);

impl MenuId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MenuId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Change,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEvent {
    pub kind: EventKind,
    pub target: MenuId,
}

type Listener = Box<dyn FnMut(&MenuEvent)>;

/// Registered listeners, keyed by event kind.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(EventKind, Listener)>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventDispatcher {
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&MenuEvent) + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    pub fn dispatch(&mut self, event: MenuEvent) {
        for (kind, listener) in &mut self.listeners {
            if *kind == event.kind {
                listener(&event);
            }
        }
    }

    /// Emit the `input`/`change` pair for one selection change.
    pub fn selection_changed(&mut self, target: MenuId) {
        self.dispatch(MenuEvent {
            kind: EventKind::Input,
            target,
        });
        self.dispatch(MenuEvent {
            kind: EventKind::Change,
            target,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_input_precedes_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::default();
        for kind in [EventKind::Change, EventKind::Input] {
            let seen = Rc::clone(&seen);
            dispatcher.add_listener(kind, move |e| seen.borrow_mut().push(e.kind));
        }

        dispatcher.selection_changed(MenuId::next());
        assert_eq!(*seen.borrow(), vec![EventKind::Input, EventKind::Change]);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(MenuId::next(), MenuId::next());
    }
}

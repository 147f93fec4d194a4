use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::selection::selection_model::{SelectedElement, StateSnapshot};

/// Unsolicited engine -> host messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Sent after every mutation, carrying the full current state.
    StateChanged(StateSnapshot),

    /// Sent once per new insertion.
    ElementSelected { selected_element: SelectedElement },
}

/// Receiver of engine notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

impl<F: FnMut(&Notification)> NotificationSink for F {
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// Fan-out to every subscribed sink.
#[derive(Default)]
pub struct Notifier {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Notifier {
    pub fn subscribe(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn publish(&mut self, notification: Notification) {
        for sink in &mut self.sinks {
            sink.notify(&notification);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Shared in-memory log of notifications; clones see the same log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    inner: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> Box<dyn NotificationSink> {
        let inner = Rc::clone(&self.inner);
        Box::new(move |n: &Notification| inner.borrow_mut().push(n.clone()))
    }

    pub fn all(&self) -> Vec<Notification> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn state_changes(&self) -> Vec<StateSnapshot> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::StateChanged(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn selections(&self) -> Vec<SelectedElement> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::ElementSelected { selected_element } => {
                    Some(selected_element.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

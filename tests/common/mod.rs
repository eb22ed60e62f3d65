// ABOUTME: Shared test helpers: a host that records every callback a toast makes

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use toastbox::{Notification, NotificationId, ToastHost};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RequestLeave(String),
    FinalizeRemoval(String),
    SuspendAutoDismiss(String),
    /// Pushed by action callbacks in tests to check ordering.
    ActionInvoked(String),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: RefCell<Vec<Call>>,
}

impl RecordingHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| matches(c)).count()
    }
}

impl ToastHost for RecordingHost {
    fn request_leave(&self, id: &NotificationId) {
        self.push(Call::RequestLeave(id.to_string()));
    }

    fn finalize_removal(&self, id: &NotificationId) {
        self.push(Call::FinalizeRemoval(id.to_string()));
    }

    fn suspend_auto_dismiss(&self, notification: &Notification) {
        self.push(Call::SuspendAutoDismiss(notification.id().to_string()));
    }
}

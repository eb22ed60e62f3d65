// ABOUTME: Toast lifecycle state machine (Entering -> Visible -> Leaving -> Removed)
// Coordinates user dismissal, action invocation, the focus shortcut and leave-animation completion

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crossterm::event::Event;
use tracing::{debug, info};

use crate::animation::{AnimationEnd, Transition};
use crate::input::{InputBus, ListenerKind, Shortcut, Subscription};
use crate::notification::{Notification, NotificationId};

use super::host::ToastHost;
use super::view::{ActionControl, Role, ToastView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Entering,
    Visible,
    Leaving,
    Removed,
}

impl Lifecycle {
    /// Whether user input is still accepted.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

/// Clickable controls inside a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Action,
    Close,
}

pub struct ToastUnit {
    notification: Rc<Notification>,
    host: Rc<dyn ToastHost>,
    lifecycle: Rc<Cell<Lifecycle>>,
    action_focused: Rc<Cell<bool>>,
    key_listener: Option<Subscription>,
}

impl ToastUnit {
    /// Mounts a toast in the `Entering` state and registers its focus
    /// shortcut on `input` for as long as the unit lives.
    pub fn mount(
        notification: impl Into<Rc<Notification>>,
        host: Rc<dyn ToastHost>,
        input: &InputBus,
        shortcut: Shortcut,
    ) -> Self {
        let notification = notification.into();
        let lifecycle = Rc::new(Cell::new(Lifecycle::Entering));
        let action_focused = Rc::new(Cell::new(false));

        let key_listener = {
            let notification = Rc::clone(&notification);
            let host = Rc::clone(&host);
            let lifecycle = Rc::clone(&lifecycle);
            let action_focused = Rc::clone(&action_focused);
            input.listen(ListenerKind::KeyDown, move |event| {
                let Event::Key(key) = event else {
                    return;
                };
                if !shortcut.matches(key)
                    || notification.action().is_none()
                    || !lifecycle.get().is_interactive()
                {
                    return;
                }
                action_focused.set(true);
                debug!("Focused action of toast {}", notification.id());
                host.suspend_auto_dismiss(&notification);
            })
        };

        info!("Mounted toast {} ({})", notification.id(), notification.notification_type().as_str());
        Self {
            notification,
            host,
            lifecycle,
            action_focused,
            key_listener: Some(key_listener),
        }
    }

    pub fn id(&self) -> &NotificationId {
        self.notification.id()
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    pub fn is_removed(&self) -> bool {
        self.lifecycle() == Lifecycle::Removed
    }

    pub fn action_focused(&self) -> bool {
        self.action_focused.get()
    }

    pub fn has_key_listener(&self) -> bool {
        self.key_listener.is_some()
    }

    pub fn view(&self) -> ToastView {
        let lifecycle = self.lifecycle();
        let transition = match lifecycle {
            Lifecycle::Entering => Some(Transition::Enter),
            Lifecycle::Leaving | Lifecycle::Removed => Some(Transition::Leave),
            Lifecycle::Visible => None,
        };
        ToastView {
            id: self.id().clone(),
            role: Role::for_type(self.notification.notification_type()),
            lifecycle,
            transition,
            notification_type: self.notification.notification_type(),
            message: self.notification.message().to_string(),
            action: self.notification.action().map(|action| ActionControl {
                text: action.text().to_string(),
                aria_label: action.aria_label().to_string(),
                focused: self.action_focused(),
            }),
            close_label: "Dismiss",
        }
    }

    /// User-initiated dismissal. Applies the leave transition and asks the
    /// host to begin removal. Returns `false` if already leaving or removed.
    pub fn dismiss(&mut self) -> bool {
        if !self.begin_leave() {
            return false;
        }
        self.host.request_leave(self.notification.id());
        true
    }

    /// Leave requested by the owner (auto-dismiss expiry, or acknowledging
    /// a `request_leave`). No callback is fired.
    pub fn start_leaving(&mut self) -> bool {
        self.begin_leave()
    }

    /// Runs the action's callback once, then dismisses.
    pub fn invoke_action(&mut self) -> bool {
        let notification = Rc::clone(&self.notification);
        let Some(action) = notification.action() else {
            return false;
        };
        if !self.lifecycle().is_interactive() {
            debug!("Ignoring action on toast {} in {:?}", self.id(), self.lifecycle());
            return false;
        }
        info!("Invoking action '{}' on toast {}", action.text(), self.id());
        action.invoke();
        self.dismiss()
    }

    pub fn click(&mut self, control: Control) -> bool {
        match control {
            Control::Action => self.invoke_action(),
            Control::Close => self.dismiss(),
        }
    }

    pub fn blur(&mut self) {
        self.action_focused.set(false);
    }

    /// Handles an animation-completion signal. Only the transition matching
    /// the current state advances it; everything else is ignored.
    pub fn on_animation_end(&mut self, end: AnimationEnd) -> bool {
        match self.lifecycle() {
            Lifecycle::Entering if end.is(Transition::Enter) => {
                self.lifecycle.set(Lifecycle::Visible);
                debug!("Toast {} visible", self.id());
                true
            }
            Lifecycle::Leaving if end.is(Transition::Leave) => {
                self.lifecycle.set(Lifecycle::Removed);
                self.key_listener = None;
                info!("Toast {} removed", self.id());
                self.host.finalize_removal(self.notification.id());
                true
            }
            state => {
                debug!("Ignoring {:?} on toast {} in {:?}", end.source, self.id(), state);
                false
            }
        }
    }

    /// Forced removal. No callbacks fire; the key listener is released.
    pub fn unmount(self) {
        debug!("Unmounting toast {} in {:?}", self.id(), self.lifecycle());
    }

    fn begin_leave(&mut self) -> bool {
        if !self.lifecycle().is_interactive() {
            debug!("Toast {} already {:?}", self.id(), self.lifecycle());
            return false;
        }
        self.lifecycle.set(Lifecycle::Leaving);
        self.action_focused.set(false);
        info!("Toast {} leaving", self.id());
        true
    }
}

impl fmt::Debug for ToastUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastUnit")
            .field("notification", &self.notification)
            .field("lifecycle", &self.lifecycle())
            .field("action_focused", &self.action_focused())
            .field("key_listener", &self.key_listener)
            .finish_non_exhaustive()
    }
}

// ABOUTME: Notification record consumed by a toast unit
// The manager owns these; a mounted toast only ever reads them

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier, stable for the notification's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id, used by the manager when it admits a notification.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Severity of a notification. Only selects iconography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    #[default]
    Default,
    Success,
    Warning,
    Error,
    Loading,
}

impl NotificationType {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Loading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Loading => "loading",
        }
    }
}

/// Optional user-invokable operation attached to a notification.
#[derive(Clone)]
pub struct ToastAction {
    text: String,
    aria_label: String,
    on_invoke: Rc<dyn Fn()>,
}

impl ToastAction {
    pub fn new(text: impl Into<String>, aria_label: impl Into<String>, on_invoke: impl Fn() + 'static) -> Self {
        Self {
            text: text.into(),
            aria_label: aria_label.into(),
            on_invoke: Rc::new(on_invoke),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn aria_label(&self) -> &str {
        &self.aria_label
    }

    pub(crate) fn invoke(&self) {
        (self.on_invoke)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("text", &self.text)
            .field("aria_label", &self.aria_label)
            .finish_non_exhaustive()
    }
}

/// Immutable notification record. Fields are private so a mounted unit
/// cannot change what it was handed.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    notification_type: NotificationType,
    message: String,
    action: Option<ToastAction>,
}

impl Notification {
    pub fn new(id: impl Into<NotificationId>, notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            notification_type,
            message: message.into(),
            action: None,
        }
    }

    pub fn success(id: impl Into<NotificationId>, message: impl Into<String>) -> Self {
        Self::new(id, NotificationType::Success, message)
    }

    pub fn error(id: impl Into<NotificationId>, message: impl Into<String>) -> Self {
        Self::new(id, NotificationType::Error, message)
    }

    pub fn warning(id: impl Into<NotificationId>, message: impl Into<String>) -> Self {
        Self::new(id, NotificationType::Warning, message)
    }

    #[must_use]
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }
}

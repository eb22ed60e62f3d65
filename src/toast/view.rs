// ABOUTME: Render output of a toast unit, independent of any terminal backend

use crate::animation::Transition;
use crate::notification::{NotificationId, NotificationType};

use super::Lifecycle;

/// Semantic role announced to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Status,
    Alert,
}

impl Role {
    pub fn for_type(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Error | NotificationType::Warning => Self::Alert,
            NotificationType::Default | NotificationType::Success | NotificationType::Loading => Self::Status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Alert => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    pub text: String,
    pub aria_label: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: NotificationId,
    pub role: Role,
    pub lifecycle: Lifecycle,
    /// Transition class currently applied, if any.
    pub transition: Option<Transition>,
    pub notification_type: NotificationType,
    pub message: String,
    pub action: Option<ActionControl>,
    pub close_label: &'static str,
}

impl ToastView {
    pub fn has_class(&self, transition: Transition) -> bool {
        self.transition == Some(transition)
    }
}

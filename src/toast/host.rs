// ABOUTME: Callback seam between a toast unit and the manager that owns it
// The channel-backed host queues commands so units never call back into the manager directly

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::notification::{Notification, NotificationId};

/// What a toast unit may ask of its owner.
#[cfg_attr(test, mockall::automock)]
pub trait ToastHost {
    /// Begin removing this notification: stop its auto-dismiss timer and
    /// move it to the leaving state.
    fn request_leave(&self, id: &NotificationId);

    /// The leave transition finished; drop the notification.
    fn finalize_removal(&self, id: &NotificationId);

    /// Cancel any pending automatic removal.
    fn suspend_auto_dismiss(&self, notification: &Notification);
}

#[derive(Debug, Clone)]
pub enum HostCommand {
    RequestLeave(NotificationId),
    FinalizeRemoval(NotificationId),
    SuspendAutoDismiss(Notification),
}

#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: UnboundedSender<HostCommand>,
}

impl ChannelHost {
    pub fn new() -> (Self, UnboundedReceiver<HostCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, command: HostCommand) {
        if let Err(e) = self.tx.send(command) {
            debug!("Toast manager is gone, dropping {:?}", e.0);
        }
    }
}

impl ToastHost for ChannelHost {
    fn request_leave(&self, id: &NotificationId) {
        self.send(HostCommand::RequestLeave(id.clone()));
    }

    fn finalize_removal(&self, id: &NotificationId) {
        self.send(HostCommand::FinalizeRemoval(id.clone()));
    }

    fn suspend_auto_dismiss(&self, notification: &Notification) {
        self.send(HostCommand::SuspendAutoDismiss(notification.clone()));
    }
}

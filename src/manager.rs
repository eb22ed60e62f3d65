// ABOUTME: Toast manager owning the mounted units, auto-dismiss deadlines and transition playback
// Services the commands units send through their host and drops units once removal is final

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::animation::{Transition, TransitionPlayer};
use crate::config::Config;
use crate::input::{InputBus, Shortcut};
use crate::notification::{Notification, NotificationId, NotificationType, ToastAction};
use crate::toast::{ChannelHost, Control, HostCommand, ToastHost, ToastUnit, ToastView};

#[derive(Debug, Clone)]
pub struct ToastSettings {
    pub auto_dismiss: Option<Duration>,
    pub enter: Duration,
    pub leave: Duration,
    pub shortcut: Shortcut,
    pub max_visible: usize,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ToastSettings {
    fn from(config: &Config) -> Self {
        let shortcut = config.shortcut().unwrap_or_else(|e| {
            warn!("{}", e);
            Shortcut::default()
        });
        Self {
            auto_dismiss: config.auto_dismiss(),
            enter: config.enter_duration(),
            leave: config.leave_duration(),
            shortcut,
            max_visible: config.max_visible.max(1),
        }
    }
}

/// What the render layer needs for one toast on one frame.
#[derive(Debug, Clone)]
pub struct ToastFrame {
    pub view: ToastView,
    /// Progress of the active transition, 1.0 when none is playing.
    pub progress: f64,
}

#[derive(Debug)]
struct Entry {
    unit: ToastUnit,
    deadline: Option<Instant>,
    player: Option<TransitionPlayer>,
}

#[derive(Debug)]
pub struct ToastManager {
    entries: Vec<Entry>,
    /// Notifications waiting for a free slot. Not mounted, no deadline.
    queue: VecDeque<Notification>,
    input: InputBus,
    host: Rc<ChannelHost>,
    commands: UnboundedReceiver<HostCommand>,
    settings: ToastSettings,
}

impl ToastManager {
    pub fn new(settings: ToastSettings) -> Self {
        let (host, commands) = ChannelHost::new();
        Self {
            entries: Vec::new(),
            queue: VecDeque::new(),
            input: InputBus::new(),
            host: Rc::new(host),
            commands,
            settings,
        }
    }

    pub fn settings(&self) -> &ToastSettings {
        &self.settings
    }

    pub fn input(&self) -> &InputBus {
        &self.input
    }

    /// Number of mounted toasts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of notifications waiting for a slot.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.queue.is_empty()
    }

    pub fn get(&self, id: &NotificationId) -> Option<&ToastUnit> {
        self.entries.iter().find(|e| e.unit.id() == id).map(|e| &e.unit)
    }

    pub fn deadline(&self, id: &NotificationId) -> Option<Instant> {
        self.entry(id).and_then(|e| e.deadline)
    }

    /// Admits a new notification. It is mounted right away when a slot is
    /// free, otherwise queued until an earlier toast is removed.
    pub fn push(
        &mut self,
        notification_type: NotificationType,
        message: impl Into<String>,
        action: Option<ToastAction>,
        now: Instant,
    ) -> NotificationId {
        let mut notification = Notification::new(NotificationId::generate(), notification_type, message);
        if let Some(action) = action {
            notification = notification.with_action(action);
        }
        self.mount(notification, now)
    }

    /// Admits a caller-built notification. Its id must be unique.
    pub fn mount(&mut self, notification: Notification, now: Instant) -> NotificationId {
        let id = notification.id().clone();
        if self.entries.len() >= self.settings.max_visible || !self.queue.is_empty() {
            self.queue.push_back(notification);
            info!("Queued toast {} ({} waiting)", id, self.queue.len());
            return id;
        }
        self.mount_now(notification, now);
        id
    }

    fn mount_now(&mut self, notification: Notification, now: Instant) {
        let id = notification.id().clone();
        let host: Rc<dyn ToastHost> = self.host.clone();
        let unit = ToastUnit::mount(notification, host, &self.input, self.settings.shortcut);
        self.entries.push(Entry {
            unit,
            deadline: self.settings.auto_dismiss.map(|delay| now + delay),
            player: Some(TransitionPlayer::start(Transition::Enter, self.settings.enter, now)),
        });
        info!("Showing toast {} ({} mounted)", id, self.entries.len());
    }

    fn promote_from_queue(&mut self, now: Instant) {
        while self.entries.len() < self.settings.max_visible {
            let Some(notification) = self.queue.pop_front() else {
                break;
            };
            self.mount_now(notification, now);
        }
    }

    /// Advances timers and animations to `now`.
    pub fn tick(&mut self, now: Instant) {
        for entry in &mut self.entries {
            if entry.deadline.is_some_and(|deadline| deadline <= now) {
                entry.deadline = None;
                debug!("Auto-dismissing toast {}", entry.unit.id());
                entry.unit.start_leaving();
            }
        }
        self.sync_transitions(now);

        for entry in &mut self.entries {
            let end = entry.player.as_mut().and_then(|player| player.poll(now));
            if let Some(end) = end {
                entry.unit.on_animation_end(end);
            }
        }
        self.process_commands();
        self.promote_from_queue(now);
        self.sync_transitions(now);
    }

    /// Routes an input event through the shared listener bus.
    pub fn dispatch_event(&mut self, event: &Event) -> usize {
        let delivered = self.input.dispatch(event);
        self.settle_focus();
        self.process_commands();
        delivered
    }

    /// Dismisses a toast. A queued notification is dropped without ever
    /// being mounted.
    pub fn dismiss(&mut self, id: &NotificationId, now: Instant) -> bool {
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            debug!("Dropped queued toast {}", id);
            return true;
        }
        self.with_unit(id, now, ToastUnit::dismiss)
    }

    pub fn click(&mut self, id: &NotificationId, control: Control, now: Instant) -> bool {
        self.with_unit(id, now, |unit| unit.click(control))
    }

    /// Dismisses the newest toast that still accepts input.
    pub fn dismiss_latest(&mut self, now: Instant) -> bool {
        let Some(id) = self
            .entries
            .iter()
            .rev()
            .find(|e| e.unit.lifecycle().is_interactive())
            .map(|e| e.unit.id().clone())
        else {
            return false;
        };
        self.dismiss(&id, now)
    }

    pub fn invoke_focused_action(&mut self, now: Instant) -> bool {
        let Some(id) = self.focused().cloned() else {
            return false;
        };
        self.with_unit(&id, now, ToastUnit::invoke_action)
    }

    /// The toast whose action currently holds input focus.
    pub fn focused(&self) -> Option<&NotificationId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.unit.action_focused())
            .map(|e| e.unit.id())
    }

    pub fn has_focused_action(&self) -> bool {
        self.focused().is_some()
    }

    pub fn blur_all(&mut self) {
        for entry in &mut self.entries {
            entry.unit.blur();
        }
    }

    /// Force-unmounts every toast. No removal callbacks are involved.
    pub fn clear(&mut self) {
        let count = self.entries.len() + self.queue.len();
        self.queue.clear();
        for entry in self.entries.drain(..) {
            entry.unit.unmount();
        }
        // Anything queued by the unmounted units refers to ids that are gone.
        while self.commands.try_recv().is_ok() {}
        info!("Cleared {} toasts", count);
    }

    /// Every mounted toast, oldest first.
    pub fn frames(&self, now: Instant) -> Vec<ToastFrame> {
        self.entries
            .iter()
            .map(|entry| ToastFrame {
                view: entry.unit.view(),
                progress: entry.player.as_ref().map_or(1.0, |player| player.progress(now)),
            })
            .collect()
    }

    pub fn process_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                HostCommand::RequestLeave(id) => match self.entry_mut(&id) {
                    Some(entry) => {
                        entry.deadline = None;
                        entry.unit.start_leaving();
                    }
                    None => debug!("Leave requested for unknown toast {}", id),
                },
                HostCommand::SuspendAutoDismiss(notification) => match self.entry_mut(notification.id()) {
                    Some(entry) => {
                        if entry.deadline.take().is_some() {
                            info!("Suspended auto-dismiss for toast {}", notification.id());
                        }
                    }
                    None => debug!("Suspend requested for unknown toast {}", notification.id()),
                },
                HostCommand::FinalizeRemoval(id) => {
                    let before = self.entries.len();
                    self.entries.retain(|e| e.unit.id() != &id);
                    if self.entries.len() == before {
                        debug!("Removal finalized for unknown toast {}", id);
                    } else {
                        info!("Purged toast {} ({} mounted)", id, self.entries.len());
                    }
                }
            }
        }
    }

    fn with_unit(&mut self, id: &NotificationId, now: Instant, op: impl FnOnce(&mut ToastUnit) -> bool) -> bool {
        let changed = match self.entry_mut(id) {
            Some(entry) => op(&mut entry.unit),
            None => {
                debug!("No mounted toast {}", id);
                return false;
            }
        };
        self.process_commands();
        self.promote_from_queue(now);
        self.sync_transitions(now);
        changed
    }

    /// Input focus is exclusive. Every listener marks its own unit on the
    /// shortcut, so keep only the newest one.
    fn settle_focus(&mut self) {
        let mut owner_found = false;
        for entry in self.entries.iter_mut().rev() {
            if !entry.unit.action_focused() {
                continue;
            }
            if owner_found {
                entry.unit.blur();
            } else {
                owner_found = true;
            }
        }
    }

    /// Starts the player matching each unit's current transition class.
    fn sync_transitions(&mut self, now: Instant) {
        let (enter, leave) = (self.settings.enter, self.settings.leave);
        for entry in &mut self.entries {
            let wanted = entry.unit.view().transition;
            let playing = entry.player.as_ref().map(TransitionPlayer::transition);
            if wanted == playing {
                continue;
            }
            entry.player = wanted.map(|transition| {
                let duration = match transition {
                    Transition::Enter => enter,
                    Transition::Leave => leave,
                };
                TransitionPlayer::start(transition, duration, now)
            });
        }
    }

    fn entry(&self, id: &NotificationId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.unit.id() == id)
    }

    fn entry_mut(&mut self, id: &NotificationId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.unit.id() == id)
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(ToastSettings::default())
    }
}

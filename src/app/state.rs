// ABOUTME: Application state for the toast demo: the toast manager plus an activity log

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::manager::{ToastManager, ToastSettings};
use crate::notification::{NotificationType, ToastAction};

const ACTIVITY_LIMIT: usize = 50;

/// Lines shown in the main pane. Shared with action callbacks so an invoked
/// action can report what it did.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog(Rc<RefCell<VecDeque<String>>>);

impl ActivityLog {
    pub fn record(&self, line: impl Into<String>) {
        let mut lines = self.0.borrow_mut();
        lines.push_back(line.into());
        while lines.len() > ACTIVITY_LIMIT {
            lines.pop_front();
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<String> {
        self.0.borrow().back().cloned()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub toasts: ToastManager,
    pub activity: ActivityLog,
    pub should_quit: bool,
    pub help_visible: bool,
    pushed: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(ToastSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ToastSettings) -> Self {
        Self {
            toasts: ToastManager::new(settings),
            activity: ActivityLog::default(),
            should_quit: false,
            help_visible: false,
            pushed: 0,
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Shows a sample toast of the given type.
    pub fn push_demo(&mut self, kind: NotificationType, now: Instant) {
        self.pushed += 1;
        let n = self.pushed;
        let (message, action) = match kind {
            NotificationType::Default => (format!("Sync started (#{n})"), None),
            NotificationType::Success => {
                let log = self.activity.clone();
                let undo = ToastAction::new("Undo", "Undo save", move || log.record(format!("Undid save #{n}")));
                (format!("Saved draft #{n}"), Some(undo))
            }
            NotificationType::Warning => (format!("Disk almost full (#{n})"), None),
            NotificationType::Error => {
                let log = self.activity.clone();
                let retry = ToastAction::new("Retry", "Retry upload", move || log.record(format!("Retrying upload #{n}")));
                (format!("Upload #{n} failed"), Some(retry))
            }
            NotificationType::Loading => (format!("Indexing files (#{n})"), None),
        };
        let id = self.toasts.push(kind, message.clone(), action, now);
        info!("Demo toast {} pushed", id);
        self.activity.record(format!("[{}] {}", kind.as_str(), message));
    }

    pub fn dismiss_latest(&mut self, now: Instant) {
        if !self.toasts.dismiss_latest(now) {
            self.activity.record("Nothing to dismiss");
        }
    }

    pub fn invoke_focused(&mut self, now: Instant) {
        if !self.toasts.invoke_focused_action(now) {
            let hint = self.toasts.settings().shortcut;
            self.activity.record(format!("No focused action (press {hint} first)"));
        }
    }

    pub fn blur(&mut self) {
        self.toasts.blur_all();
    }

    pub fn clear_toasts(&mut self) {
        self.toasts.clear();
        self.activity.record("Cleared all toasts");
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            state: AppState::with_settings(ToastSettings::from(config)),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.state.toasts.tick(now);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

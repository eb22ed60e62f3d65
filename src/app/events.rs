// ABOUTME: Event handling system for keyboard input and app actions

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;
use crate::notification::NotificationType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    Push(NotificationType),
    DismissLatest,
    InvokeFocused,
    Blur,
    ClearAll,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            // Other control combinations belong to the toast listeners.
            return match key_event.code {
                KeyCode::Char('c') => Some(AppEvent::Quit),
                _ => None,
            };
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Esc if state.toasts.has_focused_action() => Some(AppEvent::Blur),
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('i') => Some(AppEvent::Push(NotificationType::Default)),
            KeyCode::Char('s') => Some(AppEvent::Push(NotificationType::Success)),
            KeyCode::Char('w') => Some(AppEvent::Push(NotificationType::Warning)),
            KeyCode::Char('e') => Some(AppEvent::Push(NotificationType::Error)),
            KeyCode::Char('l') => Some(AppEvent::Push(NotificationType::Loading)),
            KeyCode::Char('d' | 'x') => Some(AppEvent::DismissLatest),
            KeyCode::Enter => Some(AppEvent::InvokeFocused),
            KeyCode::Char('c') => Some(AppEvent::ClearAll),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState, now: Instant) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::Push(kind) => state.push_demo(kind, now),
            AppEvent::DismissLatest => state.dismiss_latest(now),
            AppEvent::InvokeFocused => state.invoke_focused(now),
            AppEvent::Blur => state.blur(),
            AppEvent::ClearAll => state.clear_toasts(),
        }
    }
}

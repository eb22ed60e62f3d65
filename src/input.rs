// ABOUTME: Process-wide input listener bus with scoped, self-releasing subscriptions
// Each toast registers here on mount and the returned guard deregisters on drop

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use tracing::trace;

use crate::error::ToastboxError;

/// The event kind a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    Click,
}

impl ListenerKind {
    fn accepts(self, event: &Event) -> bool {
        match (self, event) {
            (Self::KeyDown, Event::Key(key)) => key.kind == KeyEventKind::Press,
            (Self::Click, Event::Mouse(mouse)) => matches!(mouse.kind, MouseEventKind::Down(_)),
            _ => false,
        }
    }
}

type Handler = Rc<dyn Fn(&Event)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<ListenerKind, Vec<(u64, Handler)>>,
}

impl Registry {
    fn insert(&mut self, kind: ListenerKind, handler: Handler) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.listeners.entry(kind).or_default().push((id, handler));
        id
    }

    fn remove(&mut self, kind: ListenerKind, id: u64) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        before != list.len()
    }
}

/// Input dispatcher shared by every mounted toast.
///
/// Owned by the application and handed out by reference; cloning yields
/// another handle to the same registry.
#[derive(Clone, Default)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`. The listener stays registered until
    /// the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn listen(&self, kind: ListenerKind, handler: impl Fn(&Event) + 'static) -> Subscription {
        let id = self.registry.borrow_mut().insert(kind, Rc::new(handler));
        trace!("Registered {:?} listener {}", kind, id);
        Subscription {
            registry: Rc::downgrade(&self.registry),
            kind,
            id,
        }
    }

    /// Delivers `event` to every listener of the matching kind and returns
    /// how many were called.
    pub fn dispatch(&self, event: &Event) -> usize {
        // Snapshot first so handlers may drop their own subscription.
        let handlers: Vec<Handler> = {
            let registry = self.registry.borrow();
            registry
                .listeners
                .iter()
                .filter(|(kind, _)| kind.accepts(event))
                .flat_map(|(_, list)| list.iter().map(|(_, handler)| Rc::clone(handler)))
                .collect()
        };
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn dispatch_key(&self, key: KeyEvent) -> usize {
        self.dispatch(&Event::Key(key))
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for InputBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBus")
            .field("key_down", &self.listener_count(ListenerKind::KeyDown))
            .field("click", &self.listener_count(ListenerKind::Click))
            .finish()
    }
}

/// Guard for one registered listener. Dropping it removes that listener,
/// under the same kind it was registered with.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    kind: ListenerKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.borrow_mut().remove(self.kind, self.id);
            trace!("Released {:?} listener {} (found: {})", self.kind, self.id, removed);
        }
    }
}

/// A modifier + key combination, e.g. `ctrl+t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl Shortcut {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == self.code && key.modifiers.contains(self.modifiers)
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self::new(KeyModifiers::CONTROL, KeyCode::Char('t'))
    }
}

impl FromStr for Shortcut {
    type Err = ToastboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ToastboxError::InvalidShortcut(s.to_string(), reason);

        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "" => return Err(invalid("empty segment")),
                key => {
                    if code.is_some() {
                        return Err(invalid("more than one key"));
                    }
                    code = Some(parse_key(key).ok_or_else(|| invalid("unknown key"))?);
                }
            }
        }

        let mut code = code.ok_or_else(|| invalid("missing key"))?;
        if modifiers.is_empty() {
            return Err(invalid("a modifier is required"));
        }
        // Terminals report shifted letters in upper case.
        if let KeyCode::Char(c) = code {
            if modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_alphabetic() {
                code = KeyCode::Char(c.to_ascii_uppercase());
            }
        }
        Ok(Self { modifiers, code })
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

fn parse_key(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => key
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};
    use std::cell::Cell;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_dropping_subscription_releases_listener() {
        let bus = InputBus::new();
        let sub = bus.listen(ListenerKind::KeyDown, |_| {});
        assert_eq!(bus.listener_count(ListenerKind::KeyDown), 1);

        drop(sub);

        assert_eq!(bus.listener_count(ListenerKind::KeyDown), 0);
    }

    #[test]
    fn test_release_only_touches_registered_kind() {
        let bus = InputBus::new();
        let _click = bus.listen(ListenerKind::Click, |_| {});
        let key_sub = bus.listen(ListenerKind::KeyDown, |_| {});
        assert_eq!(key_sub.kind(), ListenerKind::KeyDown);

        drop(key_sub);

        assert_eq!(bus.listener_count(ListenerKind::KeyDown), 0);
        assert_eq!(bus.listener_count(ListenerKind::Click), 1);
    }

    #[test]
    fn test_dispatch_filters_by_kind() {
        let bus = InputBus::new();
        let keys = Rc::new(Cell::new(0));
        let clicks = Rc::new(Cell::new(0));
        let k = Rc::clone(&keys);
        let c = Rc::clone(&clicks);
        let _a = bus.listen(ListenerKind::KeyDown, move |_| k.set(k.get() + 1));
        let _b = bus.listen(ListenerKind::Click, move |_| c.set(c.get() + 1));

        bus.dispatch_key(key(KeyCode::Char('x'), KeyModifiers::NONE));
        bus.dispatch(&Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(keys.get(), 1);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_key_release_is_not_dispatched() {
        let bus = InputBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = bus.listen(ListenerKind::KeyDown, move |_| h.set(h.get() + 1));

        let release = KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(bus.dispatch_key(release), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = InputBus::new();
        let sub = bus.listen(ListenerKind::KeyDown, |_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_default_shortcut_is_ctrl_t() {
        let shortcut = Shortcut::default();
        assert!(shortcut.matches(&key(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert!(!shortcut.matches(&key(KeyCode::Char('t'), KeyModifiers::NONE)));
        assert!(!shortcut.matches(&key(KeyCode::Char('y'), KeyModifiers::CONTROL)));
        assert_eq!(shortcut.to_string(), "Ctrl+T");
    }

    #[test]
    fn test_parse_shortcut() {
        let parsed: Shortcut = "ctrl+t".parse().unwrap();
        assert_eq!(parsed, Shortcut::default());

        let f5: Shortcut = "Alt+F5".parse().unwrap();
        assert_eq!(f5, Shortcut::new(KeyModifiers::ALT, KeyCode::F(5)));
    }

    #[test]
    fn test_shift_letter_matches_reported_key() {
        let shortcut: Shortcut = "ctrl+shift+t".parse().unwrap();
        assert_eq!(shortcut.code, KeyCode::Char('T'));
        assert!(shortcut.matches(&key(KeyCode::Char('T'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)));
        assert!(!shortcut.matches(&key(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(shortcut.to_string(), "Ctrl+Shift+T");
    }

    #[test]
    fn test_parse_shortcut_rejects_bad_input() {
        assert!("t".parse::<Shortcut>().is_err());
        assert!("ctrl+".parse::<Shortcut>().is_err());
        assert!("ctrl+a+b".parse::<Shortcut>().is_err());
        assert!("ctrl+enterprise".parse::<Shortcut>().is_err());
    }
}

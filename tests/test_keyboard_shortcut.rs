// ABOUTME: Tests for the per-toast focus shortcut and its scoped listener registration

mod common;

use std::rc::Rc;

use common::{Call, RecordingHost};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use toastbox::input::{InputBus, ListenerKind, Shortcut};
use toastbox::toast::{ToastHost, ToastUnit};
use toastbox::{Notification, ToastAction};

fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn ctrl_t() -> KeyEvent {
    create_key_event_with_modifiers(KeyCode::Char('t'), KeyModifiers::CONTROL)
}

fn with_undo(id: &str) -> Notification {
    Notification::success(id, "Saved").with_action(ToastAction::new("Undo", "Undo save", || {}))
}

fn mount(notification: Notification, host: &Rc<RecordingHost>, input: &InputBus, shortcut: Shortcut) -> ToastUnit {
    let host: Rc<dyn ToastHost> = host.clone();
    ToastUnit::mount(notification, host, input, shortcut)
}

#[test]
fn test_shortcut_suspends_once_per_press() {
    let host = RecordingHost::new();
    let input = InputBus::new();
    let unit = mount(with_undo("t2"), &host, &input, Shortcut::default());

    input.dispatch_key(ctrl_t());
    assert!(unit.action_focused());
    assert_eq!(host.calls(), vec![Call::SuspendAutoDismiss("t2".into())]);

    input.dispatch_key(ctrl_t());
    assert_eq!(host.calls().len(), 2);
}

#[test]
fn test_shortcut_without_action_is_inert() {
    let host = RecordingHost::new();
    let input = InputBus::new();
    let unit = mount(Notification::error("t1", "Save failed"), &host, &input, Shortcut::default());

    input.dispatch_key(ctrl_t());

    assert!(!unit.action_focused());
    assert!(host.calls().is_empty());
}

#[test]
fn test_other_keys_do_not_focus() {
    let host = RecordingHost::new();
    let input = InputBus::new();
    let unit = mount(with_undo("t2"), &host, &input, Shortcut::default());

    input.dispatch_key(create_key_event_with_modifiers(KeyCode::Char('t'), KeyModifiers::NONE));
    input.dispatch_key(create_key_event_with_modifiers(KeyCode::Char('u'), KeyModifiers::CONTROL));

    assert!(!unit.action_focused());
    assert!(host.calls().is_empty());
}

#[test]
fn test_custom_shortcut() {
    let host = RecordingHost::new();
    let input = InputBus::new();
    let shortcut: Shortcut = "alt+f2".parse().unwrap();
    let unit = mount(with_undo("t5"), &host, &input, shortcut);

    input.dispatch_key(ctrl_t());
    assert!(!unit.action_focused());

    input.dispatch_key(create_key_event_with_modifiers(KeyCode::F(2), KeyModifiers::ALT));
    assert!(unit.action_focused());
}

#[test]
fn test_each_toast_scopes_its_own_listener() {
    let host = RecordingHost::new();
    let input = InputBus::new();
    let first = mount(with_undo("a"), &host, &input, Shortcut::default());
    let second = mount(with_undo("b"), &host, &input, Shortcut::default());
    assert_eq!(input.listener_count(ListenerKind::KeyDown), 2);

    drop(first);
    assert_eq!(input.listener_count(ListenerKind::KeyDown), 1);

    input.dispatch_key(ctrl_t());
    assert_eq!(host.calls(), vec![Call::SuspendAutoDismiss("b".into())]);
    assert!(second.action_focused());
}

#[test]
fn test_many_toasts_do_not_accumulate_listeners() {
    let host = RecordingHost::new();
    let input = InputBus::new();

    for n in 0..100 {
        let mut unit = mount(with_undo(&format!("toast-{n}")), &host, &input, Shortcut::default());
        unit.dismiss();
        unit.on_animation_end(toastbox::animation::AnimationEnd::of(toastbox::animation::Transition::Leave));
        assert!(!unit.has_key_listener());
    }

    assert_eq!(input.listener_count(ListenerKind::KeyDown), 0);
    assert_eq!(input.listener_count(ListenerKind::Click), 0);
}

// ABOUTME: Test UI display: toast rendering, menu bar, help text and mouse hit-testing

use std::time::{Duration, Instant};

use ratatui::{backend::TestBackend, Terminal};
use toastbox::app::App;
use toastbox::components::LayoutComponent;
use toastbox::toast::{Control, Lifecycle};
use toastbox::NotificationType;

fn draw(app: &App, layout: &mut LayoutComponent, now: Instant) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|frame| {
        layout.render(frame, &app.state, now);
    }).unwrap();

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_bottom_menu_bar_lists_toast_keys() {
    let app = App::new();
    let mut layout = LayoutComponent::default();

    let content = draw(&app, &mut layout, Instant::now());

    assert!(content.contains("[s]uccess"), "Menu bar should list '[s]uccess'");
    assert!(content.contains("[d]ismiss"), "Menu bar should list '[d]ismiss'");
    assert!(content.contains("[?]help"), "Should contain '[?]help'");
    assert!(content.contains("[q]uit"), "Should contain '[q]uit'");
}

#[test]
fn test_help_screen_shows_focus_shortcut() {
    let mut app = App::new();
    app.state.help_visible = true;
    let mut layout = LayoutComponent::default();

    let content = draw(&app, &mut layout, Instant::now());

    assert!(content.contains("Ctrl+T"), "Help should name the focus shortcut");
    assert!(content.contains("Toast Actions:"), "Should contain 'Toast Actions:' section");
    assert!(content.contains("General:"), "Should contain 'General:' section");
}

#[test]
fn test_visible_toast_shows_message_action_and_close() {
    let t0 = Instant::now();
    let mut app = App::new();
    app.state.push_demo(NotificationType::Success, t0);
    app.tick(t0 + Duration::from_millis(400));
    let mut layout = LayoutComponent::default();

    let content = draw(&app, &mut layout, t0 + Duration::from_millis(400));

    assert!(content.contains("Saved draft #1"), "Toast message should be drawn");
    assert!(content.contains("Undo"), "Action control should be drawn");
    assert!(content.contains("✕"), "Close control should be drawn");
}

#[test]
fn test_toast_without_action_has_no_action_hit_area() {
    let t0 = Instant::now();
    let mut app = App::new();
    app.state.push_demo(NotificationType::Warning, t0);
    app.tick(t0 + Duration::from_millis(400));
    let mut layout = LayoutComponent::default();
    let content = draw(&app, &mut layout, t0 + Duration::from_millis(400));
    assert!(content.contains("Disk almost full"));

    let hits: Vec<_> = (0..120u16)
        .flat_map(|x| (0..40u16).map(move |y| (x, y)))
        .filter_map(|(x, y)| layout.hit_test(x, y))
        .collect();

    assert!(hits.iter().all(|(_, control)| *control == Control::Close));
    assert!(!hits.is_empty());
}

#[test]
fn test_click_on_action_runs_undo() {
    let t0 = Instant::now();
    let later = t0 + Duration::from_millis(400);
    let mut app = App::new();
    app.state.push_demo(NotificationType::Success, t0);
    app.tick(later);
    let mut layout = LayoutComponent::default();
    draw(&app, &mut layout, later);

    let target = (0..120u16)
        .flat_map(|x| (0..40u16).map(move |y| (x, y)))
        .find_map(|(x, y)| layout.hit_test(x, y).filter(|(_, control)| *control == Control::Action));
    let (id, control) = target.expect("action should be clickable");

    assert!(app.state.toasts.click(&id, control, later));

    assert_eq!(app.state.activity.last().as_deref(), Some("Undid save #1"));
    assert_eq!(app.state.toasts.get(&id).map(|u| u.lifecycle()), Some(Lifecycle::Leaving));

    app.tick(later + Duration::from_millis(300));
    assert!(app.state.toasts.is_empty());
}

#[test]
fn test_toast_fully_offscreen_at_enter_start() {
    let t0 = Instant::now();
    let mut app = App::new();
    app.state.push_demo(NotificationType::Error, t0);
    let mut layout = LayoutComponent::default();

    let content = draw(&app, &mut layout, t0);

    // Only the activity line; the toast itself has not slid in yet.
    assert_eq!(content.matches("Upload #1 failed").count(), 1);
    let any_hit = (0..120u16)
        .flat_map(|x| (0..40u16).map(move |y| (x, y)))
        .any(|(x, y)| layout.hit_test(x, y).is_some());
    assert!(!any_hit);
}

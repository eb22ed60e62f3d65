// ABOUTME: Draws a single toast view and reports where its clickable controls landed

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, Paragraph,
    },
};

use crate::icons::IconTable;
use crate::manager::ToastFrame;

pub const TOAST_HEIGHT: u16 = 3;
const CLOSE_GLYPH: &str = " ✕ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastHitAreas {
    pub action: Option<Rect>,
    pub close: Rect,
}

pub struct ToastComponent {
    icons: IconTable,
}

impl ToastComponent {
    pub fn new(icons: IconTable) -> Self {
        Self { icons }
    }

    /// Renders `toast` into `slot`, shifted by its transition offset.
    /// Returns `None` when the toast is entirely off-screen.
    pub fn render(&self, frame: &mut Frame, slot: Rect, toast: &ToastFrame) -> Option<ToastHitAreas> {
        let offset = toast
            .view
            .transition
            .map_or(0, |transition| transition.offset(slot.width, toast.progress));
        let visible_width = i32::from(slot.width) + offset;
        if visible_width <= 2 {
            return None;
        }
        let area = Rect {
            width: u16::try_from(visible_width).unwrap_or(slot.width),
            ..slot
        };

        let icon = self.icons.icon_for(toast.view.notification_type);
        let label_style = Style::default().fg(Color::DarkGray);
        // Role on top, close label and any focused action's label underneath.
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(icon.color))
            .title(Span::styled(format!(" {} ", toast.view.role.as_str()), label_style))
            .title(
                Title::from(Span::styled(format!(" {} ", toast.view.close_label), label_style))
                    .position(Position::Bottom)
                    .alignment(Alignment::Right),
            );
        if let Some(action) = toast.view.action.as_ref().filter(|a| a.focused) {
            block = block.title(
                Title::from(Span::styled(format!(" {} ", action.aria_label), label_style))
                    .position(Position::Bottom)
                    .alignment(Alignment::Left),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let mut spans = vec![
            Span::styled(icon.glyph, Style::default().fg(icon.color)),
            Span::raw(" "),
            Span::styled(toast.view.message.clone(), Style::default().fg(Color::White)),
        ];
        let mut action_area = None;
        if let Some(action) = &toast.view.action {
            spans.push(Span::raw("  "));
            let prefix_width: usize = spans.iter().map(Span::width).sum();
            let mut style = Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD);
            if action.focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let label = Span::styled(action.text.clone(), style);
            action_area = clip(chunks[0], prefix_width, label.width());
            spans.push(label);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

        frame.render_widget(
            Paragraph::new(CLOSE_GLYPH).style(Style::default().fg(Color::Gray)),
            chunks[1],
        );

        Some(ToastHitAreas {
            action: action_area,
            close: chunks[1],
        })
    }
}

/// The part of `area`'s first row spanning `[start, start + width)`.
fn clip(area: Rect, start: usize, width: usize) -> Option<Rect> {
    let start = u16::try_from(start).ok()?;
    if start >= area.width || width == 0 || area.height == 0 {
        return None;
    }
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width - start);
    Some(Rect::new(area.x + start, area.y, width, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationId, NotificationType};
    use crate::toast::{ActionControl, Lifecycle, Role, ToastView};
    use ratatui::{backend::TestBackend, Terminal};

    fn toast_frame(role: Role, focused: bool) -> ToastFrame {
        ToastFrame {
            view: ToastView {
                id: NotificationId::from("t2"),
                role,
                lifecycle: Lifecycle::Visible,
                transition: None,
                notification_type: NotificationType::Success,
                message: "Saved".to_string(),
                action: Some(ActionControl {
                    text: "Undo".to_string(),
                    aria_label: "Undo save".to_string(),
                    focused,
                }),
                close_label: "Dismiss",
            },
            progress: 1.0,
        }
    }

    fn draw(toast: &ToastFrame) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| {
                ToastComponent::new(IconTable::default()).render(frame, Rect::new(0, 0, 40, 3), toast);
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_border_shows_role_and_close_label() {
        let content = draw(&toast_frame(Role::Alert, false));
        assert!(content.contains("alert"));
        assert!(content.contains("Dismiss"));
        assert!(!content.contains("Undo save"));
    }

    #[test]
    fn test_focused_action_shows_its_label() {
        let content = draw(&toast_frame(Role::Status, true));
        assert!(content.contains("status"));
        assert!(content.contains("Undo save"));
    }

    #[test]
    fn test_clip_inside_area() {
        let area = Rect::new(2, 5, 20, 1);
        assert_eq!(clip(area, 4, 6), Some(Rect::new(6, 5, 6, 1)));
    }

    #[test]
    fn test_clip_truncates_at_edge() {
        let area = Rect::new(0, 0, 10, 1);
        assert_eq!(clip(area, 8, 6), Some(Rect::new(8, 0, 2, 1)));
        assert_eq!(clip(area, 10, 2), None);
    }
}

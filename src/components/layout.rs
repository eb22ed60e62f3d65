// ABOUTME: Main layout component: activity pane, bottom menu bar and the toast stack
// Remembers where toast controls were drawn so mouse clicks can be routed back to them

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    style::{Color, Style},
};

use crate::app::AppState;
use crate::icons::IconTable;
use crate::notification::NotificationId;
use crate::toast::Control;
use super::{HelpComponent, ToastComponent, TOAST_HEIGHT};

const TOAST_MAX_WIDTH: u16 = 56;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitArea {
    pub id: NotificationId,
    pub control: Control,
    pub area: Rect,
}

pub struct LayoutComponent {
    toast: ToastComponent,
    help: HelpComponent,
    hit_areas: Vec<HitArea>,
}

impl LayoutComponent {
    pub fn new(icons: IconTable) -> Self {
        Self {
            toast: ToastComponent::new(icons),
            help: HelpComponent::new(),
            hit_areas: Vec::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState, now: Instant) {
        let size = frame.size();
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),     // Activity + toasts
                Constraint::Length(3),  // Bottom menu bar
            ])
            .split(size);

        self.render_activity(frame, main_chunks[0], state);
        self.render_toasts(frame, main_chunks[0], state, now);
        self.render_menu_bar(frame, main_chunks[1]);

        if state.help_visible {
            self.help.render(frame, size, state.toasts.settings().shortcut);
        }
    }

    /// The toast control under a mouse position, from the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(NotificationId, Control)> {
        self.hit_areas
            .iter()
            .rev()
            .find(|hit| {
                let a = hit.area;
                (a.x..a.right()).contains(&column) && (a.y..a.bottom()).contains(&row)
            })
            .map(|hit| (hit.id.clone(), hit.control))
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = state.activity.lines();
        let capacity = usize::from(area.height.saturating_sub(2));
        let items: Vec<ListItem> = lines
            .iter()
            .skip(lines.len().saturating_sub(capacity))
            .map(|line| ListItem::new(line.as_str()))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Activity")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(list, area);
    }

    fn render_toasts(&mut self, frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
        self.hit_areas.clear();
        let width = TOAST_MAX_WIDTH.min(area.width.saturating_sub(2));
        let mut bottom = area.bottom().saturating_sub(1);

        // Newest sits at the bottom of the stack.
        for toast in state.toasts.frames(now).iter().rev() {
            if bottom < area.y + 1 + TOAST_HEIGHT {
                break;
            }
            bottom -= TOAST_HEIGHT;
            let slot = Rect::new(area.x + 1, bottom, width, TOAST_HEIGHT);
            let Some(hits) = self.toast.render(frame, slot, toast) else {
                continue;
            };
            self.hit_areas.push(HitArea {
                id: toast.view.id.clone(),
                control: Control::Close,
                area: hits.close,
            });
            if let Some(action) = hits.action {
                self.hit_areas.push(HitArea {
                    id: toast.view.id.clone(),
                    control: Control::Action,
                    area: action,
                });
            }
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let menu_text = "[i]nfo [s]uccess [w]arning [e]rror [l]oading [d]ismiss [Enter]action [c]lear [?]help [q]uit";

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new(IconTable::default())
    }
}

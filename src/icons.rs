// ABOUTME: Icon-selection table mapping notification types to a glyph and colour
// Pure configuration data; nothing here changes toast behaviour

use std::collections::HashMap;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::notification::NotificationType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub glyph: String,
    pub color: Color,
}

impl Icon {
    fn new(glyph: &str, color: Color) -> Self {
        Self {
            glyph: glyph.to_string(),
            color,
        }
    }
}

/// User override for one entry, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconOverride {
    pub glyph: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IconTable {
    icons: HashMap<NotificationType, Icon>,
}

impl Default for IconTable {
    fn default() -> Self {
        let info = Icon::new("ℹ", Color::Blue);
        let success = Icon::new("✔", Color::Green);
        let warning = Icon::new("⚠", Color::Yellow);
        let error = Icon::new("✖", Color::Red);

        let mut icons = HashMap::new();
        icons.insert(NotificationType::Default, info);
        icons.insert(NotificationType::Success, success);
        icons.insert(NotificationType::Warning, warning);
        // Loading shares the error icon until a dedicated one is chosen.
        icons.insert(NotificationType::Loading, error.clone());
        icons.insert(NotificationType::Error, error);
        Self { icons }
    }
}

impl IconTable {
    pub fn with_overrides(overrides: &HashMap<NotificationType, IconOverride>) -> Self {
        let mut table = Self::default();
        for (kind, entry) in overrides {
            table.apply(*kind, entry);
        }
        table
    }

    pub fn apply(&mut self, kind: NotificationType, entry: &IconOverride) {
        let icon = self.icons.entry(kind).or_insert_with(|| Icon::new("•", Color::White));
        if let Some(glyph) = &entry.glyph {
            icon.glyph.clone_from(glyph);
        }
        if let Some(color) = &entry.color {
            match Color::from_str(color) {
                Ok(parsed) => icon.color = parsed,
                Err(_) => warn!("Ignoring unknown colour '{}' for {} icon", color, kind.as_str()),
            }
        }
    }

    pub fn icon_for(&self, kind: NotificationType) -> Icon {
        self.icons
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Icon::new("•", Color::White))
    }
}

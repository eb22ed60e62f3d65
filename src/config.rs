// ABOUTME: User configuration loaded from config.toml
// Timing, the focus shortcut, stack size and icon overrides

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::icons::{IconOverride, IconTable};
use crate::input::Shortcut;
use crate::notification::NotificationType;

const CONFIG_FILE: &str = "config.toml";
const APP_NAME: &str = "toastbox";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Auto-dismiss delay; 0 keeps toasts until dismissed.
    pub auto_dismiss_ms: u64,
    pub enter_ms: u64,
    pub leave_ms: u64,
    pub focus_shortcut: String,
    pub tick_rate_ms: u64,
    pub max_visible: usize,
    pub icons: HashMap<NotificationType, IconOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 5000,
            enter_ms: 300,
            leave_ms: 300,
            focus_shortcut: "ctrl+t".to_string(),
            tick_rate_ms: 50,
            max_visible: 5,
            icons: HashMap::new(),
        }
    }
}

impl Config {
    pub fn auto_dismiss(&self) -> Option<Duration> {
        (self.auto_dismiss_ms > 0).then(|| Duration::from_millis(self.auto_dismiss_ms))
    }

    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn leave_duration(&self) -> Duration {
        Duration::from_millis(self.leave_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn shortcut(&self) -> Result<Shortcut> {
        self.focus_shortcut.parse()
    }

    pub fn icon_table(&self) -> IconTable {
        IconTable::with_overrides(&self.icons)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads from the default location, falling back to defaults when absent.
pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    if let Err(e) = config.shortcut() {
        warn!("{}; the default shortcut will be used", e);
    }
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

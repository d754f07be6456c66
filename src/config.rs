use crate::events::AppEvent;
use crate::menu::{ItemLabel, Metrics, Position};
use crate::sys::wm::{ShellCommand, WindowClass};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Command that opens the config file instead of running anything.
pub const SETUP_COMMAND: &str = "ROSETTE_SETUP";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub label: ItemLabel,
    pub position: Option<Position>,
    pub exec: Option<ShellCommand>,
    pub class: Option<WindowClass>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub draw_cursor_line: bool,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            draw_cursor_line: false,
            items: Vec::new(),
        }
    }
}

impl Config {
    pub fn metrics(&self) -> Metrics {
        if self.scale.is_finite() && self.scale > 0.0 {
            Metrics::new(self.scale)
        } else {
            log::warn!("Ignoring invalid scale {}, using 1.0", self.scale);
            Metrics::default()
        }
    }

    fn setup() -> Self {
        Self {
            items: vec![ItemConfig {
                label: ItemLabel::new("Setup"),
                position: Some(Position::North),
                exec: Some(ShellCommand::new(SETUP_COMMAND)),
                class: None,
            }],
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "rosette").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ROSETTE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("No config at {}, showing setup menu", path.display());
        return Config::setup();
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config: {}", e);
        Config::setup()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

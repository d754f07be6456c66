use crate::menu::Point;
use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::{Clients, CursorPosition, Monitors};
use hyprland::dispatch::{Dispatch, DispatchType, WindowIdentifier};
use hyprland::error::HyprError;
use hyprland::prelude::*;
use hyprland::shared::Address;
use serde::{Deserialize, Serialize};
use std::process::{Child, Command, Stdio};
use std::thread;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct WindowClass(String);

impl_string_newtype!(WindowClass);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct MonitorName(String);

impl_string_newtype!(MonitorName);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ShellCommand(String);

impl_string_newtype!(ShellCommand);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("empty command")]
    EmptyCommand,
    #[error(transparent)]
    Hypr(#[from] HyprError),
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: ShellCommand,
        #[source]
        source: std::io::Error,
    },
}

pub fn get_active_monitor() -> Option<MonitorName> {
    Monitors::get()
        .ok()?
        .into_iter()
        .find(|m| m.focused)
        .map(|m| MonitorName(m.name))
}

pub fn get_cursor_pos_on_active_monitor() -> Option<Point> {
    let cursor = CursorPosition::get().ok()?;
    let monitors = Monitors::get().ok()?;
    let focused = monitors.into_iter().find(|m| m.focused)?;

    let x = cursor.x as f64 - focused.x as f64;
    let y = cursor.y as f64 - focused.y as f64;

    Some(Point::new(x, y))
}

pub fn focus_window(address: &Address) -> Result<(), HyprError> {
    Dispatch::call(DispatchType::FocusWindow(WindowIdentifier::Address(
        address.clone(),
    )))
}

/// Starts `command` without waiting for it. The child is reaped on a
/// detached thread once it exits.
pub fn launch(mut command: Command) -> std::io::Result<()> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    reap(child);
    Ok(())
}

fn reap(mut child: Child) {
    let pid = child.id();
    let spawned = thread::Builder::new()
        .name(format!("reap-{}", pid))
        .spawn(move || match child.wait() {
            Ok(status) => log::debug!("Process {} exited with {}", pid, status),
            Err(e) => log::warn!("Failed to wait for process {}: {}", pid, e),
        });
    if let Err(e) = spawned {
        log::warn!("Failed to start reaper for process {}: {}", pid, e);
    }
}

pub fn spawn(exec: &ShellCommand) -> Result<(), LaunchError> {
    if exec.trim().is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    let mut command = Command::new("sh");
    command.arg("-c").arg(&exec.0);
    launch(command).map_err(|source| LaunchError::Spawn {
        command: exec.clone(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchScore {
    Component,
    Exact,
}

fn match_score(window_class: &str, class: &WindowClass) -> Option<MatchScore> {
    if window_class.eq_ignore_ascii_case(class) {
        Some(MatchScore::Exact)
    } else if window_class
        .split('.')
        .any(|part| part.eq_ignore_ascii_case(class))
    {
        Some(MatchScore::Component)
    } else {
        None
    }
}

/// Picks the window whose class best matches `class`, ignoring case. An
/// exact match beats a match on one dot-separated component.
fn best_match<T>(
    windows: impl IntoIterator<Item = (String, T)>,
    class: &WindowClass,
) -> Option<T> {
    windows
        .into_iter()
        .filter_map(|(window_class, window)| {
            match_score(&window_class, class).map(|score| (score, window))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, window)| window)
}

/// Focuses a window of `class` if one exists, otherwise runs `exec`.
pub fn run_or_raise(class: &WindowClass, exec: &ShellCommand) -> Result<(), LaunchError> {
    let clients = Clients::get()?
        .into_iter()
        .map(|c| (c.class, c.address));
    match best_match(clients, class) {
        Some(address) => {
            focus_window(&address)?;
            Ok(())
        }
        None => spawn(exec),
    }
}

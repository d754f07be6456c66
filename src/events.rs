#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Show,
    Hide,
    Cancel,
    ConfigReload,
}

impl AppEvent {
    /// Parses a control socket command.
    pub fn from_command(line: &str) -> Option<Self> {
        match line.trim() {
            "show" => Some(Self::Show),
            "hide" => Some(Self::Hide),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

use crate::api::ConfigEntry;

/// Text shown in the edit panel when nothing is selected.
pub const NO_SELECTION: &str = "No entry selected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// Suffix of the `status--*` CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// The status line at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn idle() -> Self {
        Self::new(StatusKind::Idle, "")
    }
}

/// Result of the last single-key lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Lookup {
    #[default]
    Empty,
    Found(ConfigEntry),
    Failed(String),
}

/// Raw form field contents, echoed back into the page on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub env: String,
    pub key: String,
    pub value: String,
    pub lookup_key: String,
}

/// Everything the page is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    /// Environment of the current listing; empty until one is chosen.
    pub env: String,
    /// Snapshot from the last successful list call.
    pub configs: Vec<ConfigEntry>,
    pub selected_key: Option<String>,
    pub edit_state: String,
    pub inputs: Inputs,
    pub lookup: Lookup,
    pub status: Status,
    /// Key waiting for the user to confirm its deletion.
    pub pending_delete: Option<String>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            env: String::new(),
            configs: Vec::new(),
            selected_key: None,
            edit_state: NO_SELECTION.to_string(),
            inputs: Inputs::default(),
            lookup: Lookup::Empty,
            status: Status::idle(),
            pending_delete: None,
        }
    }
}

impl ConsoleState {
    pub fn env_label(&self) -> String {
        if self.env.is_empty() {
            "No environment selected".to_string()
        } else {
            format!("Environment: {}", self.env)
        }
    }

    pub fn count_label(&self) -> String {
        format!("{} entries", self.configs.len())
    }

    pub fn find(&self, key: &str) -> Option<&ConfigEntry> {
        self.configs.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_labels() {
        let state = ConsoleState::default();
        assert_eq!(state.env_label(), "No environment selected");
        assert_eq!(state.count_label(), "0 entries");
        assert_eq!(state.edit_state, NO_SELECTION);
        assert_eq!(state.status.kind, StatusKind::Idle);
    }

    #[test]
    fn labels_follow_state() {
        let state = ConsoleState {
            env: "prod".to_string(),
            configs: vec![ConfigEntry::new("a", "b"), ConfigEntry::new("c", "d")],
            ..ConsoleState::default()
        };
        assert_eq!(state.env_label(), "Environment: prod");
        assert_eq!(state.count_label(), "2 entries");
        assert_eq!(state.find("c").map(|c| c.value.as_str()), Some("d"));
        assert!(state.find("z").is_none());
    }
}

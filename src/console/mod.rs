//! View/controller for the console page.
//!
//! [`Console`] owns the page state and runs every user action against the
//! [`ConfigApi`]. Each remote action moves the status line to `loading`
//! first and to `success` or `error` once the call returns. After a
//! successful mutation the list is reloaded silently so the table reflects
//! the service.
pub mod assets;
pub mod render;
pub mod state;

use std::time::Instant;

use crate::activity::{ActivityEntry, ActivityLog, Outcome};
use crate::api::{ApiError, ConfigApi, Transport};

pub use state::{ConsoleState, Inputs, Lookup, NO_SELECTION, Status, StatusKind};

/// Page controller: state + client + activity log.
#[derive(Debug)]
pub struct Console<T> {
    api: ConfigApi<T>,
    state: ConsoleState,
    log: ActivityLog,
}

impl<T: Transport> Console<T> {
    pub fn new(api: ConfigApi<T>, log: ActivityLog) -> Self {
        Self {
            api,
            state: ConsoleState::default(),
            log,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn api(&self) -> &ConfigApi<T> {
        &self.api
    }

    /// The typed field values the page is re-rendered with.
    pub fn inputs_mut(&mut self) -> &mut Inputs {
        &mut self.state.inputs
    }

    /// Render the page from the current state.
    pub fn render(&self) -> String {
        render::render_page(&self.state, self.api.base_label())
    }

    // -----------------------------------------------------------------------
    // Status helpers
    // -----------------------------------------------------------------------

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.state.status = Status::new(kind, message);
    }

    /// Record a local validation failure: error status, no request sent.
    fn reject(&mut self, action: &str, message: &str) {
        self.set_status(StatusKind::Error, message);
        self.log
            .record(&ActivityEntry::new(action, Outcome::Rejected, message));
    }

    fn set_env(&mut self, value: &str) {
        self.state.env = value.to_string();
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Probe `/health` and report reachability.
    pub fn check_backend(&mut self) {
        self.set_status(StatusKind::Loading, "Checking API...");
        let start = Instant::now();
        let result = self.api.health();
        let latency = elapsed_ms(start);

        match result {
            Ok(_) => {
                self.set_status(StatusKind::Success, "API is reachable.");
                self.log.record(
                    &ActivityEntry::new("health", Outcome::Success, "API is reachable.")
                        .with_latency(latency),
                );
            }
            Err(err) => {
                let message = format!(
                    "Failed to fetch. Is the config service running at {}?",
                    self.api.base_label()
                );
                self.set_status(StatusKind::Error, message);
                self.log.record(
                    &ActivityEntry::new("health", Outcome::Error, &err.to_string())
                        .with_latency(latency),
                );
            }
        }
    }

    /// Environment form submit: adopt the typed environment and list it.
    pub fn submit_env(&mut self, env_input: &str) {
        self.state.inputs.env = env_input.to_string();
        let env = env_input.trim();
        if env.is_empty() {
            self.reject("list", "Environment is required.");
            return;
        }

        self.set_env(env);
        self.load_configs(false);
    }

    /// Refresh button: adopt the typed environment if any, then reload.
    pub fn refresh(&mut self, env_input: &str) {
        self.state.inputs.env = env_input.to_string();
        let env = env_input.trim();
        if !env.is_empty() {
            self.set_env(env);
        }
        self.load_configs(false);
    }

    /// Reload the list for the current environment.
    ///
    /// A silent load shows neither the loading nor the success status; errors
    /// are always shown.
    pub fn load_configs(&mut self, silent: bool) {
        if self.state.env.is_empty() {
            self.reject("list", "Environment is required.");
            return;
        }

        if !silent {
            self.set_status(StatusKind::Loading, "Loading configs...");
        }

        let env = self.state.env.clone();
        let start = Instant::now();
        let result = self.api.list_configs(&env);
        let latency = elapsed_ms(start);

        match result {
            Ok(configs) => {
                self.state.configs = configs;
                let message = format!("Loaded {} entries.", self.state.configs.len());
                if !silent {
                    self.set_status(StatusKind::Success, message.clone());
                }
                self.log.record(
                    &ActivityEntry::new("list", Outcome::Success, &message)
                        .with_env(&env)
                        .with_latency(latency),
                );
            }
            Err(err) => {
                let message = message_or(&err, "Failed to load configs.");
                self.set_status(StatusKind::Error, message.clone());
                self.log.record(
                    &ActivityEntry::new("list", Outcome::Error, &message)
                        .with_env(&env)
                        .with_latency(latency),
                );
            }
        }
    }

    pub fn create(&mut self, env_input: &str, key_input: &str, value: &str) {
        self.write(WriteKind::Create, env_input, key_input, value);
    }

    pub fn update(&mut self, env_input: &str, key_input: &str, value: &str) {
        self.write(WriteKind::Update, env_input, key_input, value);
    }

    fn write(&mut self, kind: WriteKind, env_input: &str, key_input: &str, value: &str) {
        self.state.inputs.env = env_input.to_string();
        self.state.inputs.key = key_input.to_string();
        self.state.inputs.value = value.to_string();

        let env = env_input.trim().to_string();
        let key = key_input.trim().to_string();
        if env.is_empty() || key.is_empty() {
            self.reject(kind.action(), "Environment and key are required.");
            return;
        }

        self.set_env(&env);
        self.set_status(StatusKind::Loading, kind.progress());

        let start = Instant::now();
        let result = match kind {
            WriteKind::Create => self.api.create_config(&env, &key, value),
            WriteKind::Update => self.api.update_config(&env, &key, value),
        };
        let latency = elapsed_ms(start);

        match result {
            Ok(()) => {
                self.state.selected_key = Some(key.clone());
                self.load_configs(true);
                let message = format!("{} {key}.", kind.done());
                self.set_status(StatusKind::Success, message.clone());
                self.log.record(
                    &ActivityEntry::new(kind.action(), Outcome::Success, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
            Err(err) => {
                let message = message_or(&err, kind.failed());
                self.set_status(StatusKind::Error, message.clone());
                self.log.record(
                    &ActivityEntry::new(kind.action(), Outcome::Error, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
        }
    }

    /// Row "Select": copy the entry into the editor.
    pub fn select(&mut self, key: &str) {
        let Some(entry) = self.state.find(key).cloned() else {
            self.set_status(
                StatusKind::Error,
                format!("Key \"{key}\" is not in the current list."),
            );
            return;
        };

        self.state.inputs.key = entry.key.clone();
        self.state.inputs.value = entry.value;
        self.state.edit_state = format!("Selected key: {}", entry.key);
        self.state.selected_key = Some(entry.key);
    }

    /// Row "Delete": ask for confirmation before anything is sent.
    pub fn request_delete(&mut self, key: &str) {
        if self.state.env.is_empty() {
            self.reject("delete", "Set environment before deleting.");
            return;
        }
        self.state.pending_delete = Some(key.to_string());
    }

    /// Answer to the delete prompt. Declining leaves everything unchanged.
    pub fn resolve_delete(&mut self, confirmed: bool) {
        let Some(key) = self.state.pending_delete.take() else {
            return;
        };
        if !confirmed {
            return;
        }

        let env = self.state.env.clone();
        self.set_status(StatusKind::Loading, "Deleting...");

        let start = Instant::now();
        let result = self.api.delete_config(&env, &key);
        let latency = elapsed_ms(start);

        match result {
            Ok(()) => {
                if self.state.selected_key.as_deref() == Some(key.as_str()) {
                    self.reset_editor();
                }
                self.load_configs(true);
                let message = format!("Deleted {key}.");
                self.set_status(StatusKind::Success, message.clone());
                self.log.record(
                    &ActivityEntry::new("delete", Outcome::Success, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
            Err(err) => {
                let message = message_or(&err, "Delete failed.");
                self.set_status(StatusKind::Error, message.clone());
                self.log.record(
                    &ActivityEntry::new("delete", Outcome::Error, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
        }
    }

    /// "Clear" / "Clear selection": empty the editor and the status line.
    pub fn clear_editor(&mut self) {
        self.reset_editor();
        self.state.status = Status::idle();
    }

    fn reset_editor(&mut self) {
        self.state.inputs.key.clear();
        self.state.inputs.value.clear();
        self.state.selected_key = None;
        self.state.edit_state = NO_SELECTION.to_string();
    }

    /// Look up a single key in the typed environment.
    pub fn lookup(&mut self, env_input: &str, key_input: &str) {
        self.state.inputs.env = env_input.to_string();
        self.state.inputs.lookup_key = key_input.to_string();

        let env = env_input.trim().to_string();
        let key = key_input.trim().to_string();
        if env.is_empty() || key.is_empty() {
            self.reject("lookup", "Environment and key are required for lookup.");
            return;
        }

        self.set_env(&env);
        self.set_status(StatusKind::Loading, "Finding key...");

        let start = Instant::now();
        let result = self.api.get_config(&env, &key);
        let latency = elapsed_ms(start);

        match result {
            Ok(found) => {
                self.state.lookup = found.map_or(Lookup::Empty, Lookup::Found);
                let message = format!("Found {key}.");
                self.set_status(StatusKind::Success, message.clone());
                self.log.record(
                    &ActivityEntry::new("lookup", Outcome::Success, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
            Err(err) => {
                self.state.lookup = Lookup::Failed(message_or(&err, "Not found."));
                let message = message_or(&err, "Lookup failed.");
                self.set_status(StatusKind::Error, message.clone());
                self.log.record(
                    &ActivityEntry::new("lookup", Outcome::Error, &message)
                        .with_env(&env)
                        .with_key(&key)
                        .with_latency(latency),
                );
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    fn action(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }

    fn progress(self) -> &'static str {
        match self {
            Self::Create => "Creating...",
            Self::Update => "Updating...",
        }
    }

    fn done(self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Self::Create => "Create failed.",
            Self::Update => "Update failed.",
        }
    }
}

/// The error's message, or `fallback` when it is empty.
fn message_or(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

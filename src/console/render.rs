//! Server-side rendering of the console page.
//!
//! The page is a pure function of [`ConsoleState`]. The environment, editor
//! and table share `#console-form`; each button posts to its own action route
//! via `formaction`. The lookup controls belong to `#lookup-form` through the
//! `form` attribute, so Enter in the lookup field runs a lookup.
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use super::assets::STYLESHEET;
use super::state::{ConsoleState, Lookup};
use crate::api::ConfigEntry;

/// Format a service timestamp for display in the local time zone.
pub fn format_updated_at(value: Option<&str>) -> String {
    format_updated_at_in(value, &Local)
}

/// Format a service timestamp in `tz`.
///
/// Missing or empty → `-`; RFC 3339 → `dd.mm.yyyy, HH:MM`; anything else is
/// shown as sent.
pub fn format_updated_at_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format("%d.%m.%Y, %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the whole page.
pub fn render_page(state: &ConsoleState, api_label: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Config Console</title>
<style>{style}</style>
</head>
<body>
<div class="app">
<header>
  <h1>Config Console</h1>
  <span class="api-base">API: <span id="api-base">{api_label}</span></span>
</header>
<div id="status" class="status status--{status_kind}">{status_message}</div>
<form id="console-form" method="post" action="/env">
{environment}
{editor}
{lookup}
{table}
</form>
<form id="lookup-form" method="post" action="/lookup"></form>
</div>
{confirm}
</body>
</html>
"#,
        style = STYLESHEET,
        api_label = html_escape(api_label),
        status_kind = state.status.kind.as_str(),
        status_message = html_escape(&state.status.message),
        environment = render_environment(state),
        editor = render_editor(state),
        lookup = render_lookup(state),
        table = render_table(state),
        confirm = render_confirm(state),
    )
}

fn render_environment(state: &ConsoleState) -> String {
    format!(
        r#"<section class="panel">
  <h2>Environment</h2>
  <div class="row">
    <input id="env-input" name="env" placeholder="prod" value="{env}">
    <button class="btn btn-primary" type="submit" formaction="/env">Load</button>
    <button id="refresh-btn" class="btn" type="submit" formaction="/refresh">Refresh</button>
    <button class="btn" type="submit" formaction="/health-check">Check API</button>
  </div>
  <p class="muted"><span id="env-label">{env_label}</span> · <span id="count-label">{count_label}</span></p>
</section>"#,
        env = html_escape(&state.inputs.env),
        env_label = html_escape(&state.env_label()),
        count_label = state.count_label(),
    )
}

fn render_editor(state: &ConsoleState) -> String {
    format!(
        r#"<section class="panel">
  <h2>Entry</h2>
  <div class="row">
    <input id="key-input" name="key" placeholder="key" value="{key}" onkeydown="if (event.key === 'Enter') event.preventDefault()">
    <span id="edit-state" class="muted">{edit_state}</span>
  </div>
  <textarea id="value-input" name="value" placeholder="value">{value}</textarea>
  <div class="row">
    <button id="create-btn" class="btn btn-primary" type="submit" formaction="/entries/create">Create</button>
    <button id="update-btn" class="btn" type="submit" formaction="/entries/update">Update</button>
    <button id="clear-btn" class="btn" type="submit" formaction="/editor/clear">Clear</button>
  </div>
</section>"#,
        key = html_escape(&state.inputs.key),
        edit_state = html_escape(&state.edit_state),
        value = html_escape(&state.inputs.value),
    )
}

fn render_lookup(state: &ConsoleState) -> String {
    let (value, meta) = match &state.lookup {
        Lookup::Empty => ("No lookup yet.".to_string(), String::new()),
        Lookup::Found(entry) => (
            format!("{} = {}", entry.key, entry.value),
            format!(
                "Updated: {}",
                format_updated_at(entry.updated_at.as_deref())
            ),
        ),
        Lookup::Failed(message) => (message.clone(), String::new()),
    };

    format!(
        r#"<section class="panel">
  <h2>Lookup</h2>
  <div class="row">
    <input type="hidden" name="env" form="lookup-form" value="{env}">
    <input id="lookup-input" name="lookup_key" form="lookup-form" placeholder="key" value="{lookup_key}">
    <button class="btn" type="submit" form="lookup-form">Find</button>
  </div>
  <p id="lookup-value"><code>{value}</code></p>
  <p id="lookup-meta" class="muted">{meta}</p>
</section>"#,
        env = html_escape(&state.inputs.env),
        lookup_key = html_escape(&state.inputs.lookup_key),
        value = html_escape(&value),
        meta = html_escape(&meta),
    )
}

fn render_table(state: &ConsoleState) -> String {
    let rows = if state.configs.is_empty() {
        r#"<tr><td colspan="4" class="empty">No configs in this environment.</td></tr>"#
            .to_string()
    } else {
        state
            .configs
            .iter()
            .map(render_row)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<section class="panel">
  <div class="row">
    <h2>Entries</h2>
    <button id="clear-selection-btn" class="btn" type="submit" formaction="/editor/clear">Clear selection</button>
  </div>
  <table>
    <thead><tr><th>Key</th><th>Value</th><th>Updated</th><th></th></tr></thead>
    <tbody id="config-list">
{rows}
    </tbody>
  </table>
</section>"#
    )
}

fn render_row(entry: &ConfigEntry) -> String {
    let key = html_escape(&entry.key);
    format!(
        r#"<tr><td>{key}</td><td><code>{value}</code></td><td>{updated}</td><td><div class="actions"><button class="btn" type="submit" formaction="/entries/select" name="target" value="{key}">Select</button><button class="btn btn-danger" type="submit" formaction="/entries/delete" name="target" value="{key}">Delete</button></div></td></tr>"#,
        value = html_escape(&entry.value),
        updated = html_escape(&format_updated_at(entry.updated_at.as_deref())),
    )
}

fn render_confirm(state: &ConsoleState) -> String {
    let Some(key) = &state.pending_delete else {
        return String::new();
    };

    format!(
        r#"<div class="overlay">
  <form class="confirm" method="post" action="/entries/delete/confirm">
    <p>Delete key "{key}"?</p>
    <div class="row">
      <button class="btn btn-danger" type="submit" name="answer" value="yes" autofocus>Delete</button>
      <button class="btn" type="submit" name="answer" value="no">Cancel</button>
    </div>
  </form>
</div>"#,
        key = html_escape(key),
    )
}

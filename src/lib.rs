//! kvconsole: a browser console for a key/value configuration service.
//!
//! - [`api`]: HTTP client wrapper over an injectable transport
//! - [`console`]: page state, actions and HTML rendering
//! - [`web`]: the `tiny_http` server that hosts the console
//! - [`config`]: layered TOML / environment configuration
//! - [`activity`]: JSONL log of console actions
pub mod activity;
pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod web;

//! HTTP client wrapper for the configuration service.
//!
//! Builds `/configs/{env}/{key}` URLs with individually percent-encoded
//! segments, sends JSON bodies for writes, and turns every outcome into
//! either a parsed value, nothing (empty or 204 responses), or an
//! [`ApiError`].
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | [`ConfigApi::health`] | GET | `/health` |
//! | [`ConfigApi::list_configs`] | GET | `/configs/{env}` |
//! | [`ConfigApi::get_config`] | GET | `/configs/{env}/{key}` |
//! | [`ConfigApi::create_config`] | POST | `/configs/{env}/{key}` |
//! | [`ConfigApi::update_config`] | PUT | `/configs/{env}/{key}` |
//! | [`ConfigApi::delete_config`] | DELETE | `/configs/{env}/{key}` |
pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{ConfigApi, SAME_ORIGIN_LABEL, normalize_base_url};
pub use error::ApiError;
pub use model::ConfigEntry;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport,
};

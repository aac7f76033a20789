use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::model::{ConfigEntry, ValueBody};
use super::transport::{HttpMethod, HttpRequest, Transport};

/// Label shown in place of the base URL when requests are same-origin.
pub const SAME_ORIGIN_LABEL: &str = "same-origin (/)";

/// How the body of a successful response is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parse {
    Json,
    None,
}

/// Normalize a configured base URL.
///
/// Empty and `/` mean same-origin and normalize to `""`; anything else loses
/// its trailing slashes.
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.is_empty() || base_url == "/" {
        return String::new();
    }
    base_url.trim_end_matches('/').to_string()
}

/// Percent-encode one path segment.
fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn entry_path(env: &str, key: &str) -> String {
    format!("/configs/{}/{}", encode_segment(env), encode_segment(key))
}

/// Client for the configuration service's HTTP API.
#[derive(Debug, Clone)]
pub struct ConfigApi<T> {
    root: String,
    transport: T,
}

impl<T: Transport> ConfigApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            root: normalize_base_url(base_url),
            transport,
        }
    }

    /// The normalized base URL, or [`SAME_ORIGIN_LABEL`] when empty.
    pub fn base_label(&self) -> &str {
        if self.root.is_empty() {
            SAME_ORIGIN_LABEL
        } else {
            &self.root
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /health`.
    pub fn health(&self) -> Result<Option<Value>, ApiError> {
        let path = "/health";
        let body = self.request(HttpMethod::Get, path, None, Parse::Json)?;
        decode(path, body)
    }

    /// `GET /configs/{env}`. An empty response yields an empty list.
    pub fn list_configs(&self, env: &str) -> Result<Vec<ConfigEntry>, ApiError> {
        let path = format!("/configs/{}", encode_segment(env));
        let body = self.request(HttpMethod::Get, &path, None, Parse::Json)?;
        Ok(decode::<Vec<ConfigEntry>>(&path, body)?.unwrap_or_default())
    }

    /// `GET /configs/{env}/{key}`.
    pub fn get_config(&self, env: &str, key: &str) -> Result<Option<ConfigEntry>, ApiError> {
        let path = entry_path(env, key);
        let body = self.request(HttpMethod::Get, &path, None, Parse::Json)?;
        decode(&path, body)
    }

    /// `POST /configs/{env}/{key}` with `{"value": ...}`.
    pub fn create_config(&self, env: &str, key: &str, value: &str) -> Result<(), ApiError> {
        self.write(HttpMethod::Post, env, key, value)
    }

    /// `PUT /configs/{env}/{key}` with `{"value": ...}`.
    pub fn update_config(&self, env: &str, key: &str, value: &str) -> Result<(), ApiError> {
        self.write(HttpMethod::Put, env, key, value)
    }

    /// `DELETE /configs/{env}/{key}`.
    pub fn delete_config(&self, env: &str, key: &str) -> Result<(), ApiError> {
        self.request(HttpMethod::Delete, &entry_path(env, key), None, Parse::None)?;
        Ok(())
    }

    fn write(&self, method: HttpMethod, env: &str, key: &str, value: &str) -> Result<(), ApiError> {
        let path = entry_path(env, key);
        let body = serde_json::to_string(&ValueBody { value }).map_err(|e| ApiError::Decode {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        self.request(method, &path, Some(body), Parse::None)?;
        Ok(())
    }

    /// Send one request and classify the outcome.
    ///
    /// Returns the body text only when the caller asked for JSON and the
    /// status is not 204.
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        parse: Parse,
    ) -> Result<Option<String>, ApiError> {
        let mut request = HttpRequest::new(method, format!("{}{}", self.root, path));
        if let Some(body) = body {
            request = request.with_json_body(body);
        }

        let response = self
            .transport
            .send(&request)
            .map_err(|e| ApiError::Network {
                endpoint: self.base_label().to_string(),
                detail: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }

        if parse == Parse::None || response.status == 204 {
            return Ok(None);
        }

        Ok(Some(response.body))
    }
}

fn decode<D: DeserializeOwned>(path: &str, body: Option<String>) -> Result<Option<D>, ApiError> {
    let Some(body) = body else {
        return Ok(None);
    };
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ApiError::Decode {
            path: path.to_string(),
            detail: e.to_string(),
        })
}

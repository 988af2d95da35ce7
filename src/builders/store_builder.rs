//! Builders to construct the HTTP store from configuration.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::StoreConfig;
use crate::core::StoreError;
use crate::infra::NotionStore;

const VERSION_HEADER: &str = "notion-version";

/// Build a [`reqwest::Client`] carrying the auth and version headers of `cfg`.
///
/// # Errors
///
/// Returns [`StoreError::Transport`] if a header value is not valid or the
/// client cannot be constructed.
pub fn build_client(cfg: &StoreConfig) -> Result<reqwest::Client, StoreError> {
    let header = |value: &str| {
        HeaderValue::from_str(value)
            .map_err(|e| StoreError::Transport(format!("invalid header value: {e}")))
    };

    let mut auth = header(&format!("Bearer {}", cfg.api_token))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(HeaderName::from_static(VERSION_HEADER), header(&cfg.api_version)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| StoreError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Build a [`NotionStore`] from configuration.
///
/// # Errors
///
/// Propagates failures from [`build_client`].
pub fn build_store(cfg: &StoreConfig) -> Result<NotionStore, StoreError> {
    cfg_check(cfg)?;
    let client = build_client(cfg)?;
    Ok(NotionStore::new(client, cfg.clone()))
}

fn cfg_check(cfg: &StoreConfig) -> Result<(), StoreError> {
    if cfg.base_url.is_empty() {
        return Err(StoreError::Transport("base_url must not be empty".into()));
    }
    Ok(())
}

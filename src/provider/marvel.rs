//! Marvel character API client.
//!
//! Requests are signed the way the public API requires: a millisecond
//! timestamp `ts`, the public key as `apikey`, and
//! `hash = md5(ts + private_key + public_key)` in lowercase hex.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use md5::{Digest, Md5};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::ItemProvider;
use crate::core::ProviderConfig;
use crate::error::{Error, ProviderError, Result};

/// Character image location, split the way the API returns it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

impl Thumbnail {
    /// Full image URL, `"{path}.{extension}"`.
    #[must_use]
    pub fn image_url(&self) -> String {
        format!("{}.{}", self.path, self.extension)
    }
}

/// One character record; the fields a card face needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub thumbnail: Thumbnail,
}

impl Character {
    /// Image URL for the card face.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.thumbnail.image_url()
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Deserialize)]
struct DataWrapper {
    data: DataContainer,
}

#[derive(Deserialize)]
struct DataContainer {
    results: Vec<Character>,
}

/// Decode a `/characters` response body.
pub(crate) fn parse_characters(body: &[u8]) -> std::result::Result<Vec<Character>, ProviderError> {
    let envelope: DataWrapper = serde_json::from_slice(body)?;
    Ok(envelope.data.results)
}

/// HTTP client for the character list endpoint.
#[derive(Clone, Debug)]
pub struct MarvelClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl MarvelClient {
    /// Create a client. Fails on missing credentials.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Provider(ProviderError::Http(e)))?;
        Ok(Self { http, config })
    }

    /// Request signature for timestamp `ts`.
    #[must_use]
    pub fn auth_hash(ts: &str, private_key: &str, public_key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(private_key.as_bytes());
        hasher.update(public_key.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Signed URL listing `limit` characters at timestamp `ts`.
    pub fn characters_url(&self, limit: usize, ts: &str) -> std::result::Result<Url, ProviderError> {
        let endpoint = format!("{}/characters", self.config.base_url.trim_end_matches('/'));
        let hash = Self::auth_hash(ts, &self.config.private_key, &self.config.public_key);
        let limit = limit.to_string();

        Url::parse_with_params(
            &endpoint,
            &[
                ("limit", limit.as_str()),
                ("apikey", self.config.public_key.as_str()),
                ("ts", ts),
                ("hash", hash.as_str()),
            ],
        )
        .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    /// Fetch up to `limit` characters, reporting failures.
    pub async fn try_fetch_characters(&self, limit: usize) -> std::result::Result<Vec<Character>, ProviderError> {
        let url = self.characters_url(limit, &timestamp_millis())?;
        debug!(limit, endpoint = %self.config.base_url, "Fetching characters");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { status: status.as_u16() });
        }

        let body = response.bytes().await?;
        let characters = parse_characters(&body)?;
        debug!(count = characters.len(), "Characters received");
        Ok(characters)
    }
}

impl ItemProvider for MarvelClient {
    type Item = Character;

    fn fetch_items(&self, limit: usize) -> impl Future<Output = Vec<Character>> + Send {
        async move {
            match self.try_fetch_characters(limit).await {
                Ok(characters) => characters,
                Err(e) => {
                    error!(error = %e, "Error fetching characters");
                    Vec::new()
                }
            }
        }
    }
}

fn timestamp_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis()
        .to_string()
}

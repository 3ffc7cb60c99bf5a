use std::env;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ClientError, ConfigError};
use crate::models::{ActivityType, SubmissionPayload};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;

/// Where the registration backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl BackendConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `PASSPORT_HOST` and `PASSPORT_PORT`, falling back to
    /// `localhost:8000`.
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let host = lookup("PASSPORT_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PASSPORT_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
                name: "PASSPORT_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[async_trait]
pub trait PassportBackend: Send + Sync {
    async fn fetch_activity_types(&self) -> Result<Vec<ActivityType>, ClientError>;

    /// Posts a record. The body of a successful response is returned as-is.
    async fn submit_record(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<serde_json::Value, ClientError>;
}

pub struct PassportHttpClient {
    client: Client,
    config: BackendConfig,
}

impl PassportHttpClient {
    pub fn new(config: BackendConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PassportBackend for PassportHttpClient {
    async fn fetch_activity_types(&self) -> Result<Vec<ActivityType>, ClientError> {
        let url = self.config.endpoint("getActivityType");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(response.status()));
        }

        let activity_types = response.json::<Vec<ActivityType>>().await?;
        tracing::debug!("Fetched {} activity types from {}", activity_types.len(), url);
        Ok(activity_types)
    }

    async fn submit_record(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.config.endpoint("record");

        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Backend response (record): {} - {}", status, body);
            return Err(ClientError::Rejected(status));
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

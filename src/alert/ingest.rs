//! Log-ingestion transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::alert::DispatchError;
use crate::config::IngestConfig;

/// Structured outage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestRecord {
    pub domain: String,
    /// Sent as a string; the backend indexes it as a keyword.
    pub response_code: String,
    /// RFC 3339.
    pub time: String,
}

/// Forwards outage records to a document index.
#[async_trait]
pub trait Ingestor: Send + Sync {
    async fn ingest(&self, record: &IngestRecord) -> Result<(), DispatchError>;
}

/// Posts records as JSON with basic auth.
pub struct HttpIngestor {
    client: reqwest::Client,
    url: String,
    username: String,
    password: String,
}

impl HttpIngestor {
    pub fn new(config: &IngestConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: config.url_template.replace("{source}", &config.source_id),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Ingestor for HttpIngestor {
    async fn ingest(&self, record: &IngestRecord) -> Result<(), DispatchError> {
        let mut request = self.client.post(&self.url).json(record);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for HttpIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIngestor")
            .field("url", &self.url)
            .field("username", &self.username)
            .finish()
    }
}

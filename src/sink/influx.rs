//! InfluxDB 1.x store sink
//!
//! Writes line protocol to the `/write` endpoint with basic auth, the way
//! the v1 API expects. One sink (and one underlying connection pool) exists
//! per process, created at startup and reused for every write of the run.

use super::{encode_lines, Destination, StoreSink, WriteResult};
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::normalize::NormalizedRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Configuration for the InfluxDB sink
#[derive(Debug, Clone)]
pub struct InfluxSinkConfig {
    /// Base URL of the InfluxDB instance, e.g. `http://localhost:8086`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for InfluxSinkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8086".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// InfluxDB 1.x HTTP sink
pub struct InfluxSink {
    client: reqwest::Client,
    config: InfluxSinkConfig,
    credentials: Credentials,
}

impl InfluxSink {
    /// Create a sink with the given endpoint configuration and credentials
    pub fn new(config: InfluxSinkConfig, credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::store_connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    fn write_url(&self) -> String {
        format!("{}/write", self.config.base_url.trim_end_matches('/'))
    }

    fn ping_url(&self) -> String {
        format!("{}/ping", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl StoreSink for InfluxSink {
    async fn write(&self, dest: &Destination, records: &[NormalizedRecord]) -> Result<WriteResult> {
        if records.is_empty() {
            return Ok(WriteResult {
                accepted: true,
                point_count: 0,
            });
        }

        let body = encode_lines(dest, records)?;
        debug!(
            measurement = %dest.measurement,
            points = records.len(),
            "writing chunk"
        );

        let response = self
            .client
            .post(self.write_url())
            .query(&[("db", dest.database.as_str()), ("precision", "ns")])
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .body(body)
            .send()
            .await
            .map_err(|e| Error::from_store_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(WriteResult {
            accepted: true,
            point_count: records.len(),
        })
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(self.ping_url())
            .send()
            .await
            .map_err(|e| Error::from_store_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::StoreRejected {
                status: status.as_u16(),
                body: "ping failed".to_string(),
            });
        }
        Ok(())
    }
}

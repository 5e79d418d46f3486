use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::info;

use crate::util::sha256_hex;

#[derive(Debug, Clone)]
pub(crate) struct FetchedPage {
    pub records: Vec<Value>,
    pub payload_sha256: String,
}

/// One page of a remote collection. `Ok(None)` signals clean exhaustion;
/// errors are soft and end the run with partial results kept.
pub(crate) trait RecordSource {
    fn fetch_page(&mut self, page: u32) -> Result<Option<FetchedPage>>;
}

pub(crate) fn build_client(timeout_ms: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .context("failed to build http client")
}

/// Paged collection endpoint: `GET {base_url}?page={n}`, response object
/// carries the record list under `data_field`.
pub(crate) struct HttpPagedSource {
    client: Client,
    base_url: String,
    data_field: &'static str,
}

impl HttpPagedSource {
    pub(crate) fn new(client: Client, base_url: String, data_field: &'static str) -> Self {
        Self {
            client,
            base_url,
            data_field,
        }
    }
}

impl RecordSource for HttpPagedSource {
    fn fetch_page(&mut self, page: u32) -> Result<Option<FetchedPage>> {
        let url = format!("{}?page={}", self.base_url, page);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            info!(page, status = %status, "non-success status, treating as end of collection");
            return Ok(None);
        }

        let body = response
            .bytes()
            .with_context(|| format!("failed to read response body: {url}"))?;
        let payload: Value = serde_json::from_slice(&body)
            .with_context(|| format!("malformed page payload: {url}"))?;

        let Some(records) = payload.get(self.data_field).and_then(Value::as_array) else {
            bail!("page payload missing `{}` list: {url}", self.data_field);
        };

        Ok(Some(FetchedPage {
            records: records.clone(),
            payload_sha256: sha256_hex(&body),
        }))
    }
}

/// Single-shot endpoint returning the whole collection as a JSON array.
/// Serves it as page 1 and reports exhaustion afterwards; the paginator's
/// quota and dedup bound the work locally.
pub(crate) struct HttpSnapshotSource {
    client: Client,
    url: String,
    exhausted: bool,
}

impl HttpSnapshotSource {
    pub(crate) fn new(client: Client, url: String) -> Self {
        Self {
            client,
            url,
            exhausted: false,
        }
    }
}

impl RecordSource for HttpSnapshotSource {
    fn fetch_page(&mut self, page: u32) -> Result<Option<FetchedPage>> {
        if self.exhausted {
            return Ok(None);
        }
        self.exhausted = true;

        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("request failed: {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            info!(page, status = %status, "non-success status, treating as empty collection");
            return Ok(None);
        }

        let body = response
            .bytes()
            .with_context(|| format!("failed to read response body: {}", self.url))?;
        let payload: Value = serde_json::from_slice(&body)
            .with_context(|| format!("malformed snapshot payload: {}", self.url))?;

        let Value::Array(records) = payload else {
            bail!("snapshot payload is not a list: {}", self.url);
        };

        Ok(Some(FetchedPage {
            payload_sha256: sha256_hex(&body),
            records,
        }))
    }
}

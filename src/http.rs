//! HTTP access for the source fetchers.
//!
//! Sources never talk to `reqwest` directly; they go through the [`Fetch`]
//! trait so the whole pipeline can be driven by an in-memory stub in tests.
//!
//! # Architecture
//!
//! - [`Fetch`]: "GET this URL, give me the body bytes"
//! - [`HttpFetcher`]: the `reqwest` implementation used by the binary

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Trait for fetching a URL's body.
///
/// Requests are issued one at a time by the caller; implementations do not
/// need to be shareable across threads.
pub trait Fetch {
    /// GET `url` and return the raw body.
    ///
    /// Transport failures and non-success status codes are both errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`Fetch`] implementation backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured user agent and request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        Ok(body.to_vec())
    }
}

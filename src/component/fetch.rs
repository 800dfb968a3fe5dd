//! Manifest fetching.
//!
//! Manifests are always fetched fresh: a CI gate must see the manifest as it
//! is now, not as it was on a previous run.

use super::Manifest;
use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Default bound on a single manifest request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches and parses component manifests over HTTP.
///
/// # Example
///
/// ```no_run
/// use reqgate::component::ManifestFetcher;
/// use std::time::Duration;
///
/// let fetcher = ManifestFetcher::new(Duration::from_secs(10)).unwrap();
/// let manifest = fetcher.fetch("https://example.com/manifest.json").unwrap();
/// println!("{} declares {} requirement(s)", manifest.domain, manifest.requirements.len());
/// ```
pub struct ManifestFetcher {
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl ManifestFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { timeout, client })
    }

    /// Fetch `url` and parse it as a manifest.
    pub fn fetch(&self, url: &str) -> Result<Manifest> {
        let body = self.fetch_text(url)?;
        serde_json::from_str(&body).with_context(|| format!("Invalid manifest JSON at {}", url))
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching manifest {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }

        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

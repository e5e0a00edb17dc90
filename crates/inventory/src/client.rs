//! Paginated NetBox REST client.
//!
//! Provides [`NetboxClient`] for listing devices and their interfaces. All
//! requests are issued one at a time: a page of devices is read, then each
//! device's interfaces are fetched in turn, then the next page is requested.
//! Any failed request aborts the whole fetch; there is no retry.

use async_trait::async_trait;
use netcheck_core::config::NetboxConfig;
use netcheck_core::{ConfigError, Device};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::mapper::map_device;
use crate::model::{DeviceRecord, InterfaceRecord, Page};

/// Longest error body kept in a [`FetchError::Status`] message.
const MAX_ERROR_BODY: usize = 512;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors that abort an inventory fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The client could not be built from the given configuration.
    #[error("invalid NetBox configuration: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox answered with something other than 200 OK.
    #[error("NetBox returned {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body was not a valid result page.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A pagination link or endpoint could not be turned into a URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The interface lookup for one device failed.
    #[error("fetching interfaces for device {device}: {source}")]
    Interfaces {
        device: String,
        #[source]
        source: Box<FetchError>,
    },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Anything that can produce the device list for a compliance run.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch every device with its full interface list.
    async fn fetch_devices(&self) -> Result<Vec<Device>, FetchError>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the NetBox DCIM API.
pub struct NetboxClient {
    base_url: Url,
    token: Option<String>,
    page_size: u32,
    http: reqwest::Client,
}

impl NetboxClient {
    /// Create a client from configuration.
    ///
    /// Fails with [`FetchError::Config`] when the URL is missing or malformed
    /// or the page size is zero.
    pub fn new(config: &NetboxConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let raw = config.base_url()?;
        let base_url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url,
            token: config.token.clone(),
            page_size: config.page_size,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch all devices, following `next` links, with each device's interfaces.
    ///
    /// All-or-nothing: the first failed page or interface lookup aborts the
    /// fetch and no devices are returned.
    pub async fn fetch_devices(&self) -> Result<Vec<Device>, FetchError> {
        let mut devices = Vec::new();
        let mut next = Some(self.endpoint(&["dcim", "devices"], &[])?);

        while let Some(url) = next {
            let page: Page<DeviceRecord> = self.get_page(&url).await?;
            debug!(url = %url, count = page.count, received = page.results.len(), "device page");

            for record in page.results {
                let interfaces = self.fetch_interfaces(record.id).await.map_err(|e| {
                    FetchError::Interfaces {
                        device: record.display_name(),
                        source: Box::new(e),
                    }
                })?;
                devices.push(map_device(record, interfaces));
            }

            next = page.next.as_deref().map(|link| self.rebase(link)).transpose()?;
        }

        info!(devices = devices.len(), base_url = %self.base_url, "fetched NetBox devices");
        Ok(devices)
    }

    /// Fetch every interface name of one device, following `next` links.
    pub async fn fetch_interfaces(&self, device_id: u64) -> Result<Vec<String>, FetchError> {
        let mut names = Vec::new();
        let mut next = Some(self.endpoint(
            &["dcim", "interfaces"],
            &[("device_id", device_id.to_string())],
        )?);

        while let Some(url) = next {
            let page: Page<InterfaceRecord> = self.get_page(&url).await?;
            debug!(device_id, received = page.results.len(), "interface page");

            names.extend(page.results.into_iter().map(|i| i.name));
            next = page.next.as_deref().map(|link| self.rebase(link)).transpose()?;
        }

        Ok(names)
    }

    /// Issue one GET and decode a result page.
    async fn get_page<T: DeserializeOwned>(&self, url: &Url) -> Result<Page<T>, FetchError> {
        let mut request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Build `{base}/api/{segments..}/?{query}&limit={page_size}`.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments)
            .push("");

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("limit", &self.page_size.to_string());
        }
        Ok(url)
    }

    /// Point a server-supplied `next` link back at the configured base URL.
    ///
    /// NetBox builds `next` from the host it believes it serves, which is
    /// wrong behind a reverse proxy. Only the path and query are kept. When
    /// the base URL carries a path prefix (`https://tools/netbox`) that the
    /// link lacks, the prefix is put back in front of the link's path.
    fn rebase(&self, link: &str) -> Result<Url, FetchError> {
        let parsed = self.base_url.join(link).map_err(|e| FetchError::InvalidUrl {
            url: link.to_string(),
            reason: e.to_string(),
        })?;

        let prefix = self.base_url.path().trim_end_matches('/');
        let path = parsed.path();
        let has_prefix = path == prefix || path.starts_with(&format!("{prefix}/"));

        let mut url = self.base_url.clone();
        if prefix.is_empty() || has_prefix {
            url.set_path(path);
        } else {
            url.set_path(&format!("{prefix}{path}"));
        }
        url.set_query(parsed.query());
        Ok(url)
    }
}

#[async_trait]
impl InventorySource for NetboxClient {
    async fn fetch_devices(&self) -> Result<Vec<Device>, FetchError> {
        NetboxClient::fetch_devices(self).await
    }
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push('…');
    }
    body
}

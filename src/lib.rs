mod api;
pub mod commands;
mod error;
mod model;
pub mod notifier;
pub mod pages;
pub mod poller;

use anyhow::Context;
use log::{debug, error, warn};
use serde_json::Value;

pub use error::{Error, Invalid, Result};
pub use model::{
    CalendarConfigs, CalendarDate, ClockTime, OutputState, SaveState, ScheduleEntry,
    WifiCredentials, WifiStatus, UNSET_HOUR,
};

pub const URL_VAR: &str = "ESPCTL_URL";

/// Handle on one device controller. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    base: String,
    http: reqwest::Client,
}

impl Client {
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(URL_VAR).with_context(|| format!("reading {}", URL_VAR))?;
        Self::new(url)
    }

    pub fn new(url: impl ToString) -> anyhow::Result<Self> {
        let base = url.to_string().trim_end_matches('/').to_owned();
        anyhow::ensure!(!base.is_empty(), "device url is empty");
        let http = reqwest::Client::builder()
            .build()
            .with_context(|| "building http client")?;
        Ok(Client { base, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// One round trip: GET when there is no payload, JSON POST otherwise.
    ///
    /// Any failure (unreachable device, non-2xx status, body that is not
    /// JSON) is logged here and comes back as the `Err` arm; callers only
    /// ever see a parsed body or an [`Error`].
    pub async fn request(&self, path: &str, payload: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base, path);

        let req = match &payload {
            None => self.http.get(&url),
            Some(body) => self.http.post(&url).json(body),
        };
        debug!(
            "{} {}",
            if payload.is_some() { "POST" } else { "GET" },
            url
        );

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(source) => {
                error!("request to {} failed: {}", url, source);
                return Err(Error::Transport { url, source });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            error!("{} answered HTTP {}", url, status);
            return Err(Error::Status { url, status });
        }

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(source) => {
                error!("reading response from {} failed: {}", url, source);
                return Err(Error::Transport { url, source });
            }
        };

        serde_json::from_slice(&body).map_err(|e| {
            warn!("{} sent a body that is not JSON: {}", url, e);
            Error::malformed(&url, e)
        })
    }
}

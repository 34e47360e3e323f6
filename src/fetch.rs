//! Rule document fetching
//!
//! `get-lint-rule` is the only tool with a side effect: a single HTTP GET.
//! The fetch sits behind [`RuleFetcher`] so the dispatcher can be exercised
//! without network access.

use async_trait::async_trait;
use reqwest::Url;

use crate::error::Result;

/// Outcome of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResponse {
    /// 2xx response, body kept verbatim
    Found(String),
    /// Any other status; the body is not read
    Unavailable(u16),
}

/// Trait for rule document sources
///
/// Transport failures (DNS, refused or reset connections, broken bodies) are
/// returned as `Err` and are fatal to the server. Non-2xx statuses are not
/// errors.
#[async_trait]
pub trait RuleFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<RuleResponse>;
}

/// reqwest-backed fetcher. No timeout and no retry.
pub struct HttpRuleFetcher {
    client: reqwest::Client,
}

impl HttpRuleFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpRuleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleFetcher for HttpRuleFetcher {
    async fn fetch(&self, url: &Url) -> Result<RuleResponse> {
        tracing::debug!(%url, "Fetching lint rule");

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%url, %status, "Rule fetch returned non-success status");
            return Ok(RuleResponse::Unavailable(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "Fetched lint rule");
        Ok(RuleResponse::Found(body))
    }
}

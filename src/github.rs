use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;

/// Default media type for JSON resources.
pub const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Why a single request did not produce a usable body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    /// HTTP status for non-success responses, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin REST client shared by both loaders. Cheap to clone.
#[derive(Clone)]
pub struct GithubClient {
    base: Arc<String>,
    token: Option<Arc<String>>,
    user_agent: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base: Arc::new(config.api_base.clone()),
            token: config.token.clone().map(Arc::new),
            user_agent: Arc::new(config.user_agent.clone()),
            http: Arc::new(http),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// GET `path` and parse the body as JSON.
    pub async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url(path);
        let resp = self.send(&url, JSON_MEDIA_TYPE).await?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// GET `path` asking for `accept` and return the body as text.
    pub async fn get_text(&self, path: &str, accept: &str) -> Result<String, FetchError> {
        let url = self.url(path);
        let resp = self.send(&url, accept).await?;

        resp.text()
            .await
            .map_err(|source| FetchError::Transport { url, source })
    }

    async fn send(&self, url: &str, accept: &str) -> Result<Response, FetchError> {
        let mut req = self
            .http
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, accept);

        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {token}"));
        }

        let resp = req.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp)
    }
}

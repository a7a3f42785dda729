use crate::config::Config;
use crate::diagnostics::{Diagnostics, Loader, LogDiagnostics};
use crate::github::{FetchError, GithubClient};
use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::string::FromUtf8Error;
use std::sync::Arc;

/// Asks GitHub for the file bytes instead of the JSON description.
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadmeRecord {
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded content is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// The contents-API envelope returned when the raw media type is ignored.
#[derive(Deserialize)]
struct Envelope {
    content: String,
    encoding: String,
}

/// Turn a README response body into text.
///
/// A body that parses as a contents envelope with base64 encoding is decoded,
/// anything else is already the README and is returned as-is.
pub fn decode_body(body: &str) -> Result<String, DecodeError> {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) if envelope.encoding.eq_ignore_ascii_case("base64") => {
            decode_base64(&envelope.content)
        }
        _ => Ok(body.to_string()),
    }
}

fn decode_base64(encoded: &str) -> Result<String, DecodeError> {
    // GitHub wraps the payload with newlines
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Loads one repository's README as text.
pub struct ReadmeFetcher {
    client: GithubClient,
    owner: String,
    repo: String,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ReadmeFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: GithubClient::new(config)?,
            owner: config.readme_owner.clone(),
            repo: config.readme_repo.clone(),
            diagnostics: Arc::new(LogDiagnostics),
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Never fails: any error yields empty content.
    pub async fn load(&self) -> ReadmeRecord {
        match self.fetch().await {
            Ok(content) => ReadmeRecord { content },
            Err(e) => {
                self.diagnostics.fetch_failed(Loader::Readme, &e);
                ReadmeRecord::default()
            }
        }
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let path = format!("/repos/{}/{}/readme", self.owner, self.repo);
        let body = self.client.get_text(&path, RAW_MEDIA_TYPE).await?;

        decode_body(&body).map_err(|e| FetchError::Decode {
            url: self.client.url(&path),
            message: e.to_string(),
        })
    }
}

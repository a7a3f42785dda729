use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Credential variables, checked in order.
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "VITE_GITHUB_TOKEN"];
const API_BASE_VAR: &str = "GITHUB_API_URL";

/// Everything the loaders need to know about which account to read and how.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub username: String,
    pub readme_owner: String,
    pub readme_repo: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    /// Defaults for `username`. The README is read from the `username/username`
    /// profile repository unless overridden.
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            readme_owner: username.clone(),
            readme_repo: username.clone(),
            username,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("ghprofile/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Like [`Config::new`], with the credential and API base taken from the
    /// process environment. Missing variables leave the defaults in place.
    pub fn from_env(username: impl Into<String>) -> Self {
        Self::from_lookup(username, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(username: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(username);

        if let Some(base) = lookup(API_BASE_VAR) {
            config = config.with_api_base(base);
        }

        let token = TOKEN_VARS.iter().find_map(|var| lookup(var).and_then(non_blank));
        if let Some(token) = token {
            config = config.with_token(token);
        }

        config
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_base = trimmed.to_string();
        }
        self
    }

    /// Blank tokens are treated as no token at all.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = non_blank(token.into());
        self
    }

    pub fn with_readme_repo(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.readme_owner = owner.into();
        self.readme_repo = repo.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

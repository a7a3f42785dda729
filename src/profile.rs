use crate::config::Config;
use crate::diagnostics::{Diagnostics, Loader, LogDiagnostics};
use crate::github::{FetchError, GithubClient};
use crate::stats::{self, Contributions, TOP_LANGUAGE_LIMIT};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

const REPO_PAGE_SIZE: usize = 10;
const EVENT_PAGE_SIZE: usize = 100;
const SHOWN_REPOS: usize = 3;

/// A successfully loaded profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// The `/users/{username}` body, untouched.
    pub user: Map<String, Value>,
    pub top_languages: Vec<String>,
    /// Most recently updated first.
    pub repos: Vec<Value>,
    pub contributions: Contributions,
}

/// What the profile loader hands to templates. Serializes to `{}` when the
/// profile could not be loaded, otherwise to the user fields merged with
/// `topLanguages`, `repos` and `contributions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    profile: Option<Profile>,
}

impl ProfileRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
    }

    /// Flattened view. Derived fields overwrite user fields of the same name.
    pub fn to_map(&self) -> Map<String, Value> {
        let Some(profile) = &self.profile else {
            return Map::new();
        };

        let mut map = profile.user.clone();
        map.insert(
            "topLanguages".into(),
            Value::from(profile.top_languages.clone()),
        );
        map.insert("repos".into(), Value::Array(profile.repos.clone()));
        map.insert(
            "contributions".into(),
            profile
                .contributions
                .iter()
                .map(|(day, n)| (day.clone(), Value::from(*n)))
                .collect::<Map<_, _>>()
                .into(),
        );
        map
    }
}

impl From<Profile> for ProfileRecord {
    fn from(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
        }
    }
}

impl Serialize for ProfileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Loads a user's profile, recent repositories and recent activity.
pub struct ProfileAggregator {
    client: GithubClient,
    username: String,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ProfileAggregator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: GithubClient::new(config)?,
            username: config.username.clone(),
            diagnostics: Arc::new(LogDiagnostics),
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Never fails: an unreachable or missing profile yields an empty record.
    pub async fn load(&self) -> ProfileRecord {
        self.load_at(Utc::now()).await
    }

    /// [`ProfileAggregator::load`] with the contribution window ending at `now`.
    pub async fn load_at(&self, now: DateTime<Utc>) -> ProfileRecord {
        let user = match self.fetch_user().await {
            Ok(user) => user,
            Err(e) => {
                self.diagnostics.fetch_failed(Loader::Profile, &e);
                return ProfileRecord::empty();
            }
        };

        let repos_path = format!(
            "/users/{}/repos?sort=updated&per_page={REPO_PAGE_SIZE}",
            self.username
        );
        let events_path = format!("/users/{}/events?per_page={EVENT_PAGE_SIZE}", self.username);

        let (repos, events) = tokio::join!(
            self.fetch_list(&repos_path),
            self.fetch_list(&events_path)
        );
        let mut repos = self.or_degraded("repos", repos);
        let events = self.or_degraded("contributions", events);

        let top_languages = stats::top_languages(&repos, TOP_LANGUAGE_LIMIT);
        let contributions = stats::contributions(&events, now);
        repos.truncate(SHOWN_REPOS);

        Profile {
            user,
            top_languages,
            repos,
            contributions,
        }
        .into()
    }

    async fn fetch_user(&self) -> Result<Map<String, Value>, FetchError> {
        let path = format!("/users/{}", self.username);
        match self.client.get_json(&path).await? {
            Value::Object(user) => Ok(user),
            _ => Err(FetchError::Decode {
                url: self.client.url(&path),
                message: "expected a JSON object".into(),
            }),
        }
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Value>, FetchError> {
        match self.client.get_json(path).await? {
            Value::Array(items) => Ok(items),
            _ => Err(FetchError::Decode {
                url: self.client.url(path),
                message: "expected a JSON array".into(),
            }),
        }
    }

    fn or_degraded(&self, field: &'static str, fetched: Result<Vec<Value>, FetchError>) -> Vec<Value> {
        fetched.unwrap_or_else(|e| {
            self.diagnostics.fetch_degraded(Loader::Profile, field, &e);
            Vec::new()
        })
    }
}

//! Page data loaders backed by the GitHub REST API.
//!
//! [`ProfileAggregator`] builds a profile card record (user fields, top
//! languages, recent repos, daily contribution counts) and [`ReadmeFetcher`]
//! pulls a repository README as text. Both are total: on failure they hand
//! back an empty record and report through [`Diagnostics`].

pub mod config;
pub mod diagnostics;
pub mod github;
pub mod profile;
pub mod readme;
pub mod stats;

pub use config::Config;
pub use diagnostics::{Diagnostics, Loader, LogDiagnostics};
pub use github::{FetchError, GithubClient};
pub use profile::{Profile, ProfileAggregator, ProfileRecord};
pub use readme::{ReadmeFetcher, ReadmeRecord};
pub use stats::Contributions;

use anyhow::{Context, Result};
use ghprofile::{Config, ProfileAggregator, ProfileRecord, ReadmeFetcher, ReadmeRecord};
use serde::Serialize;
use std::io::Write;

/// Everything the page templates receive.
#[derive(Serialize)]
struct SiteData {
    profile: ProfileRecord,
    readme: ReadmeRecord,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let username =
        std::env::var("GHPROFILE_USER").context("GHPROFILE_USER environment variable not set")?;

    let mut config = Config::from_env(&username);
    if let Ok(repo) = std::env::var("GHPROFILE_REPO") {
        config = config.with_readme_repo(username.clone(), repo);
    }

    let profile = ProfileAggregator::new(&config)?;
    let readme = ReadmeFetcher::new(&config)?;

    let (profile, readme) = tokio::join!(profile.load(), readme.load());
    log::info!(
        "loaded data for {username} (profile: {}, readme: {} bytes)",
        if profile.is_empty() { "empty" } else { "ok" },
        readme.content.len()
    );

    let data = SiteData { profile, readme };
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &data).context("Failed to write site data")?;
    writeln!(out)?;

    Ok(())
}

//! stats.rs
//!
//! Derived profile fields computed from the raw repository and event lists.
//!
//!   • top languages: most frequent `language` across repos, ties keep the
//!     order in which the languages were first seen
//!   • contributions: events per UTC calendar day over the trailing window

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TOP_LANGUAGE_LIMIT: usize = 3;
pub const CONTRIBUTION_WINDOW_DAYS: i64 = 365;

/// `YYYY-MM-DD` -> number of events on that day, ascending by date.
pub type Contributions = BTreeMap<String, u32>;

/// Language names ordered by descending repo count, at most `limit` of them.
pub fn top_languages(repos: &[Value], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    let languages = repos
        .iter()
        .filter_map(|repo| repo.get("language"))
        .filter_map(Value::as_str)
        .filter(|lang| !lang.is_empty());

    for lang in languages {
        match counts.iter_mut().find(|(name, _)| *name == lang) {
            Some((_, n)) => *n += 1,
            None => counts.push((lang, 1)),
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(lang, _)| lang.to_string())
        .collect()
}

/// Count events created on or after `now - 365 days`, keyed by UTC date.
pub fn contributions(events: &[Value], now: DateTime<Utc>) -> Contributions {
    let since = now - Duration::days(CONTRIBUTION_WINDOW_DAYS);
    let mut out = Contributions::new();

    for at in events.iter().filter_map(event_time) {
        if at >= since {
            *out.entry(at.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
        }
    }

    out
}

/// Events without a parseable `created_at` are ignored.
fn event_time(event: &Value) -> Option<DateTime<Utc>> {
    let raw = event.get("created_at")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

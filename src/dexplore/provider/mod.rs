//! # Data Provider
//!
//! The explorer never owns catalog data: everything comes from a remote, paginated REST
//! API. [`DataProvider`] is the seam between the core and that API, the same way the
//! storage layer hides the filesystem behind a trait.
//!
//! ## Implementations
//!
//! - [`http::HttpProvider`]: production client, one GET per call
//! - [`memory::MemProvider`]: canned records for tests, counts every call
//!
//! ## Failure Contract
//!
//! Every method either returns a single decoded payload or fails with
//! [`DexError::NotFound`] (resource absent) or [`DexError::Network`] (transport,
//! non-success status, undecodable body). Nothing is retried and there is no timeout:
//! the first failure propagates to the caller.
//!
//! Execution is single threaded, so the trait is declared `?Send`.

use crate::error::{DexError, Result};
use crate::model::{CreatureRecord, ListingPage, MemberSet, NamedResource};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod http;
pub mod memory;

/// Categories the provider exposes that never contain regular catalog entries.
pub const SENTINEL_CATEGORIES: [&str; 2] = ["unknown", "shadow"];

#[async_trait(?Send)]
pub trait DataProvider {
    /// One page of the default sequential listing.
    async fn list_page(&self, offset: u32, limit: u32) -> Result<ListingPage>;

    /// Full record by numeric id or by name.
    async fn creature(&self, id_or_name: &str) -> Result<CreatureRecord>;

    /// Member ids of a category (e.g. "fire").
    async fn category(&self, name: &str) -> Result<MemberSet>;

    /// All selectable categories, sentinels excluded.
    async fn categories(&self) -> Result<Vec<NamedResource>>;

    /// Ids of creatures that can have the ability.
    async fn ability(&self, name: &str) -> Result<MemberSet>;

    /// Ids of creatures that can learn the move.
    async fn move_learners(&self, name: &str) -> Result<MemberSet>;
}

static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d+)/?$").expect("trailing id pattern is valid"));

/// Extracts the numeric id from the last path segment of a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `Some(25)`.
pub fn id_from_url(url: &str) -> Option<u32> {
    TRAILING_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Collects ids from resource URLs, silently skipping any that do not end in an id.
pub fn member_set<'a>(name: &str, urls: impl IntoIterator<Item = &'a str>) -> MemberSet {
    MemberSet {
        name: name.to_string(),
        ids: urls.into_iter().filter_map(id_from_url).collect(),
    }
}

pub fn without_sentinels(categories: Vec<NamedResource>) -> Vec<NamedResource> {
    categories
        .into_iter()
        .filter(|c| !SENTINEL_CATEGORIES.contains(&c.name.as_str()))
        .collect()
}

/// Normalizes user input for a lookup: trimmed and lower-cased.
///
/// Empty input is rejected before it can turn into a request for the collection root.
pub fn normalize_query(raw: &str) -> Result<String> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        return Err(DexError::InvalidInput("search term cannot be empty".into()));
    }
    Ok(query)
}

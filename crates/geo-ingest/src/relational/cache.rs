//! Run-scoped platform memoization.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use geo_model::Platform;

use crate::error::Result;

/// Platforms already fetched and parsed during one assembly run.
///
/// Owned by the caller and passed into the assembler. Not shared between
/// threads; use one cache per run.
#[derive(Debug, Default)]
pub struct PlatformCache {
    platforms: HashMap<String, Platform>,
    fetches: usize,
}

impl PlatformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform_id: &str) -> Option<&Platform> {
        self.platforms.get(platform_id)
    }

    /// Returns the cached platform, calling `fetch` only on a miss.
    pub fn get_or_fetch<F>(&mut self, platform_id: &str, fetch: F) -> Result<&Platform>
    where
        F: FnOnce() -> Result<Platform>,
    {
        match self.platforms.entry(platform_id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let platform = fetch()?;
                self.fetches += 1;
                tracing::debug!(platform = platform_id, "cached platform");
                Ok(entry.insert(platform))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Number of platforms fetched from the source so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

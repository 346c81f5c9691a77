//! The submission aggregate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::platform::Platform;
use crate::protocol::Protocol;
use crate::sample::Sample;
use crate::series::Series;

/// One GEO submission: a series, its samples, and the platforms they reference.
///
/// Platforms are listed in first-referenced order and are unique by
/// identifier. Template submissions carry a single unidentified platform
/// (or none) and a [`Protocol`]; relational submissions never carry a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    pub series: Series,
    /// Sample id -> sample.
    pub samples: BTreeMap<String, Sample>,
    pub protocol: Option<Protocol>,
    pub platforms: Vec<Platform>,
}

impl SubmissionMetadata {
    pub fn new(
        series: Series,
        samples: BTreeMap<String, Sample>,
        protocol: Option<Protocol>,
        platforms: Vec<Platform>,
    ) -> Self {
        Self {
            series,
            samples,
            protocol,
            platforms,
        }
    }

    /// GSE accession of the series, if it has one.
    pub fn series_id(&self) -> Option<&str> {
        self.series.id.as_deref()
    }

    /// Looks up a platform by identifier.
    pub fn platform(&self, id: &str) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|platform| platform.id.as_deref() == Some(id))
    }

    /// Sample/platform pairs whose platform is not part of this submission.
    ///
    /// Platforms without an identifier (template platforms) satisfy every
    /// reference, since template samples name their platform free-form.
    pub fn unresolved_platform_references(&self) -> Vec<(&str, &str)> {
        if self.platforms.iter().any(|platform| platform.id.is_none()) {
            return Vec::new();
        }
        self.samples
            .values()
            .filter(|sample| self.platform(&sample.platform_id).is_none())
            .map(|sample| (sample.id.as_str(), sample.platform_id.as_str()))
            .collect()
    }

    /// Checks the aggregate invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: an empty series title, a
    /// repeated platform identifier, or a sample whose platform does not
    /// resolve. Template submissions without any platform skip the
    /// reference check.
    pub fn validate(&self) -> Result<()> {
        if self.series.title.trim().is_empty() {
            return Err(ModelError::EmptySeriesTitle);
        }

        let mut seen = BTreeSet::new();
        for id in self.platforms.iter().filter_map(|p| p.id.as_deref()) {
            if !seen.insert(id) {
                return Err(ModelError::DuplicatePlatform {
                    platform: id.to_string(),
                });
            }
        }

        if self.platforms.is_empty() && self.protocol.is_some() {
            return Ok(());
        }

        if let Some((sample, platform)) = self.unresolved_platform_references().first() {
            return Err(ModelError::UnresolvedPlatform {
                sample: (*sample).to_string(),
                platform: (*platform).to_string(),
            });
        }

        Ok(())
    }
}

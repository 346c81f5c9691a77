//! Samples and their per-channel biological material.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Channel number used for template samples, which carry a single unnumbered channel.
pub const SINGLE_CHANNEL: u32 = 0;

/// Biological material measured on one channel of a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerChannelSampleInfo {
    pub channel: u32,
    pub source_name: String,
    /// One or more organisms. Never empty.
    pub organisms: Vec<String>,
    /// Characteristic name -> value. Names are case-sensitive.
    pub characteristics: BTreeMap<String, String>,
    pub molecule: String,
    pub label: Option<String>,
    pub treatment_protocol: Option<String>,
    pub extract_protocol: Option<String>,
    #[serde(default)]
    pub label_protocol: Option<String>,
}

/// One assayed specimen within a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// GSE accession of the parent series. Template samples have none.
    pub series_id: Option<String>,
    /// GSM accession (relational) or sample name (template). Unique within a submission.
    pub id: String,
    pub title: String,
    pub label: Option<String>,
    pub description: Option<String>,
    /// Identifier of the platform this sample was measured on.
    pub platform_id: String,
    /// Channel number -> channel information.
    pub per_channel: BTreeMap<u32, PerChannelSampleInfo>,
    pub biomaterial_provider: Option<String>,
    pub raw_data_files: Vec<String>,
    pub cel_file: Option<String>,
    pub exp_file: Option<String>,
    pub chp_file: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub data_processing: Option<String>,
    #[serde(default)]
    pub hybridization_protocol: Option<String>,
    #[serde(default)]
    pub supplementary_files: Vec<String>,
}

impl Sample {
    /// Characteristics of every channel, keyed by channel number.
    pub fn characteristics(&self) -> BTreeMap<u32, &BTreeMap<String, String>> {
        self.per_channel
            .iter()
            .map(|(channel, info)| (*channel, &info.characteristics))
            .collect()
    }

    /// Organisms of every channel, keyed by channel number.
    pub fn organisms(&self) -> BTreeMap<u32, &[String]> {
        self.per_channel
            .iter()
            .map(|(channel, info)| (*channel, info.organisms.as_slice()))
            .collect()
    }

    pub fn source_names(&self) -> BTreeMap<u32, &str> {
        self.per_channel
            .iter()
            .map(|(channel, info)| (*channel, info.source_name.as_str()))
            .collect()
    }

    pub fn molecules(&self) -> BTreeMap<u32, &str> {
        self.per_channel
            .iter()
            .map(|(channel, info)| (*channel, info.molecule.as_str()))
            .collect()
    }

    /// Labels of the channels that record one.
    pub fn labels(&self) -> BTreeMap<u32, &str> {
        self.per_channel
            .iter()
            .filter_map(|(channel, info)| info.label.as_deref().map(|label| (*channel, label)))
            .collect()
    }

    /// Number of channels recorded for this sample.
    pub fn channel_count(&self) -> usize {
        self.per_channel.len()
    }
}

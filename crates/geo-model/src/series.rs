//! Study-level series record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;

/// A GEO series: the study that groups a submission's samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// GSE accession. Template-sourced series have none.
    pub id: Option<String>,
    /// Never empty.
    pub title: String,
    pub summary: Vec<String>,
    pub overall_design: Vec<String>,
    pub contributors: Vec<Contributor>,
    /// PubMed identifiers.
    pub pubmed_ids: Vec<String>,
    /// sample id -> (variable name -> value)
    pub variables: BTreeMap<String, BTreeMap<String, String>>,
    /// sample id -> repeat type labels
    pub repeats: BTreeMap<String, Vec<String>>,
    /// Experiment types, e.g. "Expression profiling by array".
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub web_link: Option<String>,
    /// Submitter contact, when the source records one separately from the contributors.
    #[serde(default)]
    pub contact: Option<Contributor>,
    #[serde(default)]
    pub supplementary_files: Vec<String>,
}

impl Series {
    /// Creates a series with a title and every other field empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            summary: Vec::new(),
            overall_design: Vec::new(),
            contributors: Vec::new(),
            pubmed_ids: Vec::new(),
            variables: BTreeMap::new(),
            repeats: BTreeMap::new(),
            types: BTreeSet::new(),
            web_link: None,
            contact: None,
            supplementary_files: Vec::new(),
        }
    }

    /// Sets the GSE accession.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

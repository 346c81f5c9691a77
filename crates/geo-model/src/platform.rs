//! Measurement platform definitions.

use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;

/// The array or sequencing technology a sample was measured on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// GPL accession. Template platforms have none.
    pub id: Option<String>,
    pub title: String,
    pub distribution: String,
    pub technology: String,
    pub organism: String,
    pub manufacturer: Option<String>,
    pub manufacture_protocol: Vec<String>,
    pub description: Vec<String>,
    pub catalog_number: Option<String>,
    pub web_link: Option<String>,
    pub support: Option<String>,
    pub coating: Option<String>,
    pub contributors: Vec<Contributor>,
    pub pubmed_ids: Vec<String>,
}

//! Protocol sections of a template submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-text procedural fields shared by every sample of a template submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    pub growth: Vec<String>,
    pub treatment: Vec<String>,
    pub extract: Vec<String>,
    pub label: Vec<String>,
    pub hybridization: Vec<String>,
    pub scan: Vec<String>,
    pub data_processing: Vec<String>,
    pub value_definition: Vec<String>,
    /// Field name -> values, for protocol fields outside the known set.
    pub user_defined: BTreeMap<String, Vec<String>>,
}

impl Protocol {
    /// Returns true if no protocol text was recorded.
    pub fn is_empty(&self) -> bool {
        self.growth.is_empty()
            && self.treatment.is_empty()
            && self.extract.is_empty()
            && self.label.is_empty()
            && self.hybridization.is_empty()
            && self.scan.is_empty()
            && self.data_processing.is_empty()
            && self.value_definition.is_empty()
            && self.user_defined.is_empty()
    }
}

//! Contributors and their contact details.

use serde::{Deserialize, Serialize};

/// Structured form of a contributor name written as `Last, First Middle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorName {
    pub first: String,
    pub middle: Option<String>,
    pub last: String,
}

impl ContributorName {
    /// Renders the name in reading order (`First Middle Last`).
    pub fn display_name(&self) -> String {
        match &self.middle {
            Some(middle) => format!("{} {} {}", self.first, middle, self.last),
            None => format!("{} {}", self.first, self.last),
        }
    }
}

/// A person credited on a series or platform.
///
/// Only the name is guaranteed. Every contact attribute is `None` when the
/// source does not provide it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    /// Name components, when the source name followed the `Last, First Middle` pattern.
    pub name_parts: Option<ContributorName>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub laboratory: Option<String>,
    pub department: Option<String>,
    pub institute: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_or_postal_code: Option<String>,
    pub country: Option<String>,
    pub web_link: Option<String>,
}

impl Contributor {
    /// Creates a contributor with a name and no contact details.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a contributor from parsed name components.
    pub fn from_name_parts(parts: ContributorName) -> Self {
        Self {
            name: parts.display_name(),
            name_parts: Some(parts),
            ..Self::default()
        }
    }

    /// Returns true if no contact attribute is populated.
    pub fn has_no_contact_details(&self) -> bool {
        [
            &self.email,
            &self.phone,
            &self.fax,
            &self.laboratory,
            &self.department,
            &self.institute,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_or_postal_code,
            &self.country,
            &self.web_link,
        ]
        .iter()
        .all(|value| value.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_middle() {
        let name = ContributorName {
            first: "John".to_string(),
            middle: Some("Q".to_string()),
            last: "Smith".to_string(),
        };
        assert_eq!(name.display_name(), "John Q Smith");
    }

    #[test]
    fn test_display_name_without_middle() {
        let name = ContributorName {
            first: "Ada".to_string(),
            middle: None,
            last: "Lovelace".to_string(),
        };
        assert_eq!(name.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_named_contributor_has_no_contact_details() {
        let contributor = Contributor::named("Jane Q Public Lab");
        assert_eq!(contributor.name, "Jane Q Public Lab");
        assert!(contributor.name_parts.is_none());
        assert!(contributor.has_no_contact_details());
    }

    #[test]
    fn test_contact_detail_detected() {
        let contributor = Contributor {
            email: Some("jane@example.org".to_string()),
            ..Contributor::named("Jane")
        };
        assert!(!contributor.has_no_contact_details());
    }
}

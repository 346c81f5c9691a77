//! Parsers for delimiter-encoded multi-part cell values.
//!
//! GEO packs several structured values into single text cells: sample
//! characteristics (`tissue: liver; age: 45`), contact records
//! (`Name: John,,Doe;\tEmail: jd@example.org`), contributor lists
//! (`John,,Doe;Jane,M,Smith`) and comma-separated type lists. These helpers
//! never fail; malformed segments are dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use geo_model::{Contributor, ContributorName};
use regex::Regex;

/// Contact attribute names recognised in contact records.
pub const CONTACT_ATTRIBUTES: &[&str] = &[
    "Name",
    "Email",
    "Phone",
    "Fax",
    "Laboratory",
    "Department",
    "Institute",
    "Address",
    "City",
    "State",
    "Zip/postal-code",
    "Country",
    "Web_link",
];

/// `Last, First` or `Last, First Middle`.
static CONTRIBUTOR_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z'\-]*),\s+([A-Za-z]+)(?:\s+([A-Za-z]+))?$")
        .expect("Invalid contributor name regex")
});

/// Splits on any of `separators`, trimming pieces and dropping empty ones.
pub fn split_list(text: &str, separators: &[char]) -> Vec<String> {
    text.split(|c| separators.contains(&c))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a comma-separated type list into a set.
pub fn parse_types(text: &str) -> BTreeSet<String> {
    split_list(text, &[',']).into_iter().collect()
}

/// Splits a multi-organism cell (`Homo sapiens; Mus musculus`).
pub fn split_organisms(text: &str) -> Vec<String> {
    split_list(text, &[';'])
}

/// Parses `name: value` pairs separated by semicolons.
///
/// A segment must contain exactly one colon and a non-empty name and value;
/// anything else is dropped. When a name repeats, the first value is kept.
pub fn parse_characteristics(text: &str) -> BTreeMap<String, String> {
    let mut characteristics = BTreeMap::new();
    for segment in text.split(';') {
        let mut parts = segment.split(':');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        characteristics
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }
    characteristics
}

/// Parses a contributor written as `Last, First Middle`.
pub fn parse_contributor_name(text: &str) -> Option<ContributorName> {
    let captures = CONTRIBUTOR_NAME_PATTERN.captures(text.trim())?;
    Some(ContributorName {
        last: captures.get(1)?.as_str().to_string(),
        first: captures.get(2)?.as_str().to_string(),
        middle: captures.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Builds a contributor from free text, using name components when the
/// `Last, First Middle` pattern matches and the whole text otherwise.
pub fn contributor_from_text(text: &str) -> Contributor {
    match parse_contributor_name(text) {
        Some(parts) => Contributor::from_name_parts(parts),
        None => Contributor::named(text.trim()),
    }
}

/// Parses the GEOmetadb `First,Middle,Last` name form.
fn parse_comma_name(text: &str) -> Option<ContributorName> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [first, middle, last] = parts.as_slice() else {
        return None;
    };
    if first.is_empty() && last.is_empty() {
        return None;
    }
    Some(ContributorName {
        first: (*first).to_string(),
        middle: (!middle.is_empty()).then(|| (*middle).to_string()),
        last: (*last).to_string(),
    })
}

fn named_contributor(name: &str) -> Contributor {
    match parse_comma_name(name) {
        Some(parts) => Contributor::from_name_parts(parts),
        None => Contributor::named(name),
    }
}

fn set_attribute(contributor: &mut Contributor, attribute: &str, value: String) {
    let slot = match attribute {
        "Email" => &mut contributor.email,
        "Phone" => &mut contributor.phone,
        "Fax" => &mut contributor.fax,
        "Laboratory" => &mut contributor.laboratory,
        "Department" => &mut contributor.department,
        "Institute" => &mut contributor.institute,
        "Address" => &mut contributor.address,
        "City" => &mut contributor.city,
        "State" => &mut contributor.state,
        "Zip/postal-code" => &mut contributor.zip_or_postal_code,
        "Country" => &mut contributor.country,
        "Web_link" => &mut contributor.web_link,
        _ => return,
    };
    *slot = Some(value);
}

fn finish_record(fields: &mut BTreeMap<&str, String>, contributors: &mut Vec<Contributor>) {
    let mut record = std::mem::take(fields);
    let Some(name) = record.remove("Name") else {
        if !record.is_empty() {
            tracing::debug!(attributes = record.len(), "dropping contact record without a name");
        }
        return;
    };
    let mut contributor = named_contributor(&name);
    for (attribute, value) in record {
        set_attribute(&mut contributor, attribute, value);
    }
    contributors.push(contributor);
}

/// Parses attributed contact records (`Name: ...; Email: ...`).
///
/// Fields are separated by `;` when the text contains one and by `,`
/// otherwise. Each field splits on its first colon, so values may contain
/// colons. Unrecognised attributes are ignored. A new record starts when
/// `Name` appears or an attribute repeats, and records without a `Name`
/// are dropped.
pub fn parse_contact_records(text: &str) -> Vec<Contributor> {
    let separator = if text.contains(';') { ';' } else { ',' };
    let mut contributors = Vec::new();
    let mut fields: BTreeMap<&str, String> = BTreeMap::new();

    for field in text.split(separator) {
        let Some((attribute, value)) = field.split_once(':') else {
            continue;
        };
        let (attribute, value) = (attribute.trim(), value.trim());
        let Some(attribute) = CONTACT_ATTRIBUTES.iter().copied().find(|a| *a == attribute) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if fields.contains_key(attribute) || (attribute == "Name" && !fields.is_empty()) {
            finish_record(&mut fields, &mut contributors);
        }
        fields.insert(attribute, value.to_string());
    }
    finish_record(&mut fields, &mut contributors);
    contributors
}

fn has_contact_attribute(text: &str) -> bool {
    text.split([';', ','])
        .filter_map(|field| field.split_once(':'))
        .any(|(attribute, _)| CONTACT_ATTRIBUTES.contains(&attribute.trim()))
}

/// Parses a contributor column.
///
/// Attributed text is read as contact records. Otherwise each
/// `;`-separated entry is a `First,Middle,Last` name (or a plain name).
pub fn parse_contributors(text: &str) -> Vec<Contributor> {
    if has_contact_attribute(text) {
        return parse_contact_records(text);
    }
    split_list(text, &[';'])
        .iter()
        .map(|entry| named_contributor(entry))
        .collect()
}

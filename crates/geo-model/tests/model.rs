//! Tests for geo-model types.

use std::collections::{BTreeMap, BTreeSet};

use geo_model::{
    ModelError, PerChannelSampleInfo, Platform, Protocol, Sample, Series, SubmissionMetadata,
};

fn platform(id: Option<&str>) -> Platform {
    Platform {
        id: id.map(str::to_string),
        title: "Affymetrix Human Genome U133A".to_string(),
        distribution: "commercial".to_string(),
        technology: "in situ oligonucleotide".to_string(),
        organism: "Homo sapiens".to_string(),
        manufacturer: Some("Affymetrix".to_string()),
        manufacture_protocol: Vec::new(),
        description: Vec::new(),
        catalog_number: None,
        web_link: None,
        support: None,
        coating: None,
        contributors: Vec::new(),
        pubmed_ids: Vec::new(),
    }
}

fn sample(id: &str, platform_id: &str) -> Sample {
    Sample {
        series_id: Some("GSE100".to_string()),
        id: id.to_string(),
        title: format!("{id} title"),
        label: None,
        description: None,
        platform_id: platform_id.to_string(),
        per_channel: BTreeMap::from([(
            1,
            PerChannelSampleInfo {
                channel: 1,
                source_name: "liver".to_string(),
                organisms: vec!["Homo sapiens".to_string()],
                characteristics: BTreeMap::new(),
                molecule: "total RNA".to_string(),
                label: None,
                treatment_protocol: None,
                extract_protocol: None,
                label_protocol: None,
            },
        )]),
        biomaterial_provider: None,
        raw_data_files: Vec::new(),
        cel_file: None,
        exp_file: None,
        chp_file: None,
        status: None,
        types: BTreeSet::new(),
        data_processing: None,
        hybridization_protocol: None,
        supplementary_files: Vec::new(),
    }
}

fn submission(samples: &[(&str, &str)], platforms: Vec<Platform>) -> SubmissionMetadata {
    SubmissionMetadata::new(
        Series::titled("Liver study").with_id("GSE100"),
        samples
            .iter()
            .map(|(id, gpl)| ((*id).to_string(), sample(id, gpl)))
            .collect(),
        None,
        platforms,
    )
}

#[test]
fn valid_submission_passes() {
    let metadata = submission(
        &[("GSM1", "GPL96"), ("GSM2", "GPL96")],
        vec![platform(Some("GPL96"))],
    );
    assert!(metadata.validate().is_ok());
    assert_eq!(metadata.series_id(), Some("GSE100"));
    assert!(metadata.platform("GPL96").is_some());
    assert!(metadata.platform("GPL97").is_none());
}

#[test]
fn empty_title_is_rejected() {
    let mut metadata = submission(&[("GSM1", "GPL96")], vec![platform(Some("GPL96"))]);
    metadata.series.title = "   ".to_string();
    assert_eq!(metadata.validate(), Err(ModelError::EmptySeriesTitle));
}

#[test]
fn duplicate_platform_is_rejected() {
    let metadata = submission(
        &[("GSM1", "GPL96")],
        vec![platform(Some("GPL96")), platform(Some("GPL96"))],
    );
    assert!(matches!(
        metadata.validate(),
        Err(ModelError::DuplicatePlatform { platform }) if platform == "GPL96"
    ));
}

#[test]
fn unresolved_platform_is_reported() {
    let metadata = submission(
        &[("GSM1", "GPL96"), ("GSM2", "GPL570")],
        vec![platform(Some("GPL96"))],
    );
    assert_eq!(
        metadata.unresolved_platform_references(),
        vec![("GSM2", "GPL570")]
    );
    assert!(matches!(
        metadata.validate(),
        Err(ModelError::UnresolvedPlatform { sample, platform })
            if sample == "GSM2" && platform == "GPL570"
    ));
}

#[test]
fn template_submission_without_platform_section_is_valid() {
    let mut metadata = submission(&[("liver-1", "Affy U133A")], Vec::new());
    metadata.protocol = Some(Protocol::default());
    assert!(metadata.validate().is_ok());
}

#[test]
fn unidentified_platform_satisfies_free_form_references() {
    let mut metadata = submission(&[("liver-1", "Affy U133A")], vec![platform(None)]);
    metadata.protocol = Some(Protocol::default());
    assert!(metadata.unresolved_platform_references().is_empty());
    assert!(metadata.validate().is_ok());
}

#[test]
fn submission_serializes_to_json() {
    let metadata = submission(&[("GSM1", "GPL96")], vec![platform(Some("GPL96"))]);
    let json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json["series"]["id"], "GSE100");
    assert_eq!(json["samples"]["GSM1"]["platform_id"], "GPL96");
    assert_eq!(json["platforms"][0]["id"], "GPL96");
    assert!(json["protocol"].is_null());

    let back: SubmissionMetadata = serde_json::from_value(json).unwrap();
    assert_eq!(back, metadata);
}

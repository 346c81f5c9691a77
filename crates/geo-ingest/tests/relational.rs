//! Tests for relational snapshot assembly.

use std::cell::RefCell;
use std::collections::BTreeMap;

use geo_ingest::{
    ErrorPolicy, IngestError, MemorySource, MetadataSource, PlatformCache, RawRow,
    RelationalAssembler, RelationalOptions, Result, SqliteSource, assemble_submissions, raw_row,
};
use rusqlite::{Connection, params};
use tempfile::TempDir;

fn series_row(gse: &str) -> RawRow {
    raw_row([
        ("gse", gse),
        ("title", "Liver expression study"),
        ("summary", "Expression profiles of liver tissue."),
        ("type", "Expression profiling by array"),
    ])
}

fn sample_row(gsm: &str, gse: &str, gpl: &str) -> RawRow {
    raw_row([
        ("gsm", gsm),
        ("series_id", gse),
        ("gpl", gpl),
        ("title", "liver sample"),
        ("channel_count", "1"),
        ("source_name_ch1", "liver"),
        ("organism_ch1", "Homo sapiens"),
        ("characteristics_ch1", "tissue: liver; age: 45"),
        ("molecule_ch1", "total RNA"),
        ("label_ch1", "biotin"),
    ])
}

fn platform_row(gpl: &str) -> RawRow {
    raw_row([
        ("gpl", gpl),
        ("title", "Affymetrix Human Genome U133A Array"),
        ("technology", "in situ oligonucleotide"),
        ("distribution", "commercial"),
        ("organism", "Homo sapiens"),
        ("manufacturer", "Affymetrix"),
    ])
}

/// Three series: GSE1 and GSE2 share GPL96, GSE3 has no samples.
fn fixture() -> MemorySource {
    MemorySource::new()
        .with_series(series_row("GSE1"))
        .with_series(series_row("GSE2"))
        .with_series(series_row("GSE3"))
        .with_sample(sample_row("GSM1", "GSE1", "GPL96"))
        .with_sample(sample_row("GSM2", "GSE1", "GPL570"))
        .with_sample(sample_row("GSM3", "GSE2", "GPL96"))
        .with_platform(platform_row("GPL96"))
        .with_platform(platform_row("GPL570"))
}

/// Records how often each platform is looked up.
struct CountingSource {
    inner: MemorySource,
    platform_lookups: RefCell<BTreeMap<String, usize>>,
}

impl CountingSource {
    fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            platform_lookups: RefCell::new(BTreeMap::new()),
        }
    }

    fn lookups(&self, gpl: &str) -> usize {
        self.platform_lookups.borrow().get(gpl).copied().unwrap_or(0)
    }
}

impl MetadataSource for CountingSource {
    fn series_ids(&self) -> Result<Vec<String>> {
        self.inner.series_ids()
    }

    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>> {
        self.inner.sample_rows(series_ids)
    }

    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>> {
        self.inner.series_rows(series_id)
    }

    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>> {
        *self
            .platform_lookups
            .borrow_mut()
            .entry(platform_id.to_string())
            .or_default() += 1;
        self.inner.platform_rows(platform_id)
    }
}

/// Lists series ids that have no row in the series table ahead of the real ones.
struct ListingSource {
    inner: MemorySource,
    unlisted: Vec<String>,
}

impl MetadataSource for ListingSource {
    fn series_ids(&self) -> Result<Vec<String>> {
        let mut ids = self.unlisted.clone();
        ids.extend(self.inner.series_ids()?);
        Ok(ids)
    }

    fn sample_rows(&self, series_ids: &[String]) -> Result<Vec<RawRow>> {
        self.inner.sample_rows(series_ids)
    }

    fn series_rows(&self, series_id: &str) -> Result<Vec<RawRow>> {
        self.inner.series_rows(series_id)
    }

    fn platform_rows(&self, platform_id: &str) -> Result<Vec<RawRow>> {
        self.inner.platform_rows(platform_id)
    }
}

#[test]
fn assembles_one_submission_per_series_with_samples() {
    let mut cache = PlatformCache::new();
    let submissions =
        assemble_submissions(&fixture(), 0, 3, &mut cache, &RelationalOptions::default()).unwrap();

    assert_eq!(submissions.len(), 2);
    let first = &submissions[0];
    assert_eq!(first.series_id(), Some("GSE1"));
    assert_eq!(first.samples.len(), 2);
    assert!(first.protocol.is_none());
    let platform_ids: Vec<_> = first.platforms.iter().map(|p| p.id.as_deref()).collect();
    assert_eq!(platform_ids, vec![Some("GPL96"), Some("GPL570")]);

    let sample = &first.samples["GSM1"];
    assert_eq!(sample.series_id.as_deref(), Some("GSE1"));
    assert_eq!(sample.per_channel[&1].characteristics["tissue"], "liver");
    assert_eq!(sample.label.as_deref(), Some("biotin"));

    assert_eq!(submissions[1].series_id(), Some("GSE2"));
    assert!(first.validate().is_ok());
}

#[test]
fn shared_platform_is_fetched_once() {
    let source = CountingSource::new(fixture());
    let mut cache = PlatformCache::new();
    assemble_submissions(&source, 0, 3, &mut cache, &RelationalOptions::default()).unwrap();

    assert_eq!(source.lookups("GPL96"), 1);
    assert_eq!(source.lookups("GPL570"), 1);
    assert_eq!(cache.fetch_count(), 2);

    // A cache carried into a second call keeps serving the same platforms.
    assemble_submissions(&source, 1, 1, &mut cache, &RelationalOptions::default()).unwrap();
    assert_eq!(source.lookups("GPL96"), 1);
}

#[test]
fn assembler_starts_each_run_with_an_empty_cache() {
    let source = CountingSource::new(fixture());
    let assembler = RelationalAssembler::new(&source);
    assembler.assemble(0, 3).unwrap();
    assembler.assemble(0, 3).unwrap();
    assert_eq!(source.lookups("GPL96"), 2);
}

#[test]
fn series_without_samples_is_skipped() {
    let mut cache = PlatformCache::new();
    let submissions =
        assemble_submissions(&fixture(), 2, 1, &mut cache, &RelationalOptions::default()).unwrap();
    assert!(submissions.is_empty());
}

#[test]
fn duplicate_sample_within_series_is_rejected() {
    let source = fixture().with_sample(sample_row("GSM1", "GSE1", "GPL96"));
    let mut cache = PlatformCache::new();
    let result = assemble_submissions(&source, 0, 1, &mut cache, &RelationalOptions::default());
    assert!(matches!(
        result,
        Err(IngestError::DuplicateKey { ref table, ref key, .. }) if table == "gsm" && key == "GSM1"
    ));
}

#[test]
fn slice_of_maximum_size_is_accepted() {
    let options = RelationalOptions::default().with_max_slice_size(3);
    let mut cache = PlatformCache::new();
    assert!(assemble_submissions(&fixture(), 0, 3, &mut cache, &options).is_ok());

    let result = assemble_submissions(&fixture(), 0, 4, &mut cache, &options);
    assert!(matches!(
        result,
        Err(IngestError::SliceTooLarge {
            requested: 4,
            max: 3
        })
    ));
}

#[test]
fn default_slice_limit_is_one_thousand() {
    let options = RelationalOptions::default();
    let mut cache = PlatformCache::new();
    let submissions = assemble_submissions(&fixture(), 0, 1000, &mut cache, &options).unwrap();
    assert_eq!(submissions.len(), 2);

    let err = assemble_submissions(&fixture(), 0, 1001, &mut cache, &options).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"cannot extract 1001 series in one slice; at most 1000 are allowed");
}

#[test]
fn slice_past_the_end_is_empty() {
    let mut cache = PlatformCache::new();
    let submissions =
        assemble_submissions(&fixture(), 10, 5, &mut cache, &RelationalOptions::default())
            .unwrap();
    assert!(submissions.is_empty());
}

#[test]
fn missing_platform_aborts_by_default() {
    let source = fixture().with_sample(sample_row("GSM9", "GSE2", "GPL1"));
    let mut cache = PlatformCache::new();
    let result = assemble_submissions(&source, 0, 3, &mut cache, &RelationalOptions::default());
    assert!(matches!(
        result,
        Err(IngestError::PlatformNotFound { ref platform, ref series })
            if platform == "GPL1" && series == "GSE2"
    ));
}

#[test]
fn skip_policy_continues_past_invalid_series() {
    let source = fixture().with_sample(sample_row("GSM9", "GSE1", "GPL1"));
    let options = RelationalOptions::default().with_error_policy(ErrorPolicy::SkipSeries);
    let mut cache = PlatformCache::new();
    let submissions = assemble_submissions(&source, 0, 3, &mut cache, &options).unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].series_id(), Some("GSE2"));
}

#[test]
fn listed_series_without_a_row_is_reported() {
    let source = ListingSource {
        inner: fixture(),
        unlisted: vec!["GSE0".to_string()],
    };
    let mut cache = PlatformCache::new();
    let err = assemble_submissions(&source, 0, 4, &mut cache, &RelationalOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::SeriesNotFound { ref series } if series == "GSE0"));
    assert!(err.is_data_error());

    let options = RelationalOptions::default().with_error_policy(ErrorPolicy::SkipSeries);
    let submissions = assemble_submissions(&source, 0, 4, &mut cache, &options).unwrap();
    let ids: Vec<_> = submissions.iter().map(|s| s.series_id()).collect();
    assert_eq!(ids, vec![Some("GSE1"), Some("GSE2")]);
}

#[test]
fn duplicate_series_rows_are_rejected() {
    let source = fixture().with_series(series_row("GSE2"));
    let mut cache = PlatformCache::new();
    let result = assemble_submissions(&source, 1, 1, &mut cache, &RelationalOptions::default());
    assert!(matches!(
        result,
        Err(IngestError::DuplicateSeries { count: 2, .. })
    ));
}

#[test]
fn duplicate_platform_rows_are_rejected() {
    let source = fixture().with_platform(platform_row("GPL570"));
    let mut cache = PlatformCache::new();
    let result = assemble_submissions(&source, 0, 1, &mut cache, &RelationalOptions::default());
    assert!(matches!(
        result,
        Err(IngestError::DuplicatePlatform { ref platform, .. }) if platform == "GPL570"
    ));
}

#[test]
fn missing_required_series_field_is_reported() {
    let source = MemorySource::new()
        .with_series(raw_row([("gse", "GSE1"), ("summary", "no title")]))
        .with_sample(sample_row("GSM1", "GSE1", "GPL96"))
        .with_platform(platform_row("GPL96"));
    let mut cache = PlatformCache::new();
    let err = assemble_submissions(&source, 0, 1, &mut cache, &RelationalOptions::default())
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required field 'title' in table gse, row 1 (GSE1)");
}

const SCHEMA: &str = "
    CREATE TABLE gse (gse TEXT, title TEXT, summary TEXT, type TEXT, contributor TEXT,
                      pubmed_id INTEGER, overall_design TEXT);
    CREATE TABLE gsm (gsm TEXT, series_id TEXT, gpl TEXT, title TEXT, channel_count INTEGER,
                      source_name_ch1 TEXT, organism_ch1 TEXT, characteristics_ch1 TEXT,
                      molecule_ch1 TEXT, label_ch1 TEXT,
                      source_name_ch2 TEXT, organism_ch2 TEXT, molecule_ch2 TEXT, label_ch2 TEXT);
    CREATE TABLE gpl (gpl TEXT, title TEXT, technology TEXT, distribution TEXT, organism TEXT,
                      contact TEXT);
";

fn populate(connection: &Connection) {
    connection.execute_batch(SCHEMA).unwrap();
    connection
        .execute(
            "INSERT INTO gse VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                "GSE10",
                "Two-colour liver study",
                "Liver against reference.",
                "Expression profiling by array",
                "John,,Doe;Jane,M,Smith",
                16_000_001,
                "  "
            ],
        )
        .unwrap();
    connection
        .execute(
            "INSERT INTO gsm VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                "GSM100",
                "GSE10",
                "GPL5",
                "liver vs reference",
                2,
                "liver",
                "Homo sapiens",
                "tissue: liver;\tsex: female",
                "total RNA",
                "Cy5",
                "reference pool",
                "Homo sapiens",
                "total RNA",
                "Cy3"
            ],
        )
        .unwrap();
    connection
        .execute(
            "INSERT INTO gpl VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                "GPL5",
                "Custom cDNA array",
                "spotted DNA/cDNA",
                "non-commercial",
                "Homo sapiens",
                "Name: Ann,,Lee;\tEmail: ann@example.org;\tCountry: Norway"
            ],
        )
        .unwrap();
}

#[test]
fn sqlite_snapshot_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("GEOmetadb.sqlite");
    populate(&Connection::open(&path).unwrap());

    let source = SqliteSource::open(&path).unwrap();
    let submissions = RelationalAssembler::new(source).assemble(0, 10).unwrap();
    assert_eq!(submissions.len(), 1);

    let submission = &submissions[0];
    assert_eq!(submission.series.title, "Two-colour liver study");
    assert_eq!(submission.series.pubmed_ids, vec!["16000001"]);
    assert!(submission.series.overall_design.is_empty());
    assert_eq!(submission.series.contributors.len(), 2);
    assert_eq!(submission.series.contributors[0].name, "John Doe");

    let sample = &submission.samples["GSM100"];
    assert_eq!(sample.channel_count(), 2);
    assert_eq!(sample.labels()[&1], "Cy5");
    assert_eq!(sample.labels()[&2], "Cy3");
    assert_eq!(sample.per_channel[&1].characteristics["sex"], "female");
    assert_eq!(sample.source_names()[&2], "reference pool");

    let platform = submission.platform("GPL5").unwrap();
    assert_eq!(platform.contributors.len(), 1);
    assert_eq!(platform.contributors[0].country.as_deref(), Some("Norway"));
}

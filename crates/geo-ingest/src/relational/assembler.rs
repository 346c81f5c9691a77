//! Submission assembly from a relational snapshot.

use std::collections::{BTreeMap, BTreeSet};

use geo_model::{PerChannelSampleInfo, Platform, Sample, Series, SubmissionMetadata};

use crate::error::{IngestError, Result};
use crate::location::Location;
use crate::text::{
    parse_characteristics, parse_contact_records, parse_contributors, parse_types, split_list,
    split_organisms,
};

use super::cache::PlatformCache;
use super::names;
use super::rows::{TableRow, extract_table_rows};
use super::source::{MetadataSource, RawRow};

/// How series-level data errors are handled during a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Propagate the first failure.
    #[default]
    Abort,
    /// Log data errors and continue with the next series.
    SkipSeries,
}

/// Options for relational assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalOptions {
    /// Largest slice accepted by one call.
    pub max_slice_size: usize,
    pub error_policy: ErrorPolicy,
}

impl Default for RelationalOptions {
    fn default() -> Self {
        Self {
            max_slice_size: names::MAX_SERIES_PER_SLICE,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl RelationalOptions {
    #[must_use]
    pub fn with_max_slice_size(mut self, max_slice_size: usize) -> Self {
        self.max_slice_size = max_slice_size;
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

/// Assembles the submissions for series `[start, start + count)` of the
/// source's ordered series list.
///
/// Samples for the whole slice are fetched in one batched read. Platforms
/// are resolved through `cache`, so a platform shared by several series is
/// fetched once per cache. Series without samples are skipped. The end of
/// the range is clamped to the number of series.
///
/// # Errors
///
/// Returns [`IngestError::SliceTooLarge`] if `count` exceeds
/// `options.max_slice_size`. Series-level failures are returned or skipped
/// according to `options.error_policy`; infrastructure errors always abort.
pub fn assemble_submissions<S: MetadataSource + ?Sized>(
    source: &S,
    start: usize,
    count: usize,
    cache: &mut PlatformCache,
    options: &RelationalOptions,
) -> Result<Vec<SubmissionMetadata>> {
    if count > options.max_slice_size {
        return Err(IngestError::SliceTooLarge {
            requested: count,
            max: options.max_slice_size,
        });
    }

    let series_ids = source.series_ids()?;
    tracing::info!(count = series_ids.len(), "found series");

    let end = start.saturating_add(count).min(series_ids.len());
    if start >= end {
        tracing::info!(start, count, available = series_ids.len(), "slice is empty");
        return Ok(Vec::new());
    }
    let slice = &series_ids[start..end];

    tracing::info!(start, count = slice.len(), "extracting samples for series slice");
    let mut sample_rows = group_by_series(source.sample_rows(slice)?)?;
    tracing::info!(series = sample_rows.len(), "extracted samples");

    let mut submissions = Vec::with_capacity(slice.len());
    for gse in slice {
        let rows = sample_rows.remove(gse).unwrap_or_default();
        match assemble_series(source, gse, rows, cache) {
            Ok(Some(submission)) => submissions.push(submission),
            Ok(None) => {}
            Err(err)
                if options.error_policy == ErrorPolicy::SkipSeries && err.is_data_error() =>
            {
                tracing::warn!(series = %gse, error = %err, "skipping invalid series");
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        submissions = submissions.len(),
        platforms = cache.len(),
        "assembled submissions"
    );
    Ok(submissions)
}

/// Relational assembly bound to one source and option set.
///
/// Each call to [`RelationalAssembler::assemble`] is an independent run with
/// its own platform cache.
pub struct RelationalAssembler<S> {
    source: S,
    options: RelationalOptions,
}

impl<S: MetadataSource> RelationalAssembler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: RelationalOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RelationalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &RelationalOptions {
        &self.options
    }

    pub fn assemble(&self, start: usize, count: usize) -> Result<Vec<SubmissionMetadata>> {
        let mut cache = PlatformCache::new();
        assemble_submissions(&self.source, start, count, &mut cache, &self.options)
    }
}

fn group_by_series(rows: Vec<RawRow>) -> Result<BTreeMap<String, Vec<RawRow>>> {
    let mut grouped: BTreeMap<String, Vec<RawRow>> = BTreeMap::new();
    for (index, row) in rows.into_iter().enumerate() {
        let trimmed = |column: &str| {
            row.get(column)
                .and_then(Option::as_deref)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let Some(gse) = trimmed(names::SAMPLE_SERIES_ID) else {
            return Err(IngestError::MissingRequiredField {
                field: names::SAMPLE_SERIES_ID.to_string(),
                location: Location::Row {
                    table: names::SAMPLE_TABLE.to_string(),
                    row: index + 1,
                    key: trimmed(names::SAMPLE_GSM),
                },
            });
        };
        grouped.entry(gse).or_default().push(row);
    }
    Ok(grouped)
}

fn assemble_series<S: MetadataSource + ?Sized>(
    source: &S,
    gse: &str,
    sample_rows: Vec<RawRow>,
    cache: &mut PlatformCache,
) -> Result<Option<SubmissionMetadata>> {
    let _span = tracing::debug_span!("series", series = %gse).entered();
    let series_row = fetch_series_row(source, gse)?;

    if sample_rows.is_empty() {
        tracing::info!(series = %gse, "no samples for series; skipping");
        return Ok(None);
    }

    let rows = extract_table_rows(
        sample_rows,
        names::SAMPLE_TABLE,
        names::SAMPLE_GSM,
        names::SAMPLE_COLUMNS,
    )?;

    let mut samples = BTreeMap::new();
    let mut platforms = Vec::new();
    let mut platform_ids = BTreeSet::new();
    for row in &rows {
        let sample = sample_from_row(gse, row)?;
        if platform_ids.insert(sample.platform_id.clone()) {
            let platform = cache.get_or_fetch(&sample.platform_id, || {
                fetch_platform(source, &sample.platform_id, gse)
            })?;
            platforms.push(platform.clone());
        }
        samples.insert(sample.id.clone(), sample);
    }

    let series = series_from_row(&series_row)?;
    let submission = SubmissionMetadata::new(series, samples, None, platforms);
    submission.validate()?;

    tracing::debug!(
        samples = submission.samples.len(),
        platforms = submission.platforms.len(),
        "assembled series"
    );
    Ok(Some(submission))
}

fn fetch_series_row<S: MetadataSource + ?Sized>(source: &S, gse: &str) -> Result<TableRow> {
    let rows = source.series_rows(gse)?;
    if rows.len() > 1 {
        return Err(IngestError::DuplicateSeries {
            series: gse.to_string(),
            count: rows.len(),
        });
    }
    extract_table_rows(
        rows,
        names::SERIES_TABLE,
        names::SERIES_GSE,
        names::SERIES_COLUMNS,
    )?
    .pop()
    .ok_or_else(|| IngestError::SeriesNotFound {
        series: gse.to_string(),
    })
}

fn fetch_platform<S: MetadataSource + ?Sized>(
    source: &S,
    gpl: &str,
    gse: &str,
) -> Result<Platform> {
    let rows = source.platform_rows(gpl)?;
    if rows.len() > 1 {
        return Err(IngestError::DuplicatePlatform {
            platform: gpl.to_string(),
            series: gse.to_string(),
            count: rows.len(),
        });
    }
    let row = extract_table_rows(
        rows,
        names::PLATFORM_TABLE,
        names::PLATFORM_GPL,
        names::PLATFORM_COLUMNS,
    )?
    .pop()
    .ok_or_else(|| IngestError::PlatformNotFound {
        platform: gpl.to_string(),
        series: gse.to_string(),
    })?;
    platform_from_row(&row)
}

fn optional_list(row: &TableRow, column: &str) -> Vec<String> {
    row.optional(column).into_iter().collect()
}

fn file_list(row: &TableRow, column: &str) -> Vec<String> {
    row.get(column)
        .map(|text| split_list(text, &[',', ';']))
        .unwrap_or_default()
}

fn series_from_row(row: &TableRow) -> Result<Series> {
    Ok(Series {
        id: Some(row.required(names::SERIES_GSE)?.to_string()),
        title: row.required(names::SERIES_TITLE)?.to_string(),
        summary: vec![row.required(names::SERIES_SUMMARY)?.to_string()],
        overall_design: optional_list(row, names::SERIES_OVERALL_DESIGN),
        contributors: row
            .get(names::SERIES_CONTRIBUTOR)
            .map(parse_contributors)
            .unwrap_or_default(),
        pubmed_ids: file_list(row, names::SERIES_PUBMED_ID),
        variables: BTreeMap::new(),
        repeats: BTreeMap::new(),
        types: row
            .get(names::SERIES_TYPE)
            .map(parse_types)
            .unwrap_or_default(),
        web_link: row.optional(names::SERIES_WEB_LINK),
        contact: row
            .get(names::SERIES_CONTACT)
            .and_then(|text| parse_contact_records(text).into_iter().next()),
        supplementary_files: file_list(row, names::SERIES_SUPPLEMENTARY_FILE),
    })
}

/// Channel 2 is present when the sample declares two channels or fills any `_ch2` column.
fn has_channel(row: &TableRow, channel: u32) -> bool {
    if channel == 1 {
        return true;
    }
    let declared = row
        .get(names::SAMPLE_CHANNEL_COUNT)
        .and_then(|count| count.parse::<f64>().ok())
        .is_some_and(|count| count >= f64::from(channel));
    declared
        || names::CHANNEL_COLUMN_BASES
            .iter()
            .any(|base| row.get(&names::channel_column(base, channel)).is_some())
}

fn channel_from_row(row: &TableRow, channel: u32) -> Result<PerChannelSampleInfo> {
    let column = |base: &str| names::channel_column(base, channel);
    Ok(PerChannelSampleInfo {
        channel,
        source_name: row
            .required(&column(names::CHANNEL_SOURCE_NAME))?
            .to_string(),
        organisms: split_organisms(row.required(&column(names::CHANNEL_ORGANISM))?),
        characteristics: row
            .get(&column(names::CHANNEL_CHARACTERISTICS))
            .map(parse_characteristics)
            .unwrap_or_default(),
        molecule: row.required(&column(names::CHANNEL_MOLECULE))?.to_string(),
        label: row.optional(&column(names::CHANNEL_LABEL)),
        treatment_protocol: row.optional(&column(names::CHANNEL_TREATMENT_PROTOCOL)),
        extract_protocol: row.optional(&column(names::CHANNEL_EXTRACT_PROTOCOL)),
        label_protocol: row.optional(&column(names::CHANNEL_LABEL_PROTOCOL)),
    })
}

fn sample_from_row(gse: &str, row: &TableRow) -> Result<Sample> {
    let mut per_channel = BTreeMap::new();
    for channel in [1, 2] {
        if has_channel(row, channel) {
            per_channel.insert(channel, channel_from_row(row, channel)?);
        }
    }

    Ok(Sample {
        series_id: Some(gse.to_string()),
        id: row.required(names::SAMPLE_GSM)?.to_string(),
        title: row.required(names::SAMPLE_TITLE)?.to_string(),
        label: row.optional(&names::channel_column(names::CHANNEL_LABEL, 1)),
        description: row.optional(names::SAMPLE_DESCRIPTION),
        platform_id: row.required(names::SAMPLE_GPL)?.to_string(),
        per_channel,
        biomaterial_provider: None,
        raw_data_files: Vec::new(),
        cel_file: None,
        exp_file: None,
        chp_file: None,
        status: row.optional(names::SAMPLE_STATUS),
        types: row
            .get(names::SAMPLE_TYPE)
            .map(parse_types)
            .unwrap_or_default(),
        data_processing: row.optional(names::SAMPLE_DATA_PROCESSING),
        hybridization_protocol: row.optional(names::SAMPLE_HYB_PROTOCOL),
        supplementary_files: file_list(row, names::SAMPLE_SUPPLEMENTARY_FILE),
    })
}

fn platform_from_row(row: &TableRow) -> Result<Platform> {
    Ok(Platform {
        id: Some(row.required(names::PLATFORM_GPL)?.to_string()),
        title: row.required(names::PLATFORM_TITLE)?.to_string(),
        distribution: row.required(names::PLATFORM_DISTRIBUTION)?.to_string(),
        technology: row.required(names::PLATFORM_TECHNOLOGY)?.to_string(),
        organism: row.required(names::PLATFORM_ORGANISM)?.to_string(),
        manufacturer: row.optional(names::PLATFORM_MANUFACTURER),
        manufacture_protocol: optional_list(row, names::PLATFORM_MANUFACTURE_PROTOCOL),
        description: optional_list(row, names::PLATFORM_DESCRIPTION),
        catalog_number: row.optional(names::PLATFORM_CATALOG_NUMBER),
        web_link: row.optional(names::PLATFORM_WEB_LINK),
        support: row.optional(names::PLATFORM_SUPPORT),
        coating: row.optional(names::PLATFORM_COATING),
        contributors: row
            .get(names::PLATFORM_CONTACT)
            .map(parse_contributors)
            .unwrap_or_default(),
        pubmed_ids: Vec::new(),
    })
}

//! Submission assembly from a metadata template sheet.

use std::collections::BTreeMap;
use std::path::Path;

use geo_model::{PerChannelSampleInfo, Platform, Protocol, Sample, Series, SubmissionMetadata};

use crate::error::{IngestError, Result};
use crate::location::Location;
use crate::text::{contributor_from_text, split_organisms};

use super::grid::{SampleEntry, parse_sample_block};
use super::loader::{TemplateFormat, read_workbook};
use super::locator::{FieldBlock, FieldRows, find_header_row, find_header_row_from};
use super::names;
use super::sheet::{Sheet, Workbook, read_sheet_csv};

/// Options for template assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetOptions {
    /// Name of the sheet holding the metadata template.
    pub sheet_name: String,
}

impl Default for SpreadsheetOptions {
    fn default() -> Self {
        Self {
            sheet_name: names::DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl SpreadsheetOptions {
    #[must_use]
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }
}

/// Assembles the submission described by a template sheet.
///
/// SERIES, PROTOCOLS and SAMPLES are required sections; PLATFORM is
/// optional. The result carries a protocol and at most one platform.
pub fn assemble_from_sheet<S: Sheet + ?Sized>(sheet: &S) -> Result<SubmissionMetadata> {
    let series = extract_series(sheet)?;
    let samples = extract_samples(sheet)?;
    let protocol = extract_protocol(sheet)?;
    let platforms: Vec<Platform> = extract_platform(sheet)?.into_iter().collect();

    let submission = SubmissionMetadata::new(series, samples, Some(protocol), platforms);
    submission.validate()?;

    tracing::info!(
        sheet = sheet.name(),
        samples = submission.samples.len(),
        platforms = submission.platforms.len(),
        "assembled template submission"
    );
    Ok(submission)
}

/// Assembles the submission from the template sheet of a workbook.
pub fn assemble_from_workbook(
    workbook: &Workbook,
    options: &SpreadsheetOptions,
) -> Result<SubmissionMetadata> {
    assemble_from_sheet(workbook.sheet(&options.sheet_name)?)
}

/// Assembles the submission from a CSV export of the template sheet.
pub fn read_template_csv(path: &Path, options: &SpreadsheetOptions) -> Result<SubmissionMetadata> {
    let sheet = read_sheet_csv(path, &options.sheet_name)?;
    assemble_from_sheet(&sheet)
}

/// Assembles the submission from the template sheet of a workbook file.
pub fn read_template_workbook(
    path: &Path,
    options: &SpreadsheetOptions,
) -> Result<SubmissionMetadata> {
    let workbook = read_workbook(path)?;
    assemble_from_workbook(&workbook, options)
}

/// Assembles the submission from a template file, choosing the reader by extension.
pub fn read_template(path: &Path, options: &SpreadsheetOptions) -> Result<SubmissionMetadata> {
    match TemplateFormat::from_path(path)? {
        TemplateFormat::Csv => read_template_csv(path, options),
        TemplateFormat::Workbook => read_template_workbook(path, options),
    }
}

fn missing_section<S: Sheet + ?Sized>(sheet: &S, section: &str) -> IngestError {
    IngestError::MissingSection {
        sheet: sheet.name().to_string(),
        section: section.to_string(),
    }
}

fn empty_section<S: Sheet + ?Sized>(sheet: &S, section: &str) -> IngestError {
    IngestError::EmptySection {
        sheet: sheet.name().to_string(),
        section: section.to_string(),
    }
}

/// Collects the field block directly below a section header, if the header exists.
fn section_block<S: Sheet + ?Sized>(sheet: &S, section: &str) -> Result<Option<FieldBlock>> {
    section_block_with(sheet, section, |rows| rows)
}

fn section_block_with<'a, S, F>(
    sheet: &'a S,
    section: &str,
    configure: F,
) -> Result<Option<FieldBlock>>
where
    S: Sheet + ?Sized,
    F: FnOnce(FieldRows<'a, S>) -> FieldRows<'a, S>,
{
    let Some(header_row) = find_header_row(sheet, section, names::FIELD_NAME_COLUMN) else {
        return Ok(None);
    };
    let rows = configure(FieldRows::new(
        sheet,
        header_row + 1,
        names::FIELD_NAME_COLUMN,
        names::FIELD_VALUE_COLUMN,
    ));
    FieldBlock::collect(section, rows).map(Some)
}

fn required_block<S: Sheet + ?Sized>(sheet: &S, section: &str) -> Result<FieldBlock> {
    non_empty_block(sheet, section, section_block(sheet, section)?)
}

fn non_empty_block<S: Sheet + ?Sized>(
    sheet: &S,
    section: &str,
    block: Option<FieldBlock>,
) -> Result<FieldBlock> {
    let block = block.ok_or_else(|| missing_section(sheet, section))?;
    if block.is_empty() {
        return Err(empty_section(sheet, section));
    }
    Ok(block)
}

fn extract_series<S: Sheet + ?Sized>(sheet: &S) -> Result<Series> {
    let block = required_block(sheet, names::SERIES_HEADER)?;
    block.check_names(names::SERIES_FIELDS)?;

    let mut series = Series::titled(block.required_single(names::SERIES_TITLE)?);
    series.summary = block.values(names::SERIES_SUMMARY);
    series.overall_design = block.values(names::SERIES_OVERALL_DESIGN);
    series.contributors = block
        .values(names::SERIES_CONTRIBUTOR)
        .iter()
        .map(|text| contributor_from_text(text))
        .collect();
    series.pubmed_ids = block.values(names::SERIES_PUBMED_ID);
    series.web_link = block.optional_single(names::SERIES_WEB_LINK)?;
    Ok(series)
}

fn extract_protocol<S: Sheet + ?Sized>(sheet: &S) -> Result<Protocol> {
    // Template rows for unused protocols are left without a value.
    let block = section_block_with(
        sheet,
        names::PROTOCOLS_HEADER,
        FieldRows::skipping_blank_values,
    )?;
    let block = non_empty_block(sheet, names::PROTOCOLS_HEADER, block)?;

    let user_defined: BTreeMap<String, Vec<String>> = block
        .names()
        .into_iter()
        .filter(|name| !names::PROTOCOL_FIELDS.contains(name))
        .map(|name| (name.to_string(), block.values(name)))
        .collect();
    if !user_defined.is_empty() {
        tracing::debug!(fields = user_defined.len(), "user-defined protocol fields");
    }

    Ok(Protocol {
        growth: block.values(names::PROTOCOL_GROWTH),
        treatment: block.values(names::PROTOCOL_TREATMENT),
        extract: block.values(names::PROTOCOL_EXTRACT),
        label: block.values(names::PROTOCOL_LABEL),
        hybridization: block.values(names::PROTOCOL_HYB),
        scan: block.values(names::PROTOCOL_SCAN),
        data_processing: block.values(names::PROTOCOL_DATA_PROCESSING),
        value_definition: block.values(names::PROTOCOL_VALUE_DEFINITION),
        user_defined,
    })
}

fn extract_platform<S: Sheet + ?Sized>(sheet: &S) -> Result<Option<Platform>> {
    let Some(block) = section_block(sheet, names::PLATFORM_HEADER)? else {
        tracing::debug!("no platform section");
        return Ok(None);
    };
    if block.is_empty() {
        tracing::debug!("platform section has no fields");
        return Ok(None);
    }
    block.check_names(names::PLATFORM_FIELDS)?;

    Ok(Some(Platform {
        id: None,
        title: block.required_single(names::PLATFORM_TITLE)?,
        distribution: block.required_single(names::PLATFORM_DISTRIBUTION)?,
        technology: block.required_single(names::PLATFORM_TECHNOLOGY)?,
        organism: block.required_single(names::PLATFORM_ORGANISM)?,
        manufacturer: block.optional_single(names::PLATFORM_MANUFACTURER)?,
        manufacture_protocol: block.values(names::PLATFORM_MANUFACTURE_PROTOCOL),
        description: block.values(names::PLATFORM_DESCRIPTION),
        catalog_number: block.optional_single(names::PLATFORM_CATALOG_NUMBER)?,
        web_link: block.optional_single(names::PLATFORM_WEB_LINK)?,
        support: block.optional_single(names::PLATFORM_SUPPORT)?,
        coating: block.optional_single(names::PLATFORM_COATING)?,
        contributors: block
            .values(names::PLATFORM_CONTRIBUTOR)
            .iter()
            .map(|text| contributor_from_text(text))
            .collect(),
        pubmed_ids: block.values(names::PLATFORM_PUBMED_ID),
    }))
}

fn extract_samples<S: Sheet + ?Sized>(sheet: &S) -> Result<BTreeMap<String, Sample>> {
    let samples_row = find_header_row(sheet, names::SAMPLES_HEADER, names::FIELD_NAME_COLUMN)
        .ok_or_else(|| missing_section(sheet, names::SAMPLES_HEADER))?;
    let header_row = find_header_row_from(
        sheet,
        names::SAMPLE_NAME,
        names::FIELD_NAME_COLUMN,
        samples_row + 1,
    )
    .ok_or_else(|| missing_section(sheet, names::SAMPLE_NAME))?;

    let block = parse_sample_block(sheet, header_row)?;
    if block.samples.is_empty() {
        return Err(empty_section(sheet, names::SAMPLES_HEADER));
    }

    for header in &block.headers {
        if !names::SAMPLE_COLUMNS.contains(&header.as_str())
            && !header.starts_with(names::CHARACTERISTICS_PREFIX)
        {
            tracing::debug!(column = %header, "ignoring unrecognised sample column");
        }
    }

    let mut samples = BTreeMap::new();
    for entry in &block.samples {
        let sample = SampleFields::new(sheet.name(), entry).into_sample()?;
        samples.insert(sample.id.clone(), sample);
    }
    Ok(samples)
}

/// Field access for one sample row, with errors located in the SAMPLES section.
struct SampleFields<'a> {
    sheet: &'a str,
    entry: &'a SampleEntry,
}

impl<'a> SampleFields<'a> {
    fn new(sheet: &'a str, entry: &'a SampleEntry) -> Self {
        Self { sheet, entry }
    }

    fn location(&self) -> Location {
        Location::Section {
            sheet: self.sheet.to_string(),
            section: names::SAMPLES_HEADER.to_string(),
            entry: Some(self.entry.name.clone()),
        }
    }

    fn optional(&self, name: &str) -> Result<Option<String>> {
        let Some(field) = self.entry.field(name) else {
            return Ok(None);
        };
        match field.values.as_slice() {
            [] => Ok(None),
            [value] => Ok(Some(value.value.clone())),
            [_, second, ..] => Err(IngestError::UnexpectedMultipleValues {
                field: name.to_string(),
                count: field.values.len(),
                location: Location::Cell(second.cell.clone()),
            }),
        }
    }

    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)?
            .ok_or_else(|| IngestError::MissingRequiredField {
                field: name.to_string(),
                location: self.location(),
            })
    }

    fn characteristics(&self) -> Result<BTreeMap<String, String>> {
        let mut characteristics = BTreeMap::new();
        for field in &self.entry.fields {
            let Some(suffix) = field.name.strip_prefix(names::CHARACTERISTICS_PREFIX) else {
                continue;
            };
            let name = suffix.trim();
            let [first, rest @ ..] = field.values.as_slice() else {
                continue;
            };
            if characteristics.contains_key(name) {
                return Err(IngestError::RepeatedCharacteristic {
                    sample: self.entry.name.clone(),
                    characteristic: name.to_string(),
                    cell: first.cell.clone(),
                });
            }
            if !rest.is_empty() {
                return Err(IngestError::MultipleCharacteristicValues {
                    sample: self.entry.name.clone(),
                    characteristic: name.to_string(),
                    count: field.values.len(),
                });
            }
            characteristics.insert(name.to_string(), first.value.clone());
        }
        Ok(characteristics)
    }

    fn into_sample(self) -> Result<Sample> {
        let label = self.required(names::SAMPLE_LABEL)?;
        let channel = PerChannelSampleInfo {
            channel: geo_model::sample::SINGLE_CHANNEL,
            source_name: self.required(names::SAMPLE_SOURCE_NAME)?,
            organisms: split_organisms(&self.required(names::SAMPLE_ORGANISM)?),
            characteristics: self.characteristics()?,
            molecule: self.required(names::SAMPLE_MOLECULE)?,
            label: Some(label.clone()),
            treatment_protocol: None,
            extract_protocol: None,
            label_protocol: None,
        };

        Ok(Sample {
            series_id: None,
            id: self.entry.name.clone(),
            title: self.required(names::SAMPLE_TITLE)?,
            label: Some(label),
            description: self.optional(names::SAMPLE_DESCRIPTION)?,
            platform_id: self.required(names::SAMPLE_PLATFORM)?,
            per_channel: BTreeMap::from([(channel.channel, channel)]),
            biomaterial_provider: self.optional(names::SAMPLE_BIOMATERIAL_PROVIDER)?,
            raw_data_files: self.entry.values(names::SAMPLE_RAW_DATA_FILE),
            cel_file: self.optional(names::SAMPLE_CEL_FILE)?,
            exp_file: self.optional(names::SAMPLE_EXP_FILE)?,
            chp_file: self.optional(names::SAMPLE_CHP_FILE)?,
            status: None,
            types: Default::default(),
            data_processing: None,
            hybridization_protocol: None,
            supplementary_files: Vec::new(),
        })
    }
}

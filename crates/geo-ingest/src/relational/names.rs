//! GEOmetadb table and column names.
//!
//! Names are case-sensitive and must match the snapshot schema verbatim.

pub const SERIES_TABLE: &str = "gse";
pub const SAMPLE_TABLE: &str = "gsm";
pub const PLATFORM_TABLE: &str = "gpl";

/// Largest number of series whose samples are fetched in one batched query.
pub const MAX_SERIES_PER_SLICE: usize = 1000;

// === Series (gse) ===
pub const SERIES_TITLE: &str = "title";
pub const SERIES_GSE: &str = "gse";
pub const SERIES_STATUS: &str = "status";
pub const SERIES_SUBMISSION_DATE: &str = "submission_date";
pub const SERIES_LAST_UPDATE_DATE: &str = "last_update_date";
pub const SERIES_PUBMED_ID: &str = "pubmed_id";
pub const SERIES_SUMMARY: &str = "summary";
pub const SERIES_TYPE: &str = "type";
pub const SERIES_CONTRIBUTOR: &str = "contributor";
pub const SERIES_CONTACT: &str = "contact";
pub const SERIES_WEB_LINK: &str = "web_link";
pub const SERIES_OVERALL_DESIGN: &str = "overall_design";
pub const SERIES_REPEATS: &str = "repeats";
pub const SERIES_REPEATS_SAMPLE_LIST: &str = "repeats_sample_list";
pub const SERIES_VARIABLE: &str = "variable";
pub const SERIES_VARIABLE_DESCRIPTION: &str = "variable_description";
pub const SERIES_SUPPLEMENTARY_FILE: &str = "supplementary_file";

pub const SERIES_COLUMNS: &[&str] = &[
    SERIES_TITLE,
    SERIES_GSE,
    SERIES_STATUS,
    SERIES_SUBMISSION_DATE,
    SERIES_LAST_UPDATE_DATE,
    SERIES_PUBMED_ID,
    SERIES_SUMMARY,
    SERIES_TYPE,
    SERIES_CONTRIBUTOR,
    SERIES_CONTACT,
    SERIES_WEB_LINK,
    SERIES_OVERALL_DESIGN,
    SERIES_REPEATS,
    SERIES_REPEATS_SAMPLE_LIST,
    SERIES_VARIABLE,
    SERIES_VARIABLE_DESCRIPTION,
    SERIES_SUPPLEMENTARY_FILE,
];

// === Sample (gsm) ===
pub const SAMPLE_TITLE: &str = "title";
pub const SAMPLE_GSM: &str = "gsm";
pub const SAMPLE_SERIES_ID: &str = "series_id";
pub const SAMPLE_GPL: &str = "gpl";
pub const SAMPLE_STATUS: &str = "status";
pub const SAMPLE_SUBMISSION_DATE: &str = "submission_date";
pub const SAMPLE_LAST_UPDATE_DATE: &str = "last_update_date";
pub const SAMPLE_TYPE: &str = "type";
pub const SAMPLE_CHANNEL_COUNT: &str = "channel_count";
pub const SAMPLE_HYB_PROTOCOL: &str = "hyb_protocol";
pub const SAMPLE_DESCRIPTION: &str = "description";
pub const SAMPLE_DATA_PROCESSING: &str = "data_processing";
pub const SAMPLE_CONTACT: &str = "contact";
pub const SAMPLE_SUPPLEMENTARY_FILE: &str = "supplementary_file";
pub const SAMPLE_DATA_ROW_COUNT: &str = "data_row_count";

/// Per-channel sample columns, formatted as `<base>_ch<N>`.
pub const CHANNEL_SOURCE_NAME: &str = "source_name";
pub const CHANNEL_ORGANISM: &str = "organism";
pub const CHANNEL_CHARACTERISTICS: &str = "characteristics";
pub const CHANNEL_MOLECULE: &str = "molecule";
pub const CHANNEL_LABEL: &str = "label";
pub const CHANNEL_TREATMENT_PROTOCOL: &str = "treatment_protocol";
pub const CHANNEL_EXTRACT_PROTOCOL: &str = "extract_protocol";
pub const CHANNEL_LABEL_PROTOCOL: &str = "label_protocol";

pub const CHANNEL_COLUMN_BASES: &[&str] = &[
    CHANNEL_SOURCE_NAME,
    CHANNEL_ORGANISM,
    CHANNEL_CHARACTERISTICS,
    CHANNEL_MOLECULE,
    CHANNEL_LABEL,
    CHANNEL_TREATMENT_PROTOCOL,
    CHANNEL_EXTRACT_PROTOCOL,
    CHANNEL_LABEL_PROTOCOL,
];

/// Name of a per-channel column, e.g. `channel_column("organism", 2)` is `organism_ch2`.
pub fn channel_column(base: &str, channel: u32) -> String {
    format!("{base}_ch{channel}")
}

pub const SAMPLE_COLUMNS: &[&str] = &[
    SAMPLE_TITLE,
    SAMPLE_GSM,
    SAMPLE_SERIES_ID,
    SAMPLE_GPL,
    SAMPLE_STATUS,
    SAMPLE_SUBMISSION_DATE,
    SAMPLE_LAST_UPDATE_DATE,
    SAMPLE_TYPE,
    SAMPLE_CHANNEL_COUNT,
    "source_name_ch1",
    "organism_ch1",
    "characteristics_ch1",
    "molecule_ch1",
    "label_ch1",
    "treatment_protocol_ch1",
    "extract_protocol_ch1",
    "label_protocol_ch1",
    "source_name_ch2",
    "organism_ch2",
    "characteristics_ch2",
    "molecule_ch2",
    "label_ch2",
    "treatment_protocol_ch2",
    "extract_protocol_ch2",
    "label_protocol_ch2",
    SAMPLE_HYB_PROTOCOL,
    SAMPLE_DESCRIPTION,
    SAMPLE_DATA_PROCESSING,
    SAMPLE_CONTACT,
    SAMPLE_SUPPLEMENTARY_FILE,
    SAMPLE_DATA_ROW_COUNT,
];

// === Platform (gpl) ===
pub const PLATFORM_TITLE: &str = "title";
pub const PLATFORM_GPL: &str = "gpl";
pub const PLATFORM_STATUS: &str = "status";
pub const PLATFORM_SUBMISSION_DATE: &str = "submission_date";
pub const PLATFORM_LAST_UPDATE_DATE: &str = "last_update_date";
pub const PLATFORM_TECHNOLOGY: &str = "technology";
pub const PLATFORM_DISTRIBUTION: &str = "distribution";
pub const PLATFORM_ORGANISM: &str = "organism";
pub const PLATFORM_MANUFACTURER: &str = "manufacturer";
pub const PLATFORM_MANUFACTURE_PROTOCOL: &str = "manufacture_protocol";
pub const PLATFORM_COATING: &str = "coating";
pub const PLATFORM_CATALOG_NUMBER: &str = "catalog_number";
pub const PLATFORM_SUPPORT: &str = "support";
pub const PLATFORM_DESCRIPTION: &str = "description";
pub const PLATFORM_WEB_LINK: &str = "web_link";
pub const PLATFORM_CONTACT: &str = "contact";
pub const PLATFORM_DATA_ROW_COUNT: &str = "data_row_count";
pub const PLATFORM_SUPPLEMENTARY_FILE: &str = "supplementary_file";
pub const PLATFORM_BIOC_PACKAGE: &str = "bioc_package";

pub const PLATFORM_COLUMNS: &[&str] = &[
    PLATFORM_TITLE,
    PLATFORM_GPL,
    PLATFORM_STATUS,
    PLATFORM_SUBMISSION_DATE,
    PLATFORM_LAST_UPDATE_DATE,
    PLATFORM_TECHNOLOGY,
    PLATFORM_DISTRIBUTION,
    PLATFORM_ORGANISM,
    PLATFORM_MANUFACTURER,
    PLATFORM_MANUFACTURE_PROTOCOL,
    PLATFORM_COATING,
    PLATFORM_CATALOG_NUMBER,
    PLATFORM_SUPPORT,
    PLATFORM_DESCRIPTION,
    PLATFORM_WEB_LINK,
    PLATFORM_CONTACT,
    PLATFORM_DATA_ROW_COUNT,
    PLATFORM_SUPPLEMENTARY_FILE,
    PLATFORM_BIOC_PACKAGE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_columns_are_in_sample_catalog() {
        for channel in 1..=2 {
            for base in CHANNEL_COLUMN_BASES {
                let column = channel_column(base, channel);
                assert!(SAMPLE_COLUMNS.contains(&column.as_str()), "{column}");
            }
        }
    }
}

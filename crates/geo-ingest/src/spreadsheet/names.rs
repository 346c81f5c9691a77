//! Section headers and field names of the GEO metadata template.

pub const DEFAULT_SHEET_NAME: &str = "Metadata Example";

pub const SERIES_HEADER: &str = "SERIES";
pub const SAMPLES_HEADER: &str = "SAMPLES";
pub const PROTOCOLS_HEADER: &str = "PROTOCOLS";
pub const PLATFORM_HEADER: &str = "PLATFORM";

/// Headers and field names are read from this column; values from the next.
pub const FIELD_NAME_COLUMN: usize = 0;
pub const FIELD_VALUE_COLUMN: usize = 1;

// === Series ===
pub const SERIES_TITLE: &str = "title";
pub const SERIES_SUMMARY: &str = "summary";
pub const SERIES_OVERALL_DESIGN: &str = "overall design";
pub const SERIES_CONTRIBUTOR: &str = "contributor";
pub const SERIES_WEB_LINK: &str = "web link";
pub const SERIES_PUBMED_ID: &str = "pubmed id";
pub const SERIES_VARIABLE: &str = "variable";
pub const SERIES_REPEAT: &str = "repeat";

pub const SERIES_FIELDS: &[&str] = &[
    SERIES_TITLE,
    SERIES_SUMMARY,
    SERIES_OVERALL_DESIGN,
    SERIES_CONTRIBUTOR,
    SERIES_WEB_LINK,
    SERIES_PUBMED_ID,
    SERIES_VARIABLE,
    SERIES_REPEAT,
];

// === Samples ===
pub const SAMPLE_NAME: &str = "Sample name";
pub const SAMPLE_TITLE: &str = "title";
pub const SAMPLE_RAW_DATA_FILE: &str = "raw data file";
pub const SAMPLE_CEL_FILE: &str = "CEL file";
pub const SAMPLE_EXP_FILE: &str = "EXP file";
pub const SAMPLE_CHP_FILE: &str = "CHP file";
pub const SAMPLE_SOURCE_NAME: &str = "source name";
pub const SAMPLE_ORGANISM: &str = "organism";
pub const SAMPLE_BIOMATERIAL_PROVIDER: &str = "biomaterial provider";
pub const SAMPLE_MOLECULE: &str = "molecule";
pub const SAMPLE_LABEL: &str = "label";
pub const SAMPLE_DESCRIPTION: &str = "description";
pub const SAMPLE_PLATFORM: &str = "platform";

pub const SAMPLE_COLUMNS: &[&str] = &[
    SAMPLE_NAME,
    SAMPLE_TITLE,
    SAMPLE_RAW_DATA_FILE,
    SAMPLE_CEL_FILE,
    SAMPLE_EXP_FILE,
    SAMPLE_CHP_FILE,
    SAMPLE_SOURCE_NAME,
    SAMPLE_ORGANISM,
    SAMPLE_BIOMATERIAL_PROVIDER,
    SAMPLE_MOLECULE,
    SAMPLE_LABEL,
    SAMPLE_DESCRIPTION,
    SAMPLE_PLATFORM,
];

/// Sample columns named `characteristics: <name>` carry one characteristic each.
pub const CHARACTERISTICS_PREFIX: &str = "characteristics: ";

// === Protocols ===
pub const PROTOCOL_GROWTH: &str = "growth protocol";
pub const PROTOCOL_TREATMENT: &str = "treatment protocol";
pub const PROTOCOL_EXTRACT: &str = "extract protocol";
pub const PROTOCOL_LABEL: &str = "label protocol";
pub const PROTOCOL_HYB: &str = "hyb protocol";
pub const PROTOCOL_SCAN: &str = "scan protocol";
pub const PROTOCOL_DATA_PROCESSING: &str = "data processing";
pub const PROTOCOL_VALUE_DEFINITION: &str = "value definition";

pub const PROTOCOL_FIELDS: &[&str] = &[
    PROTOCOL_GROWTH,
    PROTOCOL_TREATMENT,
    PROTOCOL_EXTRACT,
    PROTOCOL_LABEL,
    PROTOCOL_HYB,
    PROTOCOL_SCAN,
    PROTOCOL_DATA_PROCESSING,
    PROTOCOL_VALUE_DEFINITION,
];

// === Platform ===
pub const PLATFORM_TITLE: &str = "title";
pub const PLATFORM_DISTRIBUTION: &str = "distribution";
pub const PLATFORM_TECHNOLOGY: &str = "technology";
pub const PLATFORM_ORGANISM: &str = "organism";
pub const PLATFORM_MANUFACTURER: &str = "manufacturer";
pub const PLATFORM_MANUFACTURE_PROTOCOL: &str = "manufacture protocol";
pub const PLATFORM_DESCRIPTION: &str = "description";
pub const PLATFORM_CATALOG_NUMBER: &str = "catalog number";
pub const PLATFORM_WEB_LINK: &str = "web link";
pub const PLATFORM_SUPPORT: &str = "support";
pub const PLATFORM_COATING: &str = "coating";
pub const PLATFORM_CONTRIBUTOR: &str = "contributor";
pub const PLATFORM_PUBMED_ID: &str = "pubmed id";
pub const PLATFORM_NATIVE_ARRAY_DESCRIPTION_FILE: &str = "native array description file";
pub const PLATFORM_FILE: &str = "Platform file";

pub const PLATFORM_FIELDS: &[&str] = &[
    PLATFORM_TITLE,
    PLATFORM_DISTRIBUTION,
    PLATFORM_TECHNOLOGY,
    PLATFORM_ORGANISM,
    PLATFORM_MANUFACTURER,
    PLATFORM_MANUFACTURE_PROTOCOL,
    PLATFORM_DESCRIPTION,
    PLATFORM_CATALOG_NUMBER,
    PLATFORM_WEB_LINK,
    PLATFORM_SUPPORT,
    PLATFORM_COATING,
    PLATFORM_CONTRIBUTOR,
    PLATFORM_PUBMED_ID,
    PLATFORM_NATIVE_ARRAY_DESCRIPTION_FILE,
    PLATFORM_FILE,
];

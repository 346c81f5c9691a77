use anyhow::{Context, Result};
use tracing::{info, info_span};

use geo_ingest::{
    ErrorPolicy, PlatformCache, RelationalOptions, SpreadsheetOptions, SqliteSource,
    assemble_submissions, read_template,
};
use geo_model::SubmissionMetadata;

use crate::cli::{DbArgs, TemplateArgs};

pub fn run_db(args: &DbArgs) -> Result<Vec<SubmissionMetadata>> {
    let span = info_span!(
        "db",
        database = %args.database.display(),
        start = args.start,
        count = args.count
    );
    let _guard = span.enter();

    let source = SqliteSource::open(&args.database)
        .with_context(|| format!("open snapshot {}", args.database.display()))?;
    let options = RelationalOptions::default()
        .with_max_slice_size(args.max_slice)
        .with_error_policy(if args.skip_invalid {
            ErrorPolicy::SkipSeries
        } else {
            ErrorPolicy::Abort
        });

    let mut cache = PlatformCache::new();
    let submissions = assemble_submissions(&source, args.start, args.count, &mut cache, &options)
        .context("assemble submissions")?;
    info!(
        submissions = submissions.len(),
        platform_fetches = cache.fetch_count(),
        "snapshot slice complete"
    );
    Ok(submissions)
}

pub fn run_template(args: &TemplateArgs) -> Result<SubmissionMetadata> {
    let span = info_span!("template", path = %args.path.display());
    let _guard = span.enter();

    let options = SpreadsheetOptions::default().with_sheet_name(args.sheet_name.clone());
    let submission = read_template(&args.path, &options)
        .with_context(|| format!("read template {}", args.path.display()))?;
    info!(samples = submission.samples.len(), "template complete");
    Ok(submission)
}

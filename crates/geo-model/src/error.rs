use thiserror::Error;

/// Violations of the aggregate invariants of a [`crate::SubmissionMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("series title is empty")]
    EmptySeriesTitle,

    #[error("platform {platform} appears more than once in the submission")]
    DuplicatePlatform { platform: String },

    #[error("sample {sample} references platform {platform}, which is not part of the submission")]
    UnresolvedPlatform { sample: String, platform: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

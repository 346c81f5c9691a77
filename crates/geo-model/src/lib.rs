//! GEO submission metadata model.
//!
//! One [`SubmissionMetadata`] aggregate describes a single GEO submission:
//! its [`Series`], the [`Sample`]s assayed within it, the [`Platform`]s those
//! samples were measured on, and (for template-sourced submissions) the
//! free-text [`Protocol`] fields.
//!
//! The types are plain immutable snapshots. They are built once per
//! extraction run by the readers in `geo-ingest` and are never modified
//! afterwards.
//!
//! # Module Organization
//!
//! - [`contributor`]: People and contact details attached to series and platforms
//! - [`series`]: Study-level record
//! - [`sample`]: Sample and per-channel biological material
//! - [`platform`]: Measurement platform definitions
//! - [`protocol`]: Template protocol sections
//! - [`submission`]: The aggregate root and its invariants

pub mod contributor;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod sample;
pub mod series;
pub mod submission;

pub use contributor::{Contributor, ContributorName};
pub use error::{ModelError, Result};
pub use platform::Platform;
pub use protocol::Protocol;
pub use sample::{PerChannelSampleInfo, Sample};
pub use series::Series;
pub use submission::SubmissionMetadata;

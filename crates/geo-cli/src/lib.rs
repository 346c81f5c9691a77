//! Library components of the `geo-meta` command-line tool.

pub mod logging;
pub mod report;

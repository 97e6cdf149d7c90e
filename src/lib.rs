//! Source line counter.
//!
//! Counts total, comment and blank lines for every file or directory tree
//! it is given, grouped by the language detected from each file's extension.
//! The counting core ([`Aggregator`], [`classify_lines`], [`detect_language`],
//! [`RuleRegistry`]) produces plain numbers; [`report`] turns them into the
//! summary table printed by the `ccinfo` binary.
//!
//! Supported languages: Python, JavaScript, Go, C++, Java.

pub mod aggregate;
pub mod classify;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod fs;
pub mod report;
pub mod rules;

pub use aggregate::{
    AggregateStats, Aggregator, FileRecord, RunManifest, RunOutcome, SkipReason, SkippedPath,
};
pub use classify::{classify_lines, count_lines, FileStats};
pub use detect::{detect_language, detect_path};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, StderrDiagnostics};
pub use error::CountError;
pub use fs::{FileSystem, OsFileSystem, TreeListing, WalkOptions};
pub use rules::{CommentRules, RuleRegistry};

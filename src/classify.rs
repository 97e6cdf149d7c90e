//! Per-line classification into blank, comment and code.
//!
//! The classifier is a single forward pass with one bit of state: whether a
//! block comment is currently open. It has no knowledge of string literals or
//! nesting, so a block-start marker inside a string still opens a comment.

use std::io;
use std::ops::{Add, AddAssign};
use std::path::Path;

use crate::error::CountError;
use crate::fs::FileSystem;
use crate::rules::CommentRules;

/// Line counts for one file, or a sum of files.
///
/// Code lines are never stored; they are whatever is left after comments and
/// blanks are taken out of the total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub total_lines: u64,
    pub comment_lines: u64,
    pub blank_lines: u64,
}

impl FileStats {
    pub fn new(total_lines: u64, comment_lines: u64, blank_lines: u64) -> Self {
        FileStats {
            total_lines,
            comment_lines,
            blank_lines,
        }
    }

    pub fn code_lines(&self) -> u64 {
        self.total_lines
            .saturating_sub(self.comment_lines)
            .saturating_sub(self.blank_lines)
    }
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: FileStats) {
        self.total_lines += other.total_lines;
        self.comment_lines += other.comment_lines;
        self.blank_lines += other.blank_lines;
    }
}

impl Add for FileStats {
    type Output = FileStats;

    fn add(mut self, other: FileStats) -> FileStats {
        self += other;
        self
    }
}

/// Classify a stream of lines. The first read error ends the pass and is
/// returned; partial counts are discarded.
pub fn classify_lines<I>(lines: I, rules: &CommentRules) -> io::Result<FileStats>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let single_line = rules.single_line.as_deref();
    let block_start = rules.block_start.as_deref();
    let block_end = rules.block_end.as_deref();
    let contains = |line: &str, marker: Option<&str>| marker.is_some_and(|m| line.contains(m));

    let mut stats = FileStats::default();
    let mut in_block_comment = false;

    for line_result in lines {
        let line = line_result?;
        stats.total_lines += 1;
        let stripped = line.trim();

        if stripped.is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        if in_block_comment {
            stats.comment_lines += 1;
            if contains(stripped, block_end) {
                in_block_comment = false;
            }
            continue;
        }

        if single_line.is_some_and(|m| stripped.starts_with(m)) {
            stats.comment_lines += 1;
        } else if let Some(start) = block_start.filter(|m| stripped.contains(*m)) {
            stats.comment_lines += 1;
            let closes = if block_end == Some(start) {
                // Identical markers: the first occurrence opens, a second closes.
                stripped.matches(start).count() >= 2
            } else {
                contains(stripped, block_end)
            };
            in_block_comment = !closes;
        }
    }

    Ok(stats)
}

/// Open `path` through `fs` and classify its lines with `rules`.
pub fn count_lines(
    fs: &dyn FileSystem,
    path: &Path,
    rules: &CommentRules,
) -> Result<FileStats, CountError> {
    let lines = fs
        .open_text_lines(path)
        .map_err(|err| CountError::io(path, err))?;
    classify_lines(lines, rules).map_err(|err| CountError::io(path, err))
}

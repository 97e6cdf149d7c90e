//! Walk the inputs of one run and fold per-file counts into per-language
//! totals.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classify::{count_lines, FileStats};
use crate::detect::detect_path;
use crate::diagnostics::Diagnostics;
use crate::error::CountError;
use crate::fs::FileSystem;
use crate::rules::RuleRegistry;

/// Per-language running totals, keyed and iterated in language order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    languages: BTreeMap<String, FileStats>,
}

impl AggregateStats {
    /// Add `stats` to the totals of `language`, starting it at zero if it has
    /// not been seen yet.
    pub fn fold(&mut self, language: &str, stats: FileStats) {
        *self.languages.entry(language.to_string()).or_default() += stats;
    }

    pub fn get(&self, language: &str) -> Option<&FileStats> {
        self.languages.get(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileStats)> {
        self.languages.iter().map(|(lang, stats)| (lang.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Sum over every language.
    pub fn grand_total(&self) -> FileStats {
        self.languages
            .values()
            .fold(FileStats::default(), |acc, stats| acc + *stats)
    }
}

/// A file whose language was detected and whose read was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub language: &'static str,
    /// `None` when the file could not be counted.
    pub stats: Option<FileStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    UnsupportedLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What happened to each path of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunManifest {
    pub inputs: Vec<PathBuf>,
    pub processed: Vec<FileRecord>,
    pub skipped: Vec<SkippedPath>,
    /// Directories or entries that could not be listed.
    pub walk_errors: usize,
}

impl RunManifest {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn skipped_paths(&self) -> impl Iterator<Item = &Path> {
        self.skipped.iter().map(|s| s.path.as_path())
    }

    pub fn failed_count(&self) -> usize {
        self.processed.iter().filter(|r| r.stats.is_none()).count()
    }

    pub fn total_files(&self) -> usize {
        self.processed_count() + self.skipped_count()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stats: AggregateStats,
    pub manifest: RunManifest,
}

/// Drives one counting run. Holds the rule table, the filesystem and the
/// diagnostics sink by reference; every call to [`Aggregator::run`] starts
/// from empty totals.
pub struct Aggregator<'a> {
    registry: &'a RuleRegistry,
    fs: &'a dyn FileSystem,
    diagnostics: &'a mut dyn Diagnostics,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        registry: &'a RuleRegistry,
        fs: &'a dyn FileSystem,
        diagnostics: &'a mut dyn Diagnostics,
    ) -> Self {
        Aggregator {
            registry,
            fs,
            diagnostics,
        }
    }

    /// Count every input, in order. Problems with single paths are reported
    /// and recorded; they never stop the run.
    pub fn run(&mut self, inputs: &[PathBuf]) -> RunOutcome {
        let mut outcome = RunOutcome {
            stats: AggregateStats::default(),
            manifest: RunManifest {
                inputs: inputs.to_vec(),
                ..RunManifest::default()
            },
        };

        for input in inputs {
            if !self.fs.exists(input) {
                outcome.manifest.skipped.push(SkippedPath {
                    path: input.clone(),
                    reason: SkipReason::NotFound,
                });
                self.report(&CountError::PathNotFound(input.clone()));
            } else if self.fs.is_dir(input) {
                self.process_directory(input, &mut outcome);
            } else {
                self.process_file(input, true, &mut outcome);
            }
        }

        outcome
    }

    fn process_directory(&mut self, dir: &Path, outcome: &mut RunOutcome) {
        let listing = self.fs.list_tree(dir);
        for (path, err) in listing.errors {
            outcome.manifest.walk_errors += 1;
            self.report(&CountError::io(path, err));
        }
        for file in &listing.files {
            self.process_file(file, false, outcome);
        }
    }

    /// `named` is set for files given directly as inputs; only those get a
    /// notice when their extension is not recognised.
    fn process_file(&mut self, path: &Path, named: bool, outcome: &mut RunOutcome) {
        let Some(language) = detect_path(path) else {
            outcome.manifest.skipped.push(SkippedPath {
                path: path.to_path_buf(),
                reason: SkipReason::UnsupportedLanguage,
            });
            if named {
                self.report(&CountError::UnsupportedLanguage(path.to_path_buf()));
            }
            return;
        };

        let counted = match self.registry.get_rules(language) {
            Some(rules) => count_lines(self.fs, path, rules),
            None => Err(CountError::UnregisteredLanguageRules {
                language: language.to_string(),
                path: path.to_path_buf(),
            }),
        };

        let stats = match counted {
            Ok(stats) => Some(stats),
            Err(err) => {
                self.report(&err);
                None
            }
        };

        outcome.stats.fold(language, stats.unwrap_or_default());
        outcome.manifest.processed.push(FileRecord {
            path: path.to_path_buf(),
            language,
            stats,
        });
    }

    fn report(&mut self, err: &CountError) {
        self.diagnostics.report(&err.to_string());
    }
}

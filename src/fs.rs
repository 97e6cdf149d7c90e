//! Filesystem access used by the aggregator.
//!
//! The aggregator only talks to the [`FileSystem`] trait, so a run can be
//! driven from the real disk ([`OsFileSystem`]) or from anything else that
//! can list files and hand out lines of text.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::CountError;

/// Lines of one file, without their terminators.
pub type TextLines = Box<dyn Iterator<Item = io::Result<String>>>;

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Every regular file beneath `path`, recursively.
    fn list_tree(&self, path: &Path) -> TreeListing;

    /// Open `path` as UTF-8 text. Decoding failures surface as
    /// `io::ErrorKind::InvalidData` items from the returned iterator.
    fn open_text_lines(&self, path: &Path) -> io::Result<TextLines>;
}

/// Result of walking a directory. Problems met along the way are kept next
/// to the files that were found instead of ending the walk.
#[derive(Debug, Default)]
pub struct TreeListing {
    pub files: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, io::Error)>,
}

/// Options that narrow a directory walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory names (or trailing path components) to skip.
    pub ignore: Vec<String>,
    pub max_depth: usize,
    /// Only list files whose name or root-relative path matches.
    pub filespec: Option<Pattern>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            ignore: Vec::new(),
            max_depth: 100,
            filespec: None,
        }
    }
}

impl WalkOptions {
    pub fn with_filespec(mut self, spec: Option<&str>) -> Result<Self, CountError> {
        self.filespec = match spec {
            Some(spec) => Some(Pattern::new(spec).map_err(|err| CountError::InvalidFilespec {
                spec: spec.to_string(),
                reason: err.to_string(),
            })?),
            None => None,
        };
        Ok(self)
    }

    fn is_ignored(&self, dir: &Path) -> bool {
        self.ignore.iter().any(|d| dir.ends_with(Path::new(d)))
    }

    /// A file passes when there is no filespec, or when the pattern matches
    /// its bare name or its `/`-separated path relative to the walk root.
    fn accepts(&self, root: &Path, file: &Path) -> bool {
        let Some(pattern) = &self.filespec else {
            return true;
        };
        let by_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        by_name
            || file
                .strip_prefix(root)
                .ok()
                .and_then(Path::to_str)
                .is_some_and(|rel| pattern.matches(&rel.replace('\\', "/")))
    }
}

/// The real disk.
#[derive(Debug, Clone, Default)]
pub struct OsFileSystem {
    options: WalkOptions,
}

impl OsFileSystem {
    pub fn new(options: WalkOptions) -> Self {
        OsFileSystem { options }
    }

    fn walk(&self, root: &Path, dir: &Path, depth: usize, listing: &mut TreeListing) {
        if depth > self.options.max_depth {
            listing.errors.push((
                dir.to_path_buf(),
                io::Error::other(format!(
                    "Maximum directory depth ({}) reached",
                    self.options.max_depth
                )),
            ));
            return;
        }

        let read_dir = match fs::read_dir(dir) {
            Ok(iter) => iter,
            Err(err) => {
                listing.errors.push((dir.to_path_buf(), err));
                return;
            }
        };

        let mut entries = Vec::new();
        for entry_result in read_dir {
            match entry_result {
                Ok(entry) => entries.push(entry),
                Err(err) => listing.errors.push((dir.to_path_buf(), err)),
            }
        }
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let entry_path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(err) => {
                    listing.errors.push((entry_path, err));
                    continue;
                }
            };

            // Symlinked files are counted through their target; symlinked
            // directories are never entered.
            if file_type.is_symlink() {
                match fs::metadata(&entry_path) {
                    Ok(target) if target.is_file() => {
                        if self.options.accepts(root, &entry_path) {
                            listing.files.push(entry_path);
                        }
                    }
                    Ok(_) => {}
                    Err(err) => listing.errors.push((entry_path, err)),
                }
                continue;
            }
            if file_type.is_dir() {
                if !self.options.is_ignored(&entry_path) {
                    self.walk(root, &entry_path, depth + 1, listing);
                }
            } else if file_type.is_file() && self.options.accepts(root, &entry_path) {
                listing.files.push(entry_path);
            }
        }
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_tree(&self, path: &Path) -> TreeListing {
        let mut listing = TreeListing::default();
        self.walk(path, path, 0, &mut listing);
        listing
    }

    fn open_text_lines(&self, path: &Path) -> io::Result<TextLines> {
        let file = fs::File::open(path)?;
        Ok(Box::new(Utf8LineReader::new(file)))
    }
}

/// Splits a byte stream on `\n` and decodes each line as strict UTF-8.
pub struct Utf8LineReader {
    reader: BufReader<Box<dyn Read>>,
    buffer: Vec<u8>,
    line_number: u64,
}

impl Utf8LineReader {
    pub fn new<R: Read + 'static>(reader: R) -> Self {
        Utf8LineReader {
            reader: BufReader::new(Box::new(reader)),
            buffer: Vec::with_capacity(8 * 1024),
            line_number: 0,
        }
    }
}

impl Iterator for Utf8LineReader {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                let line_number = self.line_number;
                Some(
                    String::from_utf8(std::mem::take(&mut self.buffer)).map_err(|err| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("invalid UTF-8 on line {}: {}", line_number, err.utf8_error()),
                        )
                    }),
                )
            }
            Err(err) => Some(Err(err)),
        }
    }
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while counting a single input.
///
/// None of these abort a run: the aggregator records them against the
/// offending path and moves on to the next one.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("Error processing file {}: not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    #[error("No rules registered for language: {language} ({})", .path.display())]
    UnregisteredLanguageRules { language: String, path: PathBuf },

    #[error("Error processing file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid filespec pattern '{spec}': {reason}")]
    InvalidFilespec { spec: String, reason: String },
}

impl CountError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CountError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<CountError> for io::Error {
    fn from(err: CountError) -> Self {
        let kind = match &err {
            CountError::PathNotFound(_) => io::ErrorKind::NotFound,
            CountError::InvalidFilespec { .. } => io::ErrorKind::InvalidInput,
            CountError::Io { source, .. } => source.kind(),
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}

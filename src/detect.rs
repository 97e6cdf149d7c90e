//! Map file names to language identifiers by extension.

use std::path::Path;

const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("go", "go"),
    ("cpp", "cpp"),
    ("h", "cpp"),
    ("mod", "go"),
    ("java", "java"),
];

/// Identify the language of `path` from its extension (case-sensitive).
///
/// Both `/` and `\` are treated as directory separators so that a path
/// written for either platform yields the same answer. Returns `None` when
/// the file name has no `.` or the extension is not in the table.
pub fn detect_language(path: &str) -> Option<&'static str> {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_stem, ext) = file_name.rsplit_once('.')?;
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, language)| *language)
}

pub fn detect_path(path: &Path) -> Option<&'static str> {
    detect_language(&path.to_string_lossy())
}

/// The extension table, in declaration order.
pub fn supported_extensions() -> &'static [(&'static str, &'static str)] {
    EXTENSION_TABLE
}

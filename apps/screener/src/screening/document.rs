use std::path::PathBuf;

/// A candidate document discovered in the input directory.
///
/// Built once from the directory entry and never mutated. The file itself is
/// read by the extractor and eventually relocated (moved, not copied) by the
/// router under its original file name.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Full path inside the input directory.
    pub path: PathBuf,
    /// File name with extension, carried verbatim through the move.
    pub file_name: String,
    /// File name without the final extension; feeds companion note names.
    pub base_name: String,
    /// Lowercased extension without the dot; empty when the file has none.
    pub extension: String,
}

impl SourceDocument {
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self {
            path,
            file_name,
            base_name,
            extension,
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read one of the dashboard's input files.
///
/// Every variant carries the offending path so the page can show the user
/// exactly which file to fix.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("unrecognised label '{value}' in {} (row {row})", path.display())]
    InvalidLabel {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

impl LoadError {
    /// Maps a failed `File::open`/`fs::metadata` to `Missing` or `Io`.
    pub fn from_open(path: &std::path::Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::Missing {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Missing { path }
            | LoadError::Io { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::NotAnObject { path }
            | LoadError::MissingColumn { path, .. }
            | LoadError::InvalidLabel { path, .. } => path,
        }
    }
}

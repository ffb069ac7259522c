use thiserror::Error;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while serving a media range
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Range header is required")]
    MissingRange,

    #[error("Malformed Range header: {value}")]
    MalformedRange { value: String },

    #[error("Range not satisfiable for resource of {total} bytes")]
    RangeNotSatisfiable { total: u64 },

    #[error("Media resource not found: {path}")]
    NotFound { path: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MediaError {
    /// Create a malformed range error
    pub fn malformed<S: Into<String>>(value: S) -> Self {
        Self::MalformedRange {
            value: value.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Map an I/O error on `path`, keeping `NotFound` distinct
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io { source: err }
        }
    }
}

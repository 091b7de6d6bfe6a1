//! Fatal conversion errors. Recoverable problems are reported as
//! [`Warning`](crate::extract::Warning)s instead.

use crate::tag::TagError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{path}: {message}")]
    Parse { path: String, message: String },
    #[error("{record}.{field}: malformed tag: {source}")]
    MalformedTag {
        record: String,
        field: String,
        #[source]
        source: TagError,
    },
    #[error("{record}.{field}: unsupported type `{shape}`")]
    UnsupportedType {
        record: String,
        field: String,
        shape: String,
    },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: cannot load a directory", .0.display())]
    NotAFile(PathBuf),
    #[error("{}: nothing to parse", .0.display())]
    EmptySource(PathBuf),
}

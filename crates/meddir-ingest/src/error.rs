//! Error types for facility-file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening and decoding ingestion inputs.
///
/// Failures are fatal only at the byte-source boundary; everything past
/// the line reader degrades to counted skips instead of erroring.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the input file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read from an already-opened byte source.
    #[error("failed to read input stream: {0}")]
    StreamRead(#[source] std::io::Error),

    /// Input is compressed but no decompression strategy was injected.
    #[error("input {path} is {format}-compressed but no decompressor is available")]
    UnsupportedCompression { path: PathBuf, format: &'static str },

    /// The injected decompressor failed to open the stream.
    #[error("failed to open {format} stream for {path}: {source}")]
    Decompression {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The input has no header row to resolve columns against.
    #[error("missing header row in delimited input")]
    MissingHeader,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_compression_display() {
        let err = IngestError::UnsupportedCompression {
            path: PathBuf::from("/data/facilities.csv.gz"),
            format: "gzip",
        };
        assert_eq!(
            err.to_string(),
            "input /data/facilities.csv.gz is gzip-compressed but no decompressor is available"
        );
    }
}

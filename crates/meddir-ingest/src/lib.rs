//! Streaming ingestion for the government facility dataset.
//!
//! Turns large delimited text files - possibly gzip-compressed, possibly
//! in legacy Shift_JIS - into `FacilityRecord`s without materializing the
//! decoded input in memory.
//!
//! # Usage
//!
//! ```ignore
//! use meddir_ingest::{FacilityLoader, GzipDecompressor, LineStream, TextEncoding};
//!
//! let gzip = GzipDecompressor;
//! let lines = LineStream::open(&path, TextEncoding::ShiftJis, Some(&gzip))?;
//! let mut loader = FacilityLoader::new();
//! let summary = loader.load_facilities(lines)?;
//! let pool = loader.into_records();
//! ```

pub mod aliases;
pub mod csv;
pub mod decompress;
pub mod error;
pub mod lines;
pub mod loader;

pub use decompress::{Compression, Decompressor, GzipDecompressor, detect_compression};
pub use error::{IngestError, Result};
pub use lines::{LineStream, TextEncoding};
pub use loader::{FacilityLoader, LoadSummary, PROGRESS_INTERVAL, Progress, normalize_time};

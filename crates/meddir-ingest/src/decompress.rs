//! Transparent decompression for ingestion byte sources.
//!
//! The host selects one decompression strategy at startup and injects it
//! into [`LineStream::open`](crate::lines::LineStream::open); detection is
//! by magic bytes or file extension, never by probing the environment per
//! call.

use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Gzip stream magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression detected on an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Human-readable label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
        }
    }
}

/// Detects compression from the first bytes of the source, falling back to
/// the file extension when fewer than two bytes are available.
#[must_use]
pub fn detect_compression(path: Option<&Path>, magic: &[u8]) -> Compression {
    if magic.len() >= 2 && magic[..2] == GZIP_MAGIC {
        return Compression::Gzip;
    }
    if let Some(path) = path
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    {
        return Compression::Gzip;
    }
    Compression::None
}

/// A decompression strategy injected once by the host environment.
pub trait Decompressor {
    /// Wraps the raw byte source in a decompressing reader.
    ///
    /// The returned reader must release all decompression state on drop;
    /// callers abandon iteration partway through large inputs.
    fn wrap(&self, source: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;
}

/// Gzip decompression backed by flate2.
///
/// Uses the multi-member decoder so concatenated gzip files decode whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipDecompressor;

impl Decompressor for GzipDecompressor {
    fn wrap(&self, source: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        Ok(Box::new(MultiGzDecoder::new(source)))
    }
}

//! Streaming line reader over optionally-compressed byte sources.
//!
//! Decodes one buffered chunk at a time and yields text lines split on
//! CR/LF/CRLF; the whole decoded input is never materialized at once. The
//! caller drives consumption line by line and may abandon the iterator at
//! any point without leaking decoder or decompression state.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use encoding_rs::{CoderResult, Decoder, Encoding, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};

use crate::decompress::{Compression, Decompressor, detect_compression};
use crate::error::{IngestError, Result};

/// Text encodings accepted for ingestion inputs.
///
/// Selected by caller hint; there is no auto-detection beyond it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Legacy Shift_JIS exports, still common for older dataset vintages.
    ShiftJis,
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::ShiftJis => SHIFT_JIS,
        }
    }
}

/// Raw-byte chunk size; the reader holds at most one chunk plus the decoded
/// text not yet consumed as lines.
const READ_CHUNK: usize = 8 * 1024;

/// Lazy line iterator over a decoded byte source.
pub struct LineStream {
    source: Box<dyn Read>,
    decoder: Decoder,
    chunk: Vec<u8>,
    /// Decoded text not yet emitted as lines.
    pending: String,
    eof: bool,
    had_replacements: bool,
}

impl LineStream {
    /// Wraps an already-opened byte source. No compression sniffing.
    pub fn from_reader(source: Box<dyn Read>, encoding: TextEncoding) -> Self {
        Self {
            source,
            decoder: encoding.encoding().new_decoder(),
            chunk: vec![0; READ_CHUNK],
            pending: String::new(),
            eof: false,
            had_replacements: false,
        }
    }

    /// Opens a file, sniffs compression from the first bytes, and applies
    /// the injected decompression strategy when needed.
    ///
    /// Fails with [`IngestError::UnsupportedCompression`] when the input is
    /// compressed and no decompressor was provided.
    pub fn open(
        path: &Path,
        encoding: TextEncoding,
        decompressor: Option<&dyn Decompressor>,
    ) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let mut magic = [0u8; 2];
        let mut filled = 0;
        while filled < magic.len() {
            let n = file
                .read(&mut magic[filled..])
                .map_err(|e| IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        // Re-chain the sniffed bytes in front of the rest of the file.
        let source: Box<dyn Read> =
            Box::new(Cursor::new(magic[..filled].to_vec()).chain(file));

        match detect_compression(Some(path), &magic[..filled]) {
            Compression::None => Ok(Self::from_reader(source, encoding)),
            Compression::Gzip => {
                let Some(decompressor) = decompressor else {
                    return Err(IngestError::UnsupportedCompression {
                        path: path.to_path_buf(),
                        format: "gzip",
                    });
                };
                tracing::debug!(path = %path.display(), "decompressing gzip input");
                let wrapped =
                    decompressor
                        .wrap(source)
                        .map_err(|e| IngestError::Decompression {
                            path: path.to_path_buf(),
                            format: "gzip",
                            source: e,
                        })?;
                Ok(Self::from_reader(wrapped, encoding))
            }
        }
    }

    /// Decodes `len` bytes of the current chunk into `pending`.
    ///
    /// Undecodable sequences become U+FFFD; the import tolerates partial
    /// data quality issues rather than aborting.
    fn decode_chunk(&mut self, len: usize, last: bool) {
        let mut src = &self.chunk[..len];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(READ_CHUNK * 4);
            self.pending.reserve(needed);
            let (result, read, had_errors) =
                self.decoder.decode_to_string(src, &mut self.pending, last);
            if had_errors {
                self.had_replacements = true;
            }
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => {}
            }
        }
    }

    /// Takes the next complete line out of `pending`, if one is there.
    ///
    /// A bare CR at the end of the buffer is held back until the next chunk
    /// shows whether it starts a CRLF pair.
    fn take_line(&mut self) -> Option<String> {
        let mut split: Option<(usize, usize)> = None;
        let bytes = self.pending.as_bytes();
        for i in 0..bytes.len() {
            match bytes[i] {
                b'\n' => {
                    split = Some((i, i + 1));
                    break;
                }
                b'\r' => {
                    if i + 1 < bytes.len() {
                        let end = if bytes[i + 1] == b'\n' { i + 2 } else { i + 1 };
                        split = Some((i, end));
                    } else if self.eof {
                        split = Some((i, i + 1));
                    }
                    break;
                }
                _ => {}
            }
        }
        let (line_end, drain_end) = split?;
        let line = self.pending[..line_end].to_string();
        self.pending.drain(..drain_end);
        Some(line)
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.take_line() {
                return Some(Ok(line));
            }
            if self.eof {
                if self.pending.is_empty() {
                    return None;
                }
                // Trailing line without a terminator.
                return Some(Ok(std::mem::take(&mut self.pending)));
            }
            match self.source.read(&mut self.chunk) {
                Ok(0) => {
                    self.eof = true;
                    self.decode_chunk(0, true);
                    if self.had_replacements {
                        tracing::warn!(
                            "input contained byte sequences invalid for the declared encoding"
                        );
                    }
                }
                Ok(n) => self.decode_chunk(n, false),
                Err(e) => {
                    self.eof = true;
                    return Some(Err(IngestError::StreamRead(e)));
                }
            }
        }
    }
}

//! File-level streaming behavior: compression sniffing, legacy encoding,
//! and line reconstruction.

use std::io::Write;

use flate2::Compression as Level;
use flate2::write::GzEncoder;
use meddir_ingest::{GzipDecompressor, IngestError, LineStream, TextEncoding};

const SAMPLE: &str = "ID,正式名称,都道府県\n1322136100011,いしい内科クリニック,東京都\n2725236100022,さくら会病院,大阪府\n";

fn write_temp(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Level::default());
    encoder.write_all(bytes).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

#[test]
fn rejoined_lines_reproduce_the_input() {
    let file = write_temp(SAMPLE.as_bytes(), ".csv");
    let lines: Vec<String> = LineStream::open(file.path(), TextEncoding::Utf8, None)
        .expect("open")
        .map(|l| l.expect("line"))
        .collect();
    // Reconstruction differs from the original by the trailing newline only.
    assert_eq!(lines.join("\n"), SAMPLE.trim_end_matches('\n'));
}

#[test]
fn gzip_input_is_detected_by_magic_bytes() {
    // Deliberately misleading extension: magic bytes win.
    let file = write_temp(&gzip(SAMPLE.as_bytes()), ".csv");
    let decompressor = GzipDecompressor;
    let lines: Vec<String> = LineStream::open(file.path(), TextEncoding::Utf8, Some(&decompressor))
        .expect("open")
        .map(|l| l.expect("line"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("いしい内科クリニック"));
}

#[test]
fn compressed_input_without_decompressor_is_fatal() {
    let file = write_temp(&gzip(SAMPLE.as_bytes()), ".csv.gz");
    let err = LineStream::open(file.path(), TextEncoding::Utf8, None).err();
    assert!(matches!(
        err,
        Some(IngestError::UnsupportedCompression { format: "gzip", .. })
    ));
}

#[test]
fn shift_jis_file_decodes_with_hint() {
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(SAMPLE);
    let file = write_temp(&encoded, ".csv");
    let lines: Vec<String> = LineStream::open(file.path(), TextEncoding::ShiftJis, None)
        .expect("open")
        .map(|l| l.expect("line"))
        .collect();
    assert_eq!(lines[2], "2725236100022,さくら会病院,大阪府");
}

#[test]
fn gzipped_shift_jis_combines_both_layers() {
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(SAMPLE);
    let file = write_temp(&gzip(&encoded), ".csv.gz");
    let decompressor = GzipDecompressor;
    let lines: Vec<String> = LineStream::open(file.path(), TextEncoding::ShiftJis, Some(&decompressor))
        .expect("open")
        .map(|l| l.expect("line"))
        .collect();
    assert_eq!(lines[1], "1322136100011,いしい内科クリニック,東京都");
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let err = LineStream::open(
        std::path::Path::new("/nonexistent/facilities.csv"),
        TextEncoding::Utf8,
        None,
    )
    .err();
    assert!(matches!(err, Some(IngestError::FileNotFound { .. })));
}

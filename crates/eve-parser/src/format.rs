//! File format detection and transparent decompression.

use std::io::Read;
use std::path::Path;

use eve_common::{EveError, EveResult};
use flate2::read::GzDecoder;

/// Files EVE publishes time series in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Daily averages CSV, first line starts with `Date`
    Averages,
    /// Level 0CS text, first line starts with `;`
    Level0Cs,
    /// Level 2/2B/3 FITS products
    Fits,
}

const FITS_SUFFIXES: &[&str] = &[".fit", ".fits", ".fit.gz", ".fits.gz", ".fts"];
const FITS_SIGNATURE: &str = "SIMPLE  =";

/// Whether the file name alone marks a FITS product.
pub fn is_fits_name(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    FITS_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Pick the format from the file name and the first line of content.
pub fn detect(filename: &str, first_line: &str) -> EveResult<FileFormat> {
    if is_fits_name(filename) || first_line.starts_with(FITS_SIGNATURE) {
        Ok(FileFormat::Fits)
    } else if first_line.starts_with("Date") {
        Ok(FileFormat::Averages)
    } else if first_line.starts_with(';') {
        Ok(FileFormat::Level0Cs)
    } else {
        Err(EveError::UnknownFormat(filename.to_string()))
    }
}

/// Decompress gzip-compressed file content.
pub fn decompress_gzip(data: &[u8]) -> EveResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Read `path` as text, gunzipping `.gz` files.
pub fn read_text(path: &Path) -> EveResult<String> {
    let raw = std::fs::read(path)?;
    let gzipped = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    let bytes = if gzipped { decompress_gzip(&raw)? } else { raw };

    String::from_utf8(bytes)
        .map_err(|_| EveError::UnknownFormat(format!("{}: not a text file", path.display())))
}

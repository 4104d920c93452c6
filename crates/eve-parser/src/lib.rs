//! Parsers for SDO/EVE time-series files.
//!
//! Supported inputs:
//!
//! - Level 0CS space-weather text (`YYYYMMDD_EVE_L0CS_DIODES_1m.txt`)
//! - Daily averages CSV
//!
//! Either may be gzip-compressed. FITS products (Level 2, 2B, 3) are
//! recognized but not decoded.

pub mod averages;
pub mod format;
pub mod level0cs;
pub mod series;
pub mod source;
pub mod units;

use std::path::Path;

use eve_common::{EveError, EveResult};
use tracing::{debug, instrument};

pub use format::{detect, FileFormat};
pub use series::{ColumnSummary, SeriesSummary, TimeSeries};
pub use source::SeriesSource;
pub use units::Unit;

/// Parse file content already in memory.
///
/// `filename` only steers format detection and is recorded on the series.
pub fn parse_text(filename: &str, text: &str) -> EveResult<TimeSeries> {
    let first_line = text.lines().next().unwrap_or("");
    let mut series = match detect(filename, first_line)? {
        FileFormat::Averages => averages::parse(text)?,
        FileFormat::Level0Cs => level0cs::parse(text)?,
        FileFormat::Fits => return Err(EveError::UnsupportedFormat(format!("FITS: {}", filename))),
    };
    series.filename = Some(filename.to_string());
    Ok(series)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and parse an EVE time-series file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_file(path: &Path) -> EveResult<TimeSeries> {
    let name = file_name(path);
    if format::is_fits_name(&name) {
        return Err(EveError::UnsupportedFormat(format!("FITS: {}", name)));
    }

    let text = format::read_text(path)?;
    // Format detection looks at the name without the compression suffix
    let inner = name.strip_suffix(".gz").unwrap_or(&name);
    let mut series = parse_text(inner, &text)?;
    series.filename = Some(name);
    debug!(rows = series.len(), columns = series.columns.len(), "Read time series");
    Ok(series)
}

/// Read `path` as the series kind named by `source`.
///
/// Without a source the format is detected from the file alone.
pub fn read_with_source(path: &Path, source: Option<&str>) -> EveResult<TimeSeries> {
    match source.map(|name| (name, SeriesSource::from_name(name))) {
        None | Some((_, Some(SeriesSource::SpaceWeather))) => read_file(path),
        Some((_, Some(SeriesSource::Scan))) => Err(EveError::UnsupportedFormat(format!(
            "EVE scan series need FITS decoding: {}",
            path.display()
        ))),
        Some((name, None)) => Err(EveError::UnknownFormat(format!("source '{}'", name))),
    }
}

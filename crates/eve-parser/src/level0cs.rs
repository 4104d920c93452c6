//! Level 0CS space-weather text files.
//!
//! ```text
//! ; Title: EVE Level 0CS diodes 1-minute averages
//! ; Missing data: -1.00e+00
//! ; Column descriptions:
//! ; HHMM: hour and minute UT
//! ; XRS-B proxy: GOES XRS-B proxy
//! ; Format:
//! 2012 112 04 21
//! 0000 4.38e-07
//! ```
//!
//! Header lines start with `;`. The first line after the header is
//! `YYYY DOY MM DD`; each following line is `HHMM` and one value per
//! remaining column.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use eve_common::{EveError, EveResult};
use tracing::debug;

use crate::series::TimeSeries;
use crate::units::level0cs_unit;

const MISSING_DATA: &str = "; Missing data:";
const COLUMN_DESCRIPTIONS: &str = "; Column descriptions:";
const FORMAT: &str = "; Format:";

/// Header text before the first colon, without the leading `;`.
/// Text before the first colon, with every `;` blanked out.
fn header_key(line: &str) -> String {
    let key = line.split(':').next().unwrap_or(line);
    key.replace(';', " ").trim().to_string()
}

/// Metadata entries from the header lines.
///
/// `Created` and `Source` values keep everything after the first colon, so
/// timestamps and URLs survive. Other lines keep only the text between the
/// first and second colons.
fn header_meta(header: &[&str]) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();
    for line in header {
        let line = line.trim_end();
        if line == FORMAT || line == COLUMN_DESCRIPTIONS {
            continue;
        }
        let Some((_, rest)) = line.split_once(':') else {
            continue;
        };
        let value = if line.contains("Created") || line.contains("Source") {
            rest
        } else {
            rest.split(':').next().unwrap_or(rest)
        };
        meta.insert(header_key(line), value.trim().to_string());
    }
    meta
}

/// Column names listed between `; Column descriptions:` and `; Format:`.
fn header_columns(header: &[&str]) -> Vec<String> {
    let mut columns = Vec::new();
    let mut in_descriptions = false;
    for line in header {
        if line.starts_with(FORMAT) {
            in_descriptions = false;
        }
        if in_descriptions {
            columns.push(header_key(line));
        }
        if line.starts_with(COLUMN_DESCRIPTIONS) {
            in_descriptions = true;
        }
    }
    columns
}

fn missing_value(header: &[&str], first_line: usize) -> EveResult<Option<f64>> {
    for (offset, line) in header.iter().enumerate() {
        if !line.contains(MISSING_DATA) {
            continue;
        }
        let raw = line.split(':').nth(1).unwrap_or("").trim();
        let value = raw.parse::<f64>().map_err(|_| {
            EveError::malformed(first_line + offset, format!("bad missing-data value '{}'", raw))
        })?;
        return Ok(Some(value));
    }
    Ok(None)
}

/// Parse the `YYYY DOY MM DD` line.
fn parse_date_line(line: &str, line_no: usize) -> EveResult<NaiveDate> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [year, doy, month, day] = parts.as_slice() else {
        return Err(EveError::malformed(
            line_no,
            format!("expected 'YYYY DOY MM DD', found '{}'", line.trim()),
        ));
    };

    let number = |field: &str, name: &str| {
        field
            .parse::<u32>()
            .map_err(|_| EveError::malformed(line_no, format!("bad {} '{}'", name, field)))
    };
    let year = number(*year, "year")? as i32;
    let doy = number(*doy, "day of year")?;
    let date = NaiveDate::from_ymd_opt(year, number(*month, "month")?, number(*day, "day")?)
        .ok_or_else(|| EveError::malformed(line_no, format!("invalid date '{}'", line.trim())))?;

    if date.ordinal() != doy {
        return Err(EveError::malformed(
            line_no,
            format!("day of year {} does not match {}", doy, date),
        ));
    }
    Ok(date)
}

fn parse_hhmm(field: &str, date: NaiveDate, line_no: usize) -> EveResult<DateTime<Utc>> {
    let bad = || EveError::malformed(line_no, format!("bad HHMM '{}'", field));
    if field.len() != 4 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let hour: u32 = field[..2].parse().map_err(|_| bad())?;
    let minute: u32 = field[2..].parse().map_err(|_| bad())?;
    let naive = date.and_hms_opt(hour, minute, 0).ok_or_else(bad)?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse the text of a Level 0CS file.
pub fn parse(text: &str) -> EveResult<TimeSeries> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let mut header = Vec::new();
    let mut date_line = None;
    for (line_no, line) in lines.by_ref() {
        if line.starts_with(';') {
            header.push(line);
        } else {
            date_line = Some((line_no, line));
            break;
        }
    }

    let missing = missing_value(&header, 1)?;
    let meta = header_meta(&header);
    let names = header_columns(&header);

    let (date_no, date_text) =
        date_line.ok_or_else(|| EveError::malformed(header.len() + 1, "missing date line"))?;
    let Some((_, data_columns)) = names.split_first() else {
        return Err(EveError::malformed(date_no, "no column descriptions in header"));
    };
    let date = parse_date_line(date_text, date_no)?;

    let mut index = Vec::new();
    let mut values = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != names.len() {
            return Err(EveError::malformed(
                line_no,
                format!("expected {} fields, found {}", names.len(), fields.len()),
            ));
        }

        index.push(parse_hhmm(fields[0], date, line_no)?);
        let row = fields[1..]
            .iter()
            .map(|field| {
                let value = field
                    .parse::<f64>()
                    .map_err(|_| EveError::malformed(line_no, format!("bad number '{}'", field)))?;
                Ok(match missing {
                    Some(sentinel) if value == sentinel => f64::NAN,
                    _ => value,
                })
            })
            .collect::<EveResult<Vec<f64>>>()?;
        values.push(row);
    }

    let units = data_columns
        .iter()
        .filter_map(|name| level0cs_unit(name).map(|unit| (name.clone(), unit)))
        .collect();

    debug!(date = %date, rows = index.len(), columns = data_columns.len(), "Parsed Level 0CS file");

    Ok(TimeSeries {
        index,
        columns: data_columns.to_vec(),
        values,
        meta,
        units,
        filename: None,
    })
}

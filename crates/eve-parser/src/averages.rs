//! EVE averages CSV files.
//!
//! The first row names the columns and the first column holds the date of
//! each row. Blank or non-numeric cells are missing samples.

use eve_common::{parse_time, EveError, EveResult};
use tracing::debug;

use crate::series::TimeSeries;
use crate::units::level0cs_unit;

fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse the text of an averages CSV file.
pub fn parse(text: &str) -> EveResult<TimeSeries> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| EveError::malformed(1, "empty averages file"))?;
    let names = split_row(header);
    let columns: Vec<String> = names.iter().skip(1).map(|s| s.to_string()).collect();

    let mut index = Vec::new();
    let mut values = Vec::new();
    for (line_no, line) in lines {
        let cells = split_row(line);
        if cells.len() != names.len() {
            return Err(EveError::malformed(
                line_no,
                format!("expected {} fields, found {}", names.len(), cells.len()),
            ));
        }

        let date = parse_time(cells[0])
            .map_err(|_| EveError::malformed(line_no, format!("bad date '{}'", cells[0])))?;
        index.push(date);
        values.push(
            cells[1..]
                .iter()
                .map(|cell| cell.parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        );
    }

    let units = columns
        .iter()
        .filter_map(|name| level0cs_unit(name).map(|unit| (name.clone(), unit)))
        .collect();

    debug!(rows = index.len(), columns = columns.len(), "Parsed averages file");

    Ok(TimeSeries {
        index,
        columns,
        values,
        units,
        ..Default::default()
    })
}

//! Parsing EVE space-weather files from disk and from generated text.

use chrono::{NaiveDate, TimeZone, Utc};
use eve_common::EveError;
use eve_parser::{parse_text, read_file, read_with_source, SeriesSource, Unit};
use test_utils::fixtures::{averages, level0cs};
use test_utils::{
    assert_approx_eq, create_averages_csv, create_level0cs_text, level0cs_value,
    require_test_file, temp_test_dir,
};

// ============================================================================
// Level 0CS
// ============================================================================

#[test]
fn test_sample_columns_and_units() {
    let series = parse_text("20120421_EVE_L0CS_DIODES_1m.txt", level0cs::SAMPLE).unwrap();

    assert_eq!(series.columns, level0cs::COLUMNS[1..].to_vec());
    assert_eq!(series.len(), 3);
    assert_eq!(series.unit("XRS-B proxy"), Some(Unit::Irradiance));
    assert_eq!(series.unit("30.4ESP"), Some(Unit::Irradiance));
    assert_eq!(series.unit("darkMEGS-P"), Some(Unit::Counts));
    assert_eq!(series.unit("q0ESP"), Some(Unit::Dimensionless));
    assert_eq!(series.unit("CMLat"), Some(Unit::Degrees));
    assert_eq!(series.units.len(), series.columns.len());
}

#[test]
fn test_sample_timestamps_on_file_date() {
    let series = parse_text("20120421_EVE_L0CS_DIODES_1m.txt", level0cs::SAMPLE).unwrap();
    assert_eq!(series.index[0], Utc.with_ymd_and_hms(2012, 4, 21, 0, 0, 0).unwrap());
    assert_eq!(series.index[2], Utc.with_ymd_and_hms(2012, 4, 21, 0, 2, 0).unwrap());

    let range = series.time_range().unwrap();
    assert_eq!(range.duration(), chrono::Duration::minutes(2));
}

#[test]
fn test_sample_missing_sentinel_is_nan() {
    let series = parse_text("20120421_EVE_L0CS_DIODES_1m.txt", level0cs::SAMPLE).unwrap();
    let sem = series.column("SEM proxy").unwrap();
    assert_approx_eq!(sem[0], 1.87e-4, 1e-12);
    assert!(sem[1].is_nan());
    assert!(!sem.iter().any(|v| *v == level0cs::MISSING));

    // Negative values other than the sentinel survive.
    let lat = series.column("CMLat").unwrap();
    assert_approx_eq!(lat[1], -0.10, 1e-12);
}

#[test]
fn test_sample_metadata() {
    let series = parse_text("20120421_EVE_L0CS_DIODES_1m.txt", level0cs::SAMPLE).unwrap();
    assert_eq!(series.meta["Title"], "EVE Level 0CS diodes 1-minute averages");
    assert_eq!(series.meta["Created"], "Sun Apr 22 00:04:11 2012");
    assert_eq!(
        series.meta["Source"],
        "SDO/EVE ESP and MEGS-P, http://lasp.colorado.edu/home/eve/"
    );
    assert_eq!(series.meta["Missing data"], "-1.00e+00");
}

#[test]
fn test_generated_day() {
    let text = create_level0cs_text(2012, 112, 4, 21, 90, 30);
    let series = parse_text("generated.txt", &text).unwrap();

    assert_eq!(series.len(), 90);
    assert_eq!(series.index[89], Utc.with_ymd_and_hms(2012, 4, 21, 1, 29, 0).unwrap());
    assert_eq!(series.values[1][0], level0cs_value(1, 0));
    assert_eq!(series.values[45][16], level0cs_value(45, 16));
    for row in [0, 30, 60] {
        assert!(series.values[row][0].is_nan(), "row {row}");
    }

    let summary = series.summary();
    assert_eq!(summary.columns[0].missing, 3);
    assert_eq!(summary.columns[1].missing, 0);
}

// ============================================================================
// Averages CSV
// ============================================================================

#[test]
fn test_averages_sample() {
    let series = parse_text("EVE_averages.csv", averages::SAMPLE).unwrap();
    assert_eq!(series.columns, vec!["XRS-B proxy", "XRS-A proxy", "30.4ESP"]);
    assert_eq!(series.len(), 3);
    assert_eq!(series.index[1], Utc.with_ymd_and_hms(2012, 4, 22, 0, 0, 0).unwrap());
    assert!(series.values[1][0].is_nan());
    assert!(series.values[2][1].is_nan());
    assert_approx_eq!(series.values[2][2], 3.71e-4, 1e-12);
    assert_eq!(series.unit("30.4ESP"), Some(Unit::Irradiance));
}

#[test]
fn test_generated_averages() {
    let start = NaiveDate::from_ymd_opt(2012, 4, 21).unwrap();
    let text = create_averages_csv(start, 10, &["a", "b", "c"]);
    let series = parse_text("averages.csv", &text).unwrap();
    assert_eq!(series.len(), 10);
    assert_eq!(series.column("c").unwrap()[9], level0cs_value(9, 2));
    assert!(series.units.is_empty());
}

// ============================================================================
// Files and dispatch
// ============================================================================

#[test]
fn test_read_testdata_file() {
    let path = require_test_file!("20120421_EVE_L0CS_DIODES_1m.txt");
    let series = read_file(&path).unwrap();
    assert_eq!(series.filename.as_deref(), Some("20120421_EVE_L0CS_DIODES_1m.txt"));
    assert_eq!(series.len(), 3);
}

#[test]
fn test_read_gzipped_testdata_file() {
    let path = require_test_file!("20120422_EVE_L0CS_DIODES_1m.txt.gz");
    let series = read_file(&path).unwrap();
    assert_eq!(series.index[0], Utc.with_ymd_and_hms(2012, 4, 22, 0, 0, 0).unwrap());
    assert_eq!(series.columns.len(), 17);
}

#[test]
fn test_fits_is_unsupported() {
    let dir = temp_test_dir();
    let fits = dir.path().join("EVS_L2B_2018110_006_02.fit.gz");
    std::fs::write(&fits, b"").unwrap();
    assert!(matches!(read_file(&fits), Err(EveError::UnsupportedFormat(_))));

    let disguised = dir.path().join("scan.dat");
    std::fs::write(&disguised, "SIMPLE  =                    T\n").unwrap();
    assert!(matches!(read_file(&disguised), Err(EveError::UnsupportedFormat(_))));
}

#[test]
fn test_unknown_format() {
    let dir = temp_test_dir();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello\n").unwrap();
    assert!(matches!(read_file(&path), Err(EveError::UnknownFormat(_))));
}

#[test]
fn test_read_with_source() {
    let dir = temp_test_dir();
    let path = dir.path().join("20120421_EVE_L0CS_DIODES_1m.txt");
    std::fs::write(&path, level0cs::SAMPLE).unwrap();

    assert!(read_with_source(&path, Some("EVE")).is_ok());
    assert!(read_with_source(&path, None).is_ok());
    assert!(matches!(
        read_with_source(&path, Some("eve_l2b")),
        Err(EveError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        read_with_source(&path, Some("goes")),
        Err(EveError::UnknownFormat(_))
    ));
    assert_eq!(SeriesSource::scan_unit(), Unit::SpectralIrradiance);
}

//! Common test fixtures for EVE discovery and parsing tests.
//!
//! Patterns and URLs mirror the layout of the LASP EVE archive.

/// Archive URL templates with unbound `{product}`, `{version}` and `{revision}` fields.
pub mod patterns {
    pub const LEVEL_0CS: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/quicklook/\
                                 L0CS/SpWx/%Y/%Y%m%d_EVE_L0CS_DIODES_1m.txt";

    pub const LEVEL_2B: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                level2b/%Y/%j/EV{product}_L2B_%Y%j_{version:03d}_{revision:02d}.fit.gz";

    pub const LEVEL_2: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                               level2/%Y/%j/EV{product}_L2_%Y%j_%H_{version:03d}_{revision:02d}.fit.gz";

    pub const LEVEL_3: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                               level3/%Y/EVE_L3_%Y%j_{version:03d}_{revision:02d}.fit";

    pub const LEVEL_3_MERGED: &str =
        "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/merged/latest_EVE_L3_merged.fit";
}

/// Concrete archive URLs.
pub mod urls {
    pub const LEVEL_0CS_20120421: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/\
                                          quicklook/L0CS/SpWx/2012/20120421_EVE_L0CS_DIODES_1m.txt";
    pub const LEVEL_0CS_20120505: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/\
                                          quicklook/L0CS/SpWx/2012/20120505_EVE_L0CS_DIODES_1m.txt";
    pub const LEVEL_0CS_20120506: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/\
                                          quicklook/L0CS/SpWx/2012/20120506_EVE_L0CS_DIODES_1m.txt";

    pub const LEVEL_2B_2018110: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                        level2b/2018/110/EVS_L2B_2018110_006_02.fit.gz";
    pub const LEVEL_2B_2018150: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                        level2b/2018/150/EVS_L2B_2018150_006_02.fit.gz";
    pub const LEVEL_2B_2018151: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                        level2b/2018/151/EVS_L2B_2018151_006_02.fit.gz";
    pub const LEVEL_2B_2018152: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                        level2b/2018/152/EVS_L2B_2018152_006_02.fit.gz";

    pub const LEVEL_2_2018001_14: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                          level2/2018/001/EVS_L2_2018001_14_006_02.fit.gz";
    pub const LEVEL_2_2018001_15: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                          level2/2018/001/EVS_L2_2018001_15_006_02.fit.gz";

    pub const LEVEL_3_2018110: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/\
                                       level3/2018/EVE_L3_2018110_006_02.fit";

    pub const LEVEL_3_MERGED: &str =
        "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/merged/latest_EVE_L3_merged.fit";
}

/// Reference dates.
pub mod time {
    /// First day Level 2B data is served.
    pub const LEVEL_2B_FIRST_DAY: &str = "2018-04-20T00:00:00Z";

    /// Level 2 is served strictly before this instant.
    pub const LEVEL_2_RETIRED: &str = "2018-04-28T00:00:00Z";

    /// Sentinel start of the full-mission product.
    pub const FULL_HISTORY_START: &str = "1900-01-01T00:00:00Z";
}

/// A short Level 0CS space-weather file.
pub mod level0cs {
    /// Column names in file order, index column first.
    pub const COLUMNS: [&str; 18] = [
        "HHMM",
        "XRS-B proxy",
        "XRS-A proxy",
        "SEM proxy",
        "0.1-7ESPquad",
        "17.1ESP",
        "25.7ESP",
        "30.4ESP",
        "36.6ESP",
        "darkESP",
        "121.6MEGS-P",
        "darkMEGS-P",
        "q0ESP",
        "q1ESP",
        "q2ESP",
        "q3ESP",
        "CMLat",
        "CMLon",
    ];

    /// Missing-data sentinel declared in [`SAMPLE`].
    pub const MISSING: f64 = -1.0;

    /// Three rows on 2012-04-21; the second row has a missing `SEM proxy`.
    pub const SAMPLE: &str = "\
; Title: EVE Level 0CS diodes 1-minute averages
; Source: SDO/EVE ESP and MEGS-P, http://lasp.colorado.edu/home/eve/
; Created: Sun Apr 22 00:04:11 2012
; Missing data: -1.00e+00
; Column descriptions:
; HHMM: hour and minute UT
; XRS-B proxy: GOES XRS-B proxy
; XRS-A proxy: GOES XRS-A proxy
; SEM proxy: SOHO SEM proxy
; 0.1-7ESPquad: ESP quad diode
; 17.1ESP: ESP 17.1 nm channel
; 25.7ESP: ESP 25.7 nm channel
; 30.4ESP: ESP 30.4 nm channel
; 36.6ESP: ESP 36.6 nm channel
; darkESP: ESP dark counts
; 121.6MEGS-P: MEGS-P Lyman-alpha
; darkMEGS-P: MEGS-P dark counts
; q0ESP: quad diode 0
; q1ESP: quad diode 1
; q2ESP: quad diode 2
; q3ESP: quad diode 3
; CMLat: central meridian latitude
; CMLon: central meridian longitude
; Format:
;   YYYY DOY MM DD, then HHMM followed by 17 values
2012 112 04 21
0000 4.38e-07 1.69e-08 1.87e-04 2.33e-04 1.21e-04 4.75e-05 3.62e-04 1.02e-04 12 6.41e-03 31 0.248 0.253 0.250 0.249 -0.10 12.30
0001 4.41e-07 1.72e-08 -1.00e+00 2.34e-04 1.22e-04 4.76e-05 3.63e-04 1.03e-04 12 6.42e-03 31 0.249 0.252 0.250 0.249 -0.10 12.31
0002 4.47e-07 1.75e-08 1.89e-04 2.35e-04 1.22e-04 4.78e-05 3.64e-04 1.03e-04 13 6.42e-03 30 0.249 0.252 0.251 0.248 -0.10 12.32
";
}

/// A short EVE averages CSV file.
pub mod averages {
    pub const SAMPLE: &str = "\
Date,XRS-B proxy,XRS-A proxy,30.4ESP
2012-04-21,4.41e-07,1.72e-08,3.63e-04
2012-04-22,,1.80e-08,3.70e-04
2012-04-23,4.90e-07,n/a,3.71e-04
";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level0cs_sample_rows_match_columns() {
        let rows: Vec<&str> = level0cs::SAMPLE
            .lines()
            .filter(|l| !l.starts_with(';'))
            .skip(1)
            .collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.split_whitespace().count(), level0cs::COLUMNS.len());
        }
    }

    #[test]
    fn test_urls_share_hosts_with_patterns() {
        assert!(urls::LEVEL_2B_2018110.starts_with(&patterns::LEVEL_2B[..60]));
        assert!(urls::LEVEL_0CS_20120421.ends_with("20120421_EVE_L0CS_DIODES_1m.txt"));
    }
}

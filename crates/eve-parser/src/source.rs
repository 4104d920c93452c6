//! Source names that select an EVE series kind.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::units::Unit;

static SCAN_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^eve[_ ]l2b?$").expect("valid scan source regex"));

/// Kind of EVE time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    /// Level 0CS space-weather diodes and averages files
    SpaceWeather,
    /// Level 2/2B spectral scans, one column per wavelength bin
    Scan,
}

impl SeriesSource {
    /// `eve` selects space weather; `eve_l2`, `eve l2b` and friends select scans.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("eve") {
            Some(SeriesSource::SpaceWeather)
        } else if SCAN_SOURCE.is_match(name) {
            Some(SeriesSource::Scan)
        } else {
            None
        }
    }

    /// Unit of every scan column.
    pub fn scan_unit() -> Unit {
        Unit::SpectralIrradiance
    }
}

//! Physical units attached to EVE series columns.

use serde::Serialize;

/// Unit of a series column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// W/m², broadband irradiance
    Irradiance,
    /// W/m²/nm, scan irradiance per wavelength bin
    SpectralIrradiance,
    /// Detector counts
    Counts,
    Dimensionless,
    Degrees,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Irradiance => "W/m^2",
            Unit::SpectralIrradiance => "W/m^2/nm",
            Unit::Counts => "ct",
            Unit::Dimensionless => "",
            Unit::Degrees => "deg",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Dimensionless => f.write_str("dimensionless"),
            other => f.write_str(other.symbol()),
        }
    }
}

/// Unit of a Level 0CS column, `None` for columns without one.
pub fn level0cs_unit(column: &str) -> Option<Unit> {
    let unit = match column {
        "XRS-B proxy" | "XRS-A proxy" | "SEM proxy" => Unit::Irradiance,
        "0.1-7ESPquad" | "17.1ESP" | "25.7ESP" | "30.4ESP" | "36.6ESP" => Unit::Irradiance,
        "121.6MEGS-P" => Unit::Irradiance,
        "darkESP" | "darkMEGS-P" => Unit::Counts,
        "q0ESP" | "q1ESP" | "q2ESP" | "q3ESP" => Unit::Dimensionless,
        "CMLat" | "CMLon" => Unit::Degrees,
        _ => return None,
    };
    Some(unit)
}

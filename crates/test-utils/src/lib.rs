//! Test support for the EVE workspace.
//!
//! - [`fixtures`]: archive patterns, concrete URLs, cutover dates and small
//!   sample files
//! - [`generators`]: synthetic Level 0CS and averages text with predictable values
//! - [`paths`]: bundled test data and variant config lookup
//!
//! Used as a dev-dependency only:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use generators::*;
pub use paths::*;

/// Resolve a test data file or return early from the test.
///
/// ```ignore
/// #[test]
/// fn test_level0cs_file() {
///     let path = require_test_file!("20120421_EVE_L0CS_DIODES_1m.txt");
///     let series = eve_parser::read_file(&path).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let Some(path) = $crate::find_test_file($name) else {
            eprintln!("SKIPPED: test data '{}' not found (set TEST_DATA_DIR)", $name);
            return;
        };
        path
    }};
}

/// Assert two floats differ by at most `epsilon`.
///
/// Fails on NaN, so check missing samples with `is_nan()` instead.
///
/// ```ignore
/// assert_approx_eq!(series.values[0][0], 4.38e-7, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: {} is not within {} of {} (diff {})",
            left,
            epsilon,
            right,
            diff
        );
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(4.38e-7, 4.3800001e-7, 1e-12);
        assert_approx_eq!(-0.10, -0.1, 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, 1.0, 1.0);
    }
}

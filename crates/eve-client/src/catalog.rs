//! Built-in SDO/EVE client variants.
//!
//! | Variant | Level term | Granularity | Valid |
//! |---|---|---|---|
//! | `eve-level0cs` | `0` | day | always |
//! | `eve-level2b` | `"2b"` | day | queries ending on/after 2018-04-20 |
//! | `eve-level2` | `2` / `"2"` | hour | queries starting before 2018-04-28 |
//! | `eve-level3` | `3` / `"3"` | day | always |
//! | `eve-level3-merged` | `"3m"` / `"3merged"` | mission | always |
//!
//! Level 2 and Level 2B both answer queries in the eight days from
//! 2018-04-20 through 2018-04-27.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eve_common::time::midnight;
use eve_common::EveResult;
use url_scraper::FieldValue;

use crate::granularity::{calendar_date, Granularity};
use crate::predicate::{LevelMatch, MatchMode, QueryPredicate, TimeConstraint};
use crate::variant::{ClientVariant, ProductInfo, VariantSpec};

/// Quicklook space-weather archive (Level 0CS), full pattern in `LEVEL_0CS_PATH`.
pub const QUICKLOOK_HOST: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/quicklook/";

/// Science data products archive (Level 2 and above).
pub const PRODUCTS_HOST: &str = "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/";

pub const LEVEL_0CS_PATH: &str = "L0CS/SpWx/%Y/%Y%m%d_EVE_L0CS_DIODES_1m.txt";
pub const LEVEL_2B_PATH: &str =
    "level2b/%Y/%j/EV{product}_L2B_%Y%j_{version:03d}_{revision:02d}.fit.gz";
pub const LEVEL_2_PATH: &str =
    "level2/%Y/%j/EV{product}_L2_%Y%j_%H_{version:03d}_{revision:02d}.fit.gz";
pub const LEVEL_3_PATH: &str = "level3/%Y/EVE_L3_%Y%j_{version:03d}_{revision:02d}.fit";
pub const LEVEL_3_MERGED_PATH: &str = "merged/latest_EVE_L3_merged.fit";

/// Spectrum product code (`EVS`).
pub const PRODUCT_CODE: &str = "S";
pub const VERSION: i64 = 6;
pub const REVISION: i64 = 2;

/// No Level 2B data exists before this day; it succeeds Level 2.
pub const LEVEL_2B_FIRST_DAY: NaiveDate = calendar_date(2018, 4, 20);

/// Level 2 production stopped on this day.
pub const LEVEL_2_RETIRED: NaiveDate = calendar_date(2018, 4, 28);

pub const INSTRUMENT: &str = "eve";

fn product_fields() -> BTreeMap<String, FieldValue> {
    BTreeMap::from([
        ("product".to_string(), FieldValue::from(PRODUCT_CODE)),
        ("version".to_string(), FieldValue::Int(VERSION)),
        ("revision".to_string(), FieldValue::Int(REVISION)),
    ])
}

fn predicate(level: LevelMatch, time: Option<TimeConstraint>) -> QueryPredicate {
    QueryPredicate {
        instrument: INSTRUMENT.to_string(),
        level,
        time,
        mode: MatchMode::DistinctKinds,
    }
}

/// Level 0CS daily 1-minute diode averages.
pub fn level_0cs() -> EveResult<ClientVariant> {
    ClientVariant::new(VariantSpec {
        id: "eve-level0cs".to_string(),
        info: ProductInfo::eve("L0CS"),
        host: QUICKLOOK_HOST.to_string(),
        path: LEVEL_0CS_PATH.to_string(),
        fields: BTreeMap::new(),
        granularity: Granularity::Day,
        predicate: QueryPredicate {
            mode: MatchMode::Counting,
            ..predicate(LevelMatch::Integer(0), None)
        },
    })
}

/// Level 2B daily spectra.
pub fn level_2b() -> EveResult<ClientVariant> {
    ClientVariant::new(VariantSpec {
        id: "eve-level2b".to_string(),
        info: ProductInfo::eve("L2B"),
        host: PRODUCTS_HOST.to_string(),
        path: LEVEL_2B_PATH.to_string(),
        fields: product_fields(),
        granularity: Granularity::Day,
        predicate: predicate(
            LevelMatch::TextAnyOf(vec!["2b".to_string()]),
            Some(TimeConstraint::EndOnOrAfter(midnight(LEVEL_2B_FIRST_DAY))),
        ),
    })
}

/// Level 2 hourly spectra.
pub fn level_2() -> EveResult<ClientVariant> {
    ClientVariant::new(VariantSpec {
        id: "eve-level2".to_string(),
        info: ProductInfo::eve("L2"),
        host: PRODUCTS_HOST.to_string(),
        path: LEVEL_2_PATH.to_string(),
        fields: product_fields(),
        granularity: Granularity::Hour,
        predicate: predicate(
            LevelMatch::IntegerOrText(2),
            Some(TimeConstraint::StartBefore(midnight(LEVEL_2_RETIRED))),
        ),
    })
}

/// Level 3 daily averages.
pub fn level_3() -> EveResult<ClientVariant> {
    ClientVariant::new(VariantSpec {
        id: "eve-level3".to_string(),
        info: ProductInfo::eve("L3"),
        host: PRODUCTS_HOST.to_string(),
        path: LEVEL_3_PATH.to_string(),
        fields: product_fields(),
        granularity: Granularity::Day,
        predicate: predicate(LevelMatch::IntegerOrText(3), None),
    })
}

/// Full-mission merged Level 3 file.
pub fn level_3_merged() -> EveResult<ClientVariant> {
    ClientVariant::new(VariantSpec {
        id: "eve-level3-merged".to_string(),
        info: ProductInfo::eve("L3Merged"),
        host: PRODUCTS_HOST.to_string(),
        path: LEVEL_3_MERGED_PATH.to_string(),
        fields: product_fields(),
        granularity: Granularity::Mission,
        predicate: predicate(
            LevelMatch::TextAnyOf(vec!["3m".to_string(), "3merged".to_string()]),
            None,
        ),
    })
}

/// All built-in EVE variants.
pub fn eve_variants() -> EveResult<Vec<ClientVariant>> {
    Ok(vec![
        level_0cs()?,
        level_2b()?,
        level_2()?,
        level_3()?,
        level_3_merged()?,
    ])
}

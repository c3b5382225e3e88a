use anyhow::Result;

use crate::data::filter::{self, Predicate};
use crate::data::geometry::{join_emissions, CountryShape, JoinedRegion};
use crate::data::model::{CellValue, Table};

use super::{CHART_YEARS, POWER_CODE, UNIT_CODE};

/// Maps restrict to this continent.
pub const CONTINENT: &str = "Europe";

/// Pollutant and variable plotted by the maps.
pub const POLLUTANT: &str = "CO2";
pub const VARIABLE: &str = "TOTAL";

/// Columns irrelevant for the map analysis, dropped from the working copy.
pub const EXTRA_COLUMNS: [&str; 5] = [
    "Country",
    "Pollutant",
    "Variable",
    "Unit",
    "PowerCode Code",
];

/// Fixed color domain of the 2010 map. The 1990 map auto-scales; the
/// asymmetry is carried over from the source dashboard as-is.
pub const FIXED_DOMAIN_2010: (f64, f64) = (2e4, 1e8);

// ---------------------------------------------------------------------------
// Chart structure
// ---------------------------------------------------------------------------

/// How the color scale domain is chosen for one map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorDomain {
    /// Min..max of the joined non-null values.
    Auto,
    Fixed(f64, f64),
}

/// One prepared choropleth: every Europe geometry row with its joined
/// value (None → base-layer gray), centroid label anchors, and a resolved
/// color domain.
#[derive(Debug, Clone)]
pub struct ChoroplethMap {
    pub title: String,
    pub year: i64,
    pub regions: Vec<JoinedRegion>,
    pub domain: (f64, f64),
}

// ---------------------------------------------------------------------------
// Pipeline: drop columns → filter → join → centroid → domain
// ---------------------------------------------------------------------------

/// Build one map for the given year.
pub fn build(
    emissions: &Table,
    shapes: &[CountryShape],
    year: i64,
    domain: ColorDomain,
) -> Result<ChoroplethMap> {
    let mut working = emissions.clone();
    working.drop_columns(&EXTRA_COLUMNS)?;

    let predicates = [
        Predicate::eq("Year", CellValue::Integer(year)),
        Predicate::eq("POL", CellValue::String(POLLUTANT.into())),
        Predicate::eq("Unit Code", CellValue::String(UNIT_CODE.into())),
        Predicate::eq("PowerCode", CellValue::String(POWER_CODE.into())),
        Predicate::eq("VAR", CellValue::String(VARIABLE.into())),
    ];
    let filtered = filter::apply(&working, &predicates)?;
    let regions = join_emissions(shapes, &filtered)?;

    let domain = match domain {
        ColorDomain::Fixed(lo, hi) => (lo, hi),
        ColorDomain::Auto => auto_domain(&regions),
    };

    Ok(ChoroplethMap {
        title: format!("Total CO2 emissions in {year}"),
        year,
        regions,
        domain,
    })
}

/// Build the 1990/2010 pair with their (asymmetric) color domains.
pub fn build_pair(
    emissions: &Table,
    shapes: &[CountryShape],
) -> Result<(ChoroplethMap, ChoroplethMap)> {
    let map_1990 = build(emissions, shapes, CHART_YEARS[0], ColorDomain::Auto)?;
    let map_2010 = build(
        emissions,
        shapes,
        CHART_YEARS[1],
        ColorDomain::Fixed(FIXED_DOMAIN_2010.0, FIXED_DOMAIN_2010.1),
    )?;
    Ok((map_1990, map_2010))
}

fn auto_domain(regions: &[JoinedRegion]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for r in regions {
        if let Some(v) = r.value {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo > hi {
        // No matched value at all; any degenerate domain renders all-gray.
        (0.0, 1.0)
    } else {
        (lo, hi)
    }
}

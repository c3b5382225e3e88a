use anyhow::Result;

use crate::data::filter::{self, Predicate};
use crate::data::model::{CellValue, Table};

use super::{CHART_YEARS, POWER_CODE, UNIT_CODE};

pub const TITLE: &str = "Greenhouse gas emissions by sector in 1990 and 2010";

/// Sector code → display label, in replacement order. The grouped bar
/// chart cannot facet on raw OECD codes, so the working copy is relabeled
/// before aggregation.
pub const SECTORS: [(&str, &str); 5] = [
    ("ENER_IND", "Energy"),
    ("ENER_MANUF", "Manufacturing"),
    ("ENER_TRANS", "Transport"),
    ("ENER_OSECT", "Residential"),
    ("ENER_OTH", "Other"),
];

// ---------------------------------------------------------------------------
// Chart structure
// ---------------------------------------------------------------------------

/// One facet of the grouped bar chart: a sector with one total per year,
/// indexed in step with [`CHART_YEARS`]. Values are megatonnes.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorGroup {
    pub label: String,
    pub megatonnes: [f64; CHART_YEARS.len()],
}

impl SectorGroup {
    fn max(&self) -> f64 {
        self.megatonnes.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// The prepared grouped bar chart, sectors sorted by descending maximum.
#[derive(Debug, Clone, Default)]
pub struct SectorChart {
    pub sectors: Vec<SectorGroup>,
}

// ---------------------------------------------------------------------------
// Pipeline: filter → relabel → aggregate → sort
// ---------------------------------------------------------------------------

/// Build the sector chart from the loaded emissions table.
///
/// Filters to the two chart years in CO2-equivalent thousands of tonnes,
/// relabels the sector codes on the working copy, sums values per
/// (sector, year) across countries, and rescales to megatonnes. The loaded
/// table itself is never mutated.
pub fn build(emissions: &Table) -> Result<SectorChart> {
    let predicates = [
        Predicate::one_of("Year", CHART_YEARS.map(CellValue::Integer)),
        Predicate::eq("Unit Code", CellValue::String(UNIT_CODE.into())),
        Predicate::eq("PowerCode", CellValue::String(POWER_CODE.into())),
    ];
    let mut working = filter::apply(emissions, &predicates)?;
    filter::relabel(&mut working, &SECTORS)?;

    let var_idx = working.require_column("VAR")?;
    let year_idx = working.require_column("Year")?;
    let value_idx = working.require_column("Value")?;

    let mut sectors: Vec<SectorGroup> = SECTORS
        .iter()
        .map(|&(_, label)| SectorGroup {
            label: label.to_string(),
            megatonnes: [0.0; CHART_YEARS.len()],
        })
        .collect();

    for row in &working.rows {
        let Some(var) = row[var_idx].as_str() else {
            continue;
        };
        let Some(group) = sectors.iter_mut().find(|g| g.label == var) else {
            continue; // not one of the five charted sectors
        };
        let Some(year_slot) = CHART_YEARS
            .iter()
            .position(|&y| row[year_idx] == CellValue::Integer(y))
        else {
            continue;
        };
        if let Some(value) = row[value_idx].as_f64() {
            // Raw values are thousands of tonnes; the chart shows megatonnes.
            group.megatonnes[year_slot] += value / 1000.0;
        }
    }

    sectors.sort_by(|a, b| b.max().total_cmp(&a.max()));

    Ok(SectorChart { sectors })
}

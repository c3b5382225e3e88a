use std::path::Path;

use crate::chart::choropleth::{self, ChoroplethMap, CONTINENT};
use crate::chart::sectors::{self, SectorChart};
use crate::chart::EMISSION_COLUMNS;
use crate::data::geometry::{filter_continent, CountryShape};
use crate::data::loader;
use crate::data::model::Table;

/// Fixed relative inputs tried at startup.
pub const DEFAULT_EMISSIONS_PATH: &str = "data/total.csv";
pub const DEFAULT_BOUNDARIES_PATH: &str = "data/custom.geo.json";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dashboard the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Sectors,
    Maps,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded emissions table (None until a CSV is loaded).
    pub emissions: Option<Table>,

    /// Europe boundary shapes (empty until a GeoJSON is loaded).
    pub shapes: Vec<CountryShape>,

    /// Active dashboard.
    pub view: View,

    /// Prepared grouped bar chart (rebuilt on load).
    pub sector_chart: Option<SectorChart>,

    /// Prepared 1990/2010 choropleth pair (rebuilt on load).
    pub maps: Option<(ChoroplethMap, ChoroplethMap)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Attempt the fixed relative inputs. Missing defaults are not an
    /// error; the user can still open files by hand.
    pub fn load_defaults(&mut self) {
        let emissions = Path::new(DEFAULT_EMISSIONS_PATH);
        if emissions.exists() {
            self.load_emissions(emissions);
        } else {
            log::warn!("no {DEFAULT_EMISSIONS_PATH}; waiting for File → Open");
        }

        let boundaries = Path::new(DEFAULT_BOUNDARIES_PATH);
        if boundaries.exists() {
            self.load_boundaries(boundaries);
        } else {
            log::warn!("no {DEFAULT_BOUNDARIES_PATH}; maps need a boundary file");
        }
    }

    /// Load an emissions CSV and rebuild both charts.
    pub fn load_emissions(&mut self, path: &Path) {
        match loader::load_emissions_csv(path, &EMISSION_COLUMNS) {
            Ok(table) => {
                log::info!("loaded {} emissions rows from {}", table.len(), path.display());
                self.emissions = Some(table);
                self.status_message = None;
                self.rebuild_charts();
            }
            Err(e) => self.fail(format!("Error: {e:#}")),
        }
    }

    /// Load a GeoJSON boundary file and rebuild the maps.
    pub fn load_boundaries(&mut self, path: &Path) {
        match loader::load_country_shapes(path) {
            Ok(shapes) => {
                let shapes = filter_continent(shapes, CONTINENT);
                log::info!(
                    "loaded {} {CONTINENT} boundaries from {}",
                    shapes.len(),
                    path.display()
                );
                self.shapes = shapes;
                self.status_message = None;
                self.rebuild_charts();
            }
            Err(e) => self.fail(format!("Error: {e:#}")),
        }
    }

    /// Rebuild whatever charts the loaded inputs allow. A build failure
    /// leaves the previous chart untouched.
    fn rebuild_charts(&mut self) {
        // Take the table out so `fail` can borrow self mutably in between.
        let Some(emissions) = self.emissions.take() else {
            return;
        };

        match sectors::build(&emissions) {
            Ok(chart) => self.sector_chart = Some(chart),
            Err(e) => self.fail(format!("Sector chart failed: {e:#}")),
        }

        if !self.shapes.is_empty() {
            match choropleth::build_pair(&emissions, &self.shapes) {
                Ok(pair) => self.maps = Some(pair),
                Err(e) => self.fail(format!("Choropleth failed: {e:#}")),
            }
        }

        self.emissions = Some(emissions);
    }

    fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.status_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{parse_country_shapes, read_emissions};

    const CSV: &str = "\
COU,Country,POL,Pollutant,VAR,Variable,Year,Unit Code,Unit,PowerCode Code,PowerCode,Value
FRA,France,CO2,Carbon dioxide,TOTAL,Total,1990,T_CO2_EQVT,Tonnes of CO2 equivalent,3,Thousands,42000
FRA,France,GHG,Greenhouse gases,ENER_IND,Energy Industries,1990,T_CO2_EQVT,Tonnes of CO2 equivalent,3,Thousands,1000
";

    const GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "iso_a3": "FRA", "continent": "Europe" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[ -5.0, 42.0 ], [ 8.0, 42.0 ], [ 8.0, 51.0 ], [ -5.0, 51.0 ], [ -5.0, 42.0 ]]]
            }
        }]
    }"#;

    #[test]
    fn rebuild_builds_both_charts_and_keeps_the_table() {
        let mut state = AppState::default();
        state.shapes = filter_continent(parse_country_shapes(GEOJSON).unwrap(), CONTINENT);
        state.emissions = Some(read_emissions(CSV.as_bytes(), &EMISSION_COLUMNS).unwrap());

        state.rebuild_charts();

        assert!(state.sector_chart.is_some());
        assert!(state.maps.is_some());
        assert!(state.emissions.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn build_failure_reports_status_without_losing_the_table() {
        let mut state = AppState::default();
        // A table missing the expected columns makes both builds fail.
        state.emissions = Some(Table::new(vec!["COU".into()]));
        state.shapes = filter_continent(parse_country_shapes(GEOJSON).unwrap(), CONTINENT);

        state.rebuild_charts();

        assert!(state.status_message.is_some());
        assert!(state.emissions.is_some());
        assert!(state.sector_chart.is_none());
        assert!(state.maps.is_none());
    }
}

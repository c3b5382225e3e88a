//! Writes a small `data/total.csv` and `data/custom.geo.json` so the
//! dashboard runs without downloading the real OECD dataset.

use anyhow::{Context, Result};
use serde_json::json;

/// Minimal deterministic PRNG (xorshift64*), enough to vary sample values.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_f64(&mut self) -> f64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        let x = self.state.wrapping_mul(0x2545F4914F6CDD1D);
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

const SECTORS: [(&str, &str, f64); 5] = [
    ("ENER_IND", "Energy Industries", 1200.0),
    ("ENER_MANUF", "Manufacturing industries and construction", 700.0),
    ("ENER_TRANS", "Transport", 900.0),
    ("ENER_OSECT", "Other sectors", 500.0),
    ("ENER_OTH", "Other energy", 150.0),
];

// (iso_a3, name, continent, scale, lon/lat bounding box)
const COUNTRIES: [(&str, &str, &str, f64, [f64; 4]); 7] = [
    ("FRA", "France", "Europe", 1.0, [-5.0, 42.0, 8.0, 51.0]),
    ("DEU", "Germany", "Europe", 1.3, [6.0, 47.0, 15.0, 55.0]),
    ("ESP", "Spain", "Europe", 0.7, [-9.0, 36.0, 3.0, 43.0]),
    ("NOR", "Norway", "Europe", 0.2, [4.0, 58.0, 31.0, 71.0]),
    ("POL", "Poland", "Europe", 0.8, [14.0, 49.0, 24.0, 55.0]),
    ("GBR", "United Kingdom", "Europe", 1.2, [-8.0, 50.0, 2.0, 59.0]),
    ("USA", "United States", "North America", 6.0, [-125.0, 25.0, -66.0, 49.0]),
];

// Switzerland appears in the boundary file only: it exercises the
// null-value path of the left join.
const GEOMETRY_ONLY: [(&str, &str, &str, [f64; 4]); 1] =
    [("CHE", "Switzerland", "Europe", [6.0, 45.8, 10.5, 47.8])];

fn write_emissions_csv(rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path("data/total.csv").context("creating data/total.csv")?;
    writer.write_record([
        "COU",
        "Country",
        "POL",
        "Pollutant",
        "VAR",
        "Variable",
        "Year",
        "Unit Code",
        "Unit",
        "PowerCode Code",
        "PowerCode",
        "Value",
    ])?;

    let mut rows = 0usize;
    for (cou, country, _, scale, _) in COUNTRIES {
        for year in [1990i64, 2010] {
            let growth = if year == 2010 { 1.0 + rng.next_f64() * 0.5 } else { 1.0 };
            let mut total = 0.0;

            let year_field = year.to_string();

            for (var, variable, base) in SECTORS {
                let value = base * scale * growth * (0.8 + rng.next_f64() * 0.4);
                total += value;
                let value_field = format!("{value:.1}");
                writer.write_record([
                    cou,
                    country,
                    "GHG",
                    "Greenhouse gases",
                    var,
                    variable,
                    year_field.as_str(),
                    "T_CO2_EQVT",
                    "Tonnes of CO2 equivalent",
                    "3",
                    "Thousands",
                    value_field.as_str(),
                ])?;
                rows += 1;
            }

            let total_field = format!("{:.1}", total * 0.8);
            writer.write_record([
                cou,
                country,
                "CO2",
                "Carbon dioxide",
                "TOTAL",
                "Total emissions",
                year_field.as_str(),
                "T_CO2_EQVT",
                "Tonnes of CO2 equivalent",
                "3",
                "Thousands",
                total_field.as_str(),
            ])?;
            rows += 1;
        }
    }

    writer.flush()?;
    println!("Wrote {rows} rows to data/total.csv");
    Ok(())
}

fn bbox_feature(iso_a3: &str, name: &str, continent: &str, bbox: [f64; 4]) -> serde_json::Value {
    let [west, south, east, north] = bbox;
    json!({
        "type": "Feature",
        "properties": { "iso_a3": iso_a3, "name": name, "continent": continent },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [west, south], [east, south], [east, north], [west, north], [west, south]
            ]]
        }
    })
}

fn write_boundaries() -> Result<()> {
    let mut features: Vec<serde_json::Value> = COUNTRIES
        .iter()
        .map(|&(cou, name, continent, _, bbox)| bbox_feature(cou, name, continent, bbox))
        .collect();
    for &(cou, name, continent, bbox) in &GEOMETRY_ONLY {
        features.push(bbox_feature(cou, name, continent, bbox));
    }

    let collection = json!({ "type": "FeatureCollection", "features": features });
    let text = serde_json::to_string_pretty(&collection)?;
    std::fs::write("data/custom.geo.json", text).context("writing data/custom.geo.json")?;
    println!("Wrote {} boundaries to data/custom.geo.json", COUNTRIES.len() + GEOMETRY_ONLY.len());
    Ok(())
}

fn main() -> Result<()> {
    std::fs::create_dir_all("data").context("creating data directory")?;
    let mut rng = SimpleRng::new(42);
    write_emissions_csv(&mut rng)?;
    write_boundaries()?;
    Ok(())
}

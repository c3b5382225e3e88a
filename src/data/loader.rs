use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use geo::{MultiPolygon, Polygon};

use super::geometry::CountryShape;
use super::model::{CellValue, Table};
use super::DataError;

// ---------------------------------------------------------------------------
// Emissions CSV
// ---------------------------------------------------------------------------

/// Load an emissions CSV, projected onto exactly the named columns.
///
/// The file must carry a header row containing every requested column;
/// source row order is preserved and cell types are inferred per value
/// (integer, float, bool, string, empty → null).
pub fn load_emissions_csv(path: &Path, columns: &[&str]) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_emissions(file, columns).with_context(|| format!("reading {}", path.display()))
}

/// Reader-based core of [`load_emissions_csv`], split out for tests.
pub fn read_emissions(source: impl io::Read, columns: &[&str]) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Map each requested column to its position in the source header.
    let mut projection = Vec::with_capacity(columns.len());
    for &col in columns {
        let idx = headers
            .iter()
            .position(|h| h == col)
            .ok_or_else(|| DataError::MissingColumn(col.to_string()))?;
        projection.push(idx);
    }

    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<CellValue> = projection
            .iter()
            .map(|&idx| infer_cell(record.get(idx).unwrap_or("")))
            .collect();
        table.rows.push(row);
    }

    Ok(table)
}

fn infer_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// GeoJSON boundaries
// ---------------------------------------------------------------------------

/// Load country boundary shapes from a GeoJSON feature collection.
///
/// Every feature must carry `iso_a3` and `continent` string properties and a
/// Polygon or MultiPolygon geometry; anything else is a geometry error.
pub fn load_country_shapes(path: &Path) -> Result<Vec<CountryShape>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening GeoJSON {}", path.display()))?;
    parse_country_shapes(&text).with_context(|| format!("reading {}", path.display()))
}

/// String-based core of [`load_country_shapes`], split out for tests.
pub fn parse_country_shapes(text: &str) -> Result<Vec<CountryShape>> {
    let geojson: geojson::GeoJson = text.parse().context("parsing GeoJSON")?;
    let collection = geojson::FeatureCollection::try_from(geojson)
        .context("expected a GeoJSON FeatureCollection")?;

    let mut shapes = Vec::with_capacity(collection.features.len());

    for (i, feature) in collection.features.into_iter().enumerate() {
        let cou = feature
            .property("iso_a3")
            .and_then(|v| v.as_str())
            .with_context(|| format!("feature {i}: missing 'iso_a3' property"))?
            .to_string();
        let continent = feature
            .property("continent")
            .and_then(|v| v.as_str())
            .with_context(|| format!("feature {i}: missing 'continent' property"))?
            .to_string();

        let geometry = feature
            .geometry
            .ok_or_else(|| DataError::BadGeometry(cou.clone()))?;
        let geometry = feature_multipolygon(geometry, &cou)?;

        shapes.push(CountryShape {
            cou,
            continent,
            geometry,
        });
    }

    Ok(shapes)
}

/// Normalize a GeoJSON geometry to a `MultiPolygon`.
fn feature_multipolygon(
    geometry: geojson::Geometry,
    cou: &str,
) -> Result<MultiPolygon<f64>, DataError> {
    match geometry.value {
        v @ geojson::Value::Polygon(_) => {
            let polygon: Polygon<f64> =
                v.try_into().map_err(|_| DataError::BadGeometry(cou.to_string()))?;
            Ok(MultiPolygon(vec![polygon]))
        }
        v @ geojson::Value::MultiPolygon(_) => v
            .try_into()
            .map_err(|_| DataError::BadGeometry(cou.to_string())),
        _ => Err(DataError::BadGeometry(cou.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
COU,Country,POL,Year,Unit Code,PowerCode,Value,Extra
FRA,France,CO2,1990,T_CO2_EQVT,Thousands,1000,ignored
DEU,Germany,CO2,2010,T_CO2_EQVT,Thousands,2500.5,ignored
";

    #[test]
    fn projection_keeps_exactly_the_requested_columns() {
        let cols = ["COU", "Year", "Value"];
        let table = read_emissions(CSV.as_bytes(), &cols).unwrap();
        assert_eq!(table.columns, vec!["COU", "Year", "Value"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "COU"), Some(&CellValue::String("FRA".into())));
        assert_eq!(table.get(0, "Year"), Some(&CellValue::Integer(1990)));
        assert_eq!(table.get(0, "Value"), Some(&CellValue::Integer(1000)));
        assert_eq!(table.get(1, "Value"), Some(&CellValue::Float(2500.5)));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let err = read_emissions(CSV.as_bytes(), &["COU", "Nope"]).unwrap_err();
        assert!(err.to_string().contains("Nope") || format!("{err:#}").contains("Nope"));
    }

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
    fn geojson_polygon_becomes_a_country_shape() {
        let shapes = parse_country_shapes(GEOJSON).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].cou, "FRA");
        assert_eq!(shapes[0].continent, "Europe");
        assert_eq!(shapes[0].geometry.0.len(), 1);
    }

    #[test]
    fn interior_rings_survive_parsing() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "iso_a3": "ZAF", "continent": "Africa" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[ 16.0, -35.0 ], [ 33.0, -35.0 ], [ 33.0, -22.0 ], [ 16.0, -22.0 ], [ 16.0, -35.0 ]],
                        [[ 27.0, -30.5 ], [ 29.5, -30.5 ], [ 29.5, -28.5 ], [ 27.0, -28.5 ], [ 27.0, -30.5 ]]
                    ]
                }
            }]
        }"#;
        let shapes = parse_country_shapes(text).unwrap();
        // The enclave hole must stay attached to its polygon.
        assert_eq!(shapes[0].geometry.0[0].interiors().len(), 1);
    }

    #[test]
    fn point_geometry_is_rejected() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "iso_a3": "FRA", "continent": "Europe" },
                "geometry": { "type": "Point", "coordinates": [2.0, 48.0] }
            }]
        }"#;
        assert!(parse_country_shapes(text).is_err());
    }
}

use std::collections::BTreeMap;

use geo::{Centroid, MultiPolygon, Point};

use super::model::Table;
use super::DataError;

// ---------------------------------------------------------------------------
// Country boundary shapes
// ---------------------------------------------------------------------------

/// One country boundary from the GeoJSON file, keyed by ISO-3166 alpha-3.
#[derive(Debug, Clone)]
pub struct CountryShape {
    pub cou: String,
    pub continent: String,
    pub geometry: MultiPolygon<f64>,
}

/// Keep only the shapes belonging to one continent.
pub fn filter_continent(shapes: Vec<CountryShape>, continent: &str) -> Vec<CountryShape> {
    shapes
        .into_iter()
        .filter(|s| s.continent == continent)
        .collect()
}

// ---------------------------------------------------------------------------
// Left join with emissions + centroid
// ---------------------------------------------------------------------------

/// A geometry row after the left join: the boundary, the matched emissions
/// value (None where no row matched), and the planar centroid used for
/// label placement. The centroid is a lossy approximation for non-convex
/// and multi-part polygons.
#[derive(Debug, Clone)]
pub struct JoinedRegion {
    pub cou: String,
    pub geometry: MultiPolygon<f64>,
    pub value: Option<f64>,
    pub centroid: Option<Point<f64>>,
}

/// Left-join emissions onto boundary shapes by country code.
///
/// Every geometry row is preserved; the emissions table contributes only
/// its `Value` for matching `COU` rows. The table must already be filtered
/// to a single (year, pollutant, unit, power-code, variable) combination.
pub fn join_emissions(
    shapes: &[CountryShape],
    emissions: &Table,
) -> Result<Vec<JoinedRegion>, DataError> {
    let cou_idx = emissions.require_column("COU")?;
    let value_idx = emissions.require_column("Value")?;

    let mut values: BTreeMap<&str, f64> = BTreeMap::new();
    for row in &emissions.rows {
        if let (Some(cou), Some(value)) = (row[cou_idx].as_str(), row[value_idx].as_f64()) {
            values.entry(cou).or_insert(value);
        }
    }

    Ok(shapes
        .iter()
        .map(|shape| JoinedRegion {
            cou: shape.cou.clone(),
            geometry: shape.geometry.clone(),
            value: values.get(shape.cou.as_str()).copied(),
            centroid: shape.geometry.centroid(),
        })
        .collect())
}

impl JoinedRegion {
    /// Centroid as (longitude, latitude), when the geometry is non-degenerate.
    pub fn centroid_lon_lat(&self) -> Option<(f64, f64)> {
        self.centroid.map(|p| (p.x(), p.y()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use geo::{polygon, BoundingRect, Contains};

    fn france() -> CountryShape {
        CountryShape {
            cou: "FRA".into(),
            continent: "Europe".into(),
            geometry: MultiPolygon(vec![polygon![
                (x: -5.0, y: 42.0),
                (x: 8.0, y: 42.0),
                (x: 8.0, y: 51.0),
                (x: -5.0, y: 51.0),
            ]]),
        }
    }

    fn norway() -> CountryShape {
        CountryShape {
            cou: "NOR".into(),
            continent: "Europe".into(),
            geometry: MultiPolygon(vec![polygon![
                (x: 4.0, y: 58.0),
                (x: 31.0, y: 58.0),
                (x: 31.0, y: 71.0),
                (x: 4.0, y: 71.0),
            ]]),
        }
    }

    fn emissions_2010() -> Table {
        let mut t = Table::new(vec!["COU".into(), "Year".into(), "Value".into()]);
        t.rows.push(vec![
            CellValue::String("FRA".into()),
            CellValue::Integer(2010),
            CellValue::Integer(50000),
        ]);
        t
    }

    #[test]
    fn join_preserves_geometry_row_count() {
        let shapes = vec![france(), norway()];
        let joined = join_emissions(&shapes, &emissions_2010()).unwrap();
        assert_eq!(joined.len(), shapes.len());

        let empty = Table::new(vec!["COU".into(), "Value".into()]);
        let joined = join_emissions(&shapes, &empty).unwrap();
        assert_eq!(joined.len(), shapes.len());
    }

    #[test]
    fn matched_region_carries_value_and_interior_centroid() {
        let shapes = vec![france()];
        let joined = join_emissions(&shapes, &emissions_2010()).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].value, Some(50000.0));

        let bbox = shapes[0].geometry.bounding_rect().unwrap();
        let centroid = joined[0].centroid.unwrap();
        assert!(bbox.contains(&centroid) || {
            // Contains is strict on the boundary; bound check is enough here.
            centroid.x() >= bbox.min().x
                && centroid.x() <= bbox.max().x
                && centroid.y() >= bbox.min().y
                && centroid.y() <= bbox.max().y
        });
    }

    #[test]
    fn unmatched_region_stays_with_null_value() {
        let shapes = vec![france(), norway()];
        let joined = join_emissions(&shapes, &emissions_2010()).unwrap();
        let nor = joined.iter().find(|r| r.cou == "NOR").unwrap();
        assert_eq!(nor.value, None);
        assert!(nor.centroid.is_some());
    }

    #[test]
    fn continent_filter_drops_other_continents() {
        let mut shapes = vec![france()];
        shapes.push(CountryShape {
            cou: "USA".into(),
            continent: "North America".into(),
            geometry: france().geometry,
        });
        let europe = filter_continent(shapes, "Europe");
        assert_eq!(europe.len(), 1);
        assert_eq!(europe[0].cou, "FRA");
    }
}

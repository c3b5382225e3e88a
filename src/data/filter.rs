use std::collections::BTreeSet;

use anyhow::Result;
use regex::Regex;

use super::model::{CellValue, Table};
use super::DataError;

// ---------------------------------------------------------------------------
// Categorical predicates
// ---------------------------------------------------------------------------

/// An equality or disjunction constraint over one column.
/// A row passes when its cell is contained in `allowed`.
#[derive(Debug, Clone)]
pub struct Predicate {
    pub column: String,
    pub allowed: BTreeSet<CellValue>,
}

impl Predicate {
    /// Exact-match equality on one value.
    pub fn eq(column: &str, value: CellValue) -> Self {
        Predicate {
            column: column.to_string(),
            allowed: BTreeSet::from([value]),
        }
    }

    /// Disjunction over several values.
    pub fn one_of(column: &str, values: impl IntoIterator<Item = CellValue>) -> Self {
        Predicate {
            column: column.to_string(),
            allowed: values.into_iter().collect(),
        }
    }
}

/// Return the subset of rows satisfying the conjunction of all predicates,
/// preserving row order. Every predicate column must exist in the table.
pub fn apply(table: &Table, predicates: &[Predicate]) -> Result<Table, DataError> {
    // Resolve column positions up front so a bad predicate fails fast.
    let mut resolved = Vec::with_capacity(predicates.len());
    for p in predicates {
        resolved.push((table.require_column(&p.column)?, &p.allowed));
    }

    let rows = table
        .rows
        .iter()
        .filter(|row| resolved.iter().all(|(idx, allowed)| allowed.contains(&row[*idx])))
        .cloned()
        .collect();

    Ok(Table {
        columns: table.columns.clone(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Code → label substitution
// ---------------------------------------------------------------------------

/// Replace every occurrence of each code substring with its label, across
/// all string cells, first-pair-first. Operates in place on the working
/// copy; callers must not hand in the cached original table.
pub fn relabel(table: &mut Table, pairs: &[(&str, &str)]) -> Result<()> {
    for &(code, label) in pairs {
        let re = Regex::new(&regex::escape(code))?;
        for row in &mut table.rows {
            for cell in row.iter_mut() {
                if let CellValue::String(s) = cell {
                    if re.is_match(s) {
                        *s = re.replace_all(s, label).into_owned();
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emissions_fixture() -> Table {
        let mut t = Table::new(vec![
            "COU".into(),
            "VAR".into(),
            "Year".into(),
            "Value".into(),
        ]);
        let rows = [
            ("FRA", "ENER_IND", 1990, 1000.0),
            ("FRA", "ENER_IND", 2010, 1200.0),
            ("FRA", "ENER_TRANS", 1990, 800.0),
            ("FRA", "ENER_IND", 2000, 900.0),
        ];
        for (cou, var, year, value) in rows {
            t.rows.push(vec![
                CellValue::String(cou.into()),
                CellValue::String(var.into()),
                CellValue::Integer(year),
                CellValue::Float(value),
            ]);
        }
        t
    }

    #[test]
    fn conjunction_of_predicates_preserves_order() {
        let t = emissions_fixture();
        let preds = [
            Predicate::one_of(
                "Year",
                [CellValue::Integer(1990), CellValue::Integer(2010)],
            ),
            Predicate::eq("VAR", CellValue::String("ENER_IND".into())),
        ];
        let filtered = apply(&t, &preds).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.get(0, "Year"), Some(&CellValue::Integer(1990)));
        assert_eq!(filtered.get(1, "Year"), Some(&CellValue::Integer(2010)));
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = emissions_fixture();
        let preds = [Predicate::eq("VAR", CellValue::String("ENER_IND".into()))];
        let once = apply(&t, &preds).unwrap();
        let twice = apply(&once, &preds).unwrap();
        assert_eq!(once.rows, twice.rows);
        assert_eq!(once.columns, twice.columns);
    }

    #[test]
    fn predicate_over_absent_column_is_an_error() {
        let t = emissions_fixture();
        let preds = [Predicate::eq("Nope", CellValue::Null)];
        assert!(matches!(
            apply(&t, &preds),
            Err(DataError::MissingColumn(_))
        ));
    }

    #[test]
    fn relabel_replaces_every_known_code() {
        let mut t = emissions_fixture();
        relabel(&mut t, &[("ENER_IND", "Energy"), ("ENER_TRANS", "Transport")]).unwrap();
        let vars: Vec<_> = (0..t.len())
            .map(|i| t.get(i, "VAR").unwrap().to_string())
            .collect();
        assert_eq!(vars, ["Energy", "Energy", "Transport", "Energy"]);
        // No label collides with an unreplaced code.
        assert!(vars.iter().all(|v| !v.contains("ENER_")));
    }
}

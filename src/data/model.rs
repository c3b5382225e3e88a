use std::fmt;

use super::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Filtering puts `CellValue` in predicate sets, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so predicate sets can hold floats --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Borrow the value as a string slice if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – a column-named, row-major tabular working set
// ---------------------------------------------------------------------------

/// An in-memory table: ordered column names plus row-major cells.
/// Invariant: every row holds exactly `columns.len()` cells, in column order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column, or a schema error naming the offender.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Cell at (row, column name), if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Drop the named columns in place. Each name must exist.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<(), DataError> {
        let mut drop_idx = Vec::with_capacity(names.len());
        for name in names {
            drop_idx.push(self.require_column(name)?);
        }
        drop_idx.sort_unstable();
        // A duplicated name must not shift the removal onto a neighbour.
        drop_idx.dedup();

        // Indices shift left as earlier columns are removed.
        for (removed, idx) in drop_idx.iter().enumerate() {
            let at = idx - removed;
            self.columns.remove(at);
            for row in &mut self.rows {
                row.remove(at);
            }
        }
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_three() -> Table {
        Table {
            columns: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![
                vec![
                    CellValue::Integer(1),
                    CellValue::String("x".into()),
                    CellValue::Float(0.5),
                ],
                vec![
                    CellValue::Integer(2),
                    CellValue::String("y".into()),
                    CellValue::Null,
                ],
            ],
        }
    }

    #[test]
    fn require_column_reports_missing() {
        let t = two_by_three();
        assert_eq!(t.require_column("b").unwrap(), 1);
        assert!(matches!(
            t.require_column("nope"),
            Err(DataError::MissingColumn(_))
        ));
    }

    #[test]
    fn drop_columns_removes_cells_in_every_row() {
        let mut t = two_by_three();
        t.drop_columns(&["a", "c"]).unwrap();
        assert_eq!(t.columns, vec!["b".to_string()]);
        assert_eq!(t.rows[0], vec![CellValue::String("x".into())]);
        assert_eq!(t.rows[1], vec![CellValue::String("y".into())]);
    }

    #[test]
    fn duplicated_drop_name_removes_the_column_once() {
        let mut t = two_by_three();
        t.drop_columns(&["a", "a"]).unwrap();
        assert_eq!(t.columns, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(t.rows[0].len(), 2);
    }

    #[test]
    fn cell_value_numeric_accessor() {
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::String("7".into()).as_f64(), None);
    }
}

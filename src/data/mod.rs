/// Data layer: tabular core, loading, filtering, and geometry.
///
/// Architecture:
/// ```text
///  total.csv            custom.geo.json
///       │                     │
///       ▼                     ▼
///  ┌──────────┐         ┌──────────┐
///  │  loader  │         │  loader  │
///  └──────────┘         └──────────┘
///       │                     │
///       ▼                     ▼
///  ┌──────────┐         ┌──────────────┐
///  │  Table   │         │ CountryShape │
///  └──────────┘         └──────────────┘
///       │                     │
///       ▼                     ▼
///  ┌──────────┐         ┌──────────────┐
///  │  filter  │────────►│ join+centroid│
///  └──────────┘         └──────────────┘
/// ```

pub mod filter;
pub mod geometry;
pub mod loader;
pub mod model;

use thiserror::Error;

/// Typed failures of the data layer. Nothing here is recovered;
/// callers surface these at the app boundary.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{0}' not found in table")]
    MissingColumn(String),
    #[error("feature '{0}' has a malformed or unsupported geometry")]
    BadGeometry(String),
}

/// Chart layer: pure transformations from loaded tables to renderable
/// chart structures. The `ui` layer only draws these; nothing here touches
/// egui.

pub mod choropleth;
pub mod sectors;

/// Column projection used when loading the emissions CSV.
pub const EMISSION_COLUMNS: [&str; 12] = [
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
];

/// The two years compared by both dashboards.
pub const CHART_YEARS: [i64; 2] = [1990, 2010];

/// Unit restriction: tonnes of CO2 equivalent.
pub const UNIT_CODE: &str = "T_CO2_EQVT";

/// Power-code restriction: raw values are in thousands of tonnes.
pub const POWER_CODE: &str = "Thousands";

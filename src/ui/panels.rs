use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::CHART_YEARS;
use crate::color::generate_palette;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – view selection and legends
// ---------------------------------------------------------------------------

/// Render the left panel: dashboard switch plus the active view's legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboards");
    ui.separator();

    ui.selectable_value(&mut state.view, View::Sectors, "Emissions by sector");
    ui.selectable_value(&mut state.view, View::Maps, "Total CO2 maps (Europe)");

    ui.separator();

    match state.view {
        View::Sectors => sectors_legend(ui),
        View::Maps => maps_legend(ui, state),
    }
}

fn sectors_legend(ui: &mut Ui) {
    ui.strong("Years");
    let colors = generate_palette(CHART_YEARS.len());
    for (&year, color) in CHART_YEARS.iter().zip(colors) {
        ui.label(RichText::new(year.to_string()).color(color));
    }
    ui.add_space(4.0);
    ui.label("Bars are summed over all reporting countries, in megatonnes of CO2 equivalent.");
}

fn maps_legend(ui: &mut Ui, state: &AppState) {
    ui.strong("Color scales");
    match &state.maps {
        Some((left, right)) => {
            for map in [left, right] {
                let (lo, hi) = map.domain;
                ui.label(format!("{}: {lo:.0} – {hi:.0} kt", map.year));
            }
            ui.add_space(4.0);
            ui.label("Scales are independent per year; gray countries have no reported value.");
        }
        None => {
            ui.label("No maps yet – load both input files.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open emissions CSV…").clicked() {
                open_emissions_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open boundary GeoJSON…").clicked() {
                open_boundaries_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.emissions {
            ui.label(format!("{} emissions rows", table.len()));
        }
        if !state.shapes.is_empty() {
            ui.label(format!("{} boundaries", state.shapes.len()));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_emissions_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open emissions data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_emissions(&path);
    }
}

fn open_boundaries_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open country boundaries")
        .add_filter("GeoJSON", &["json", "geojson"])
        .pick_file();

    if let Some(path) = file {
        state.load_boundaries(&path);
    }
}

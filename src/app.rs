use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{bars, maps, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmissionsDashApp {
    pub state: AppState,
}

impl Default for EmissionsDashApp {
    fn default() -> Self {
        let mut state = AppState::default();
        state.load_defaults();
        Self { state }
    }
}

impl eframe::App for EmissionsDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view switch and legends ----
        egui::SidePanel::left("view_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Sectors => bars::sector_chart(ui, self.state.sector_chart.as_ref()),
            View::Maps => maps::choropleth_pair(ui, self.state.maps.as_ref()),
        });
    }
}

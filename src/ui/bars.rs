use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::chart::sectors::{SectorChart, TITLE};
use crate::chart::CHART_YEARS;
use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Grouped bar chart (central panel, Sectors view)
// ---------------------------------------------------------------------------

const BAR_WIDTH: f64 = 0.32;
const BAR_GAP: f64 = 0.36;

/// Render the sector bar chart: one group per sector, one bar per year.
pub fn sector_chart(ui: &mut Ui, chart: Option<&SectorChart>) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an emissions CSV to view sectors  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(TITLE);
    });

    let year_colors = generate_palette(CHART_YEARS.len());
    let labels: Vec<String> = chart.sectors.iter().map(|g| g.label.clone()).collect();

    // One BarChart per year so the legend carries a year entry per colour.
    let mut year_series = Vec::with_capacity(CHART_YEARS.len());
    for (slot, (&year, &color)) in CHART_YEARS.iter().zip(year_colors.iter()).enumerate() {
        let offset = (slot as f64 - (CHART_YEARS.len() as f64 - 1.0) / 2.0) * BAR_GAP;
        let bars: Vec<Bar> = chart
            .sectors
            .iter()
            .enumerate()
            .map(|(group, sector)| {
                Bar::new(group as f64 + offset, sector.megatonnes[slot])
                    .width(BAR_WIDTH)
                    .name(format!("{} {year}", sector.label))
                    .fill(color)
            })
            .collect();
        year_series.push(BarChart::new(bars).name(year.to_string()).color(color));
    }

    Plot::new("sector_chart")
        .legend(Legend::default())
        .y_axis_label("CO2 equivalent (megatonnes)")
        .x_axis_formatter(move |mark, _range| {
            let group = mark.value.round();
            if (mark.value - group).abs() > 0.05 || group < 0.0 {
                return String::new();
            }
            labels.get(group as usize).cloned().unwrap_or_default()
        })
        .show_grid([false, true])
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in year_series {
                plot_ui.bar_chart(series);
            }
        });
}

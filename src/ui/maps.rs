use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::chart::choropleth::ChoroplethMap;
use crate::color::{ValueRamp, NO_DATA_FILL};

// ---------------------------------------------------------------------------
// Choropleth pair (central panel, Maps view)
// ---------------------------------------------------------------------------

/// Render the 1990/2010 choropleths side by side with independent scales.
pub fn choropleth_pair(ui: &mut Ui, maps: Option<&(ChoroplethMap, ChoroplethMap)>) {
    let Some((left, right)) = maps else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an emissions CSV and a GeoJSON boundary file  (File → Open…)");
        });
        return;
    };

    ui.columns(2, |columns: &mut [Ui]| {
        choropleth(&mut columns[0], left);
        choropleth(&mut columns[1], right);
    });
}

/// One map: a stroked base layer per country, filled by the value ramp,
/// plus a country-code label anchored at each geometry centroid.
fn choropleth(ui: &mut Ui, map: &ChoroplethMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&map.title);
    });

    let ramp = ValueRamp::new(map.domain);
    // Interior rings (enclaves) are punched back out with the plot
    // background so the surrounding fill does not paint over them.
    let hole_fill = ui.visuals().extreme_bg_color;

    Plot::new(("choropleth", map.year))
        .data_aspect(1.0)
        .show_grid(false)
        .show_axes(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            for region in &map.regions {
                let fill = region
                    .value
                    .map(|v| ramp.color_for(v))
                    .unwrap_or(NO_DATA_FILL);
                // Hover tooltip: country code plus thousands of tonnes.
                let name = match region.value {
                    Some(v) => format!("{}: {v} kt", region.cou),
                    None => format!("{}: no data", region.cou),
                };

                for polygon in &region.geometry.0 {
                    let ring: PlotPoints = polygon
                        .exterior()
                        .points()
                        .map(|p| [p.x(), p.y()])
                        .collect();
                    plot_ui.polygon(
                        Polygon::new(ring)
                            .fill_color(fill)
                            .stroke(Stroke::new(0.4, Color32::BLACK))
                            .name(&name),
                    );

                    for hole in polygon.interiors() {
                        let ring: PlotPoints =
                            hole.points().map(|p| [p.x(), p.y()]).collect();
                        plot_ui.polygon(
                            Polygon::new(ring)
                                .fill_color(hole_fill)
                                .stroke(Stroke::new(0.4, Color32::BLACK)),
                        );
                    }
                }

                if let Some((lon, lat)) = region.centroid_lon_lat() {
                    plot_ui.text(Text::new(
                        PlotPoint::new(lon, lat),
                        RichText::new(&region.cou).size(10.0),
                    ));
                }
            }
        });
}

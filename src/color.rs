use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for the year series of the grouped bar chart.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous value ramp for choropleth fills
// ---------------------------------------------------------------------------

/// Fill colour for regions with no joined value (the base layer).
pub const NO_DATA_FILL: Color32 = Color32::from_rgb(211, 211, 211);

/// A gold → deep-orange continuous ramp over a fixed domain, clamped at
/// both ends.
#[derive(Debug, Clone, Copy)]
pub struct ValueRamp {
    min: f64,
    max: f64,
}

impl ValueRamp {
    pub fn new(domain: (f64, f64)) -> Self {
        ValueRamp {
            min: domain.0,
            max: domain.1,
        }
    }

    /// Interpolated fill colour for a value; out-of-domain values clamp.
    pub fn color_for(&self, value: f64) -> Color32 {
        let span = self.max - self.min;
        let t = if span.abs() < f64::EPSILON {
            1.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        };

        let start = LinSrgb::new(1.0_f32, 0.78, 0.35);
        let end = LinSrgb::new(0.72_f32, 0.16, 0.04);
        let rgb: Srgb = Srgb::from_linear(start.mix(end, t as f32));
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[2]);
    }

    #[test]
    fn ramp_clamps_outside_its_domain() {
        let ramp = ValueRamp::new((10.0, 20.0));
        assert_eq!(ramp.color_for(-5.0), ramp.color_for(10.0));
        assert_eq!(ramp.color_for(99.0), ramp.color_for(20.0));
        assert_ne!(ramp.color_for(10.0), ramp.color_for(20.0));
    }
}

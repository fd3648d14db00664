use nalgebra::{vector, Vector3};

pub type RGB = Vector3<f32>;

const GRAY_TINT: RGB = vector![0.7, 0.7, 0.75];

// Heatmap stops, one segment per quartile
const HEAT_STOPS: [RGB; 5] = [
    vector![0.0, 0.0, 1.0], // blue
    vector![0.0, 1.0, 1.0], // cyan
    vector![0.0, 1.0, 0.0], // green
    vector![1.0, 1.0, 0.0], // yellow
    vector![1.0, 0.0, 0.0], // red
];

/// Mapping from accumulated density to color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Grayscale,
    Heatmap,
    Rainbow,
}

impl ColorMode {
    /// Color of density `d`.
    /// Input is clamped to <0;1>, output is always inside <0;1> per channel.
    pub fn map(self, d: f32) -> RGB {
        // NaN collapses to 0
        let d = d.max(0.0).min(1.0);
        match self {
            ColorMode::Grayscale => GRAY_TINT * d,
            ColorMode::Heatmap => heatmap(d),
            ColorMode::Rainbow => rainbow(d),
        }
    }

    pub fn get_name(self) -> &'static str {
        match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::Heatmap => "heatmap",
            ColorMode::Rainbow => "rainbow",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorMode> {
        match name {
            "grayscale" | "gray" => Some(ColorMode::Grayscale),
            "heatmap" | "heat" => Some(ColorMode::Heatmap),
            "rainbow" => Some(ColorMode::Rainbow),
            _ => None,
        }
    }
}

fn heatmap(d: f32) -> RGB {
    let segment = if d < 0.25 {
        0
    } else if d < 0.5 {
        1
    } else if d < 0.75 {
        2
    } else {
        3
    };
    let t = (d - 0.25 * segment as f32) * 4.0;
    HEAT_STOPS[segment].lerp(&HEAT_STOPS[segment + 1], t)
}

fn rainbow(d: f32) -> RGB {
    let hue = d * 6.0;
    let rgb = vector![
        (hue - 3.0).abs() - 1.0,
        2.0 - (hue - 2.0).abs(),
        2.0 - (hue - 4.0).abs()
    ];
    rgb.map(|c| c.max(0.0).min(1.0))
}

#[cfg(test)]
mod test {

    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: RGB, b: RGB) {
        assert!((a - b).norm() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn grayscale_is_tinted() {
        assert_close(ColorMode::Grayscale.map(1.0), vector![0.7, 0.7, 0.75]);
        assert_close(ColorMode::Grayscale.map(0.0), vector![0.0, 0.0, 0.0]);
    }

    #[test]
    fn heatmap_quartile_stops() {
        let heat = ColorMode::Heatmap;
        assert_close(heat.map(0.0), vector![0.0, 0.0, 1.0]);
        assert_close(heat.map(0.25), vector![0.0, 1.0, 1.0]);
        assert_close(heat.map(0.5), vector![0.0, 1.0, 0.0]);
        assert_close(heat.map(0.75), vector![1.0, 1.0, 0.0]);
        assert_close(heat.map(1.0), vector![1.0, 0.0, 0.0]);
        // halfway blue -> cyan
        assert_close(heat.map(0.125), vector![0.0, 0.5, 1.0]);
    }

    #[test]
    fn rainbow_ends() {
        // h = 0 -> (2, 0, -2) clamped
        assert_close(ColorMode::Rainbow.map(0.0), vector![1.0, 0.0, 0.0]);
        // h = 3 -> (-1, 1, 1)
        assert_close(ColorMode::Rainbow.map(0.5), vector![0.0, 1.0, 1.0]);
        // h = 6 -> (2, -2, 0)
        assert_close(ColorMode::Rainbow.map(1.0), vector![1.0, 0.0, 0.0]);
    }

    #[test]
    fn names_round_trip() {
        for mode in [ColorMode::Grayscale, ColorMode::Heatmap, ColorMode::Rainbow] {
            assert_eq!(ColorMode::from_name(mode.get_name()), Some(mode));
        }
        assert_eq!(ColorMode::from_name("sepia"), None);
    }

    proptest! {
        #[test]
        fn color_map_bounded_and_deterministic(d in 0.0f32..=1.0, mode in 0u8..3) {
            let mode = match mode {
                0 => ColorMode::Grayscale,
                1 => ColorMode::Heatmap,
                _ => ColorMode::Rainbow,
            };
            let first = mode.map(d);
            let second = mode.map(d);
            prop_assert_eq!(first, second);
            for c in first.iter() {
                prop_assert!((0.0..=1.0).contains(c));
            }
        }
    }
}

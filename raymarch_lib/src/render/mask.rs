use nalgebra::vector;

use crate::color::RGB;

/// Segmentation label encoded by a mask sample.
///
/// | value         | label        |
/// |---------------|--------------|
/// | `(0; 0.25)`   | necrotic core |
/// | `<0.25; 0.5)` | edema        |
/// | `<0.5; 0.75)` | enhancing    |
/// | `>= 0.75`     | unassigned   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskLabel {
    NecroticCore,
    Edema,
    Enhancing,
    /// Composited black, but still occludes
    Unassigned,
}

impl MaskLabel {
    /// Label of mask value `m`, `None` for background (`m <= 0` or NaN)
    pub fn from_value(m: f32) -> Option<MaskLabel> {
        if m.is_nan() || m <= 0.0 {
            None
        } else if m < 0.25 {
            Some(MaskLabel::NecroticCore)
        } else if m < 0.5 {
            Some(MaskLabel::Edema)
        } else if m < 0.75 {
            Some(MaskLabel::Enhancing)
        } else {
            Some(MaskLabel::Unassigned)
        }
    }

    pub fn color(self) -> RGB {
        match self {
            MaskLabel::NecroticCore => vector![1.0, 0.0, 0.0],
            MaskLabel::Edema => vector![0.0, 1.0, 0.0],
            MaskLabel::Enhancing => vector![1.0, 1.0, 0.0],
            MaskLabel::Unassigned => vector![0.0, 0.0, 0.0],
        }
    }

    /// Center of the label's value band
    pub fn representative_value(self) -> f32 {
        match self {
            MaskLabel::NecroticCore => 0.125,
            MaskLabel::Edema => 0.375,
            MaskLabel::Enhancing => 0.625,
            MaskLabel::Unassigned => 0.875,
        }
    }

    pub fn get_name(self) -> &'static str {
        match self {
            MaskLabel::NecroticCore => "necrotic core",
            MaskLabel::Edema => "edema",
            MaskLabel::Enhancing => "enhancing",
            MaskLabel::Unassigned => "unassigned",
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(MaskLabel::from_value(0.0), None);
        assert_eq!(MaskLabel::from_value(f32::NAN), None);
        assert_eq!(MaskLabel::from_value(0.011), Some(MaskLabel::NecroticCore));
        assert_eq!(MaskLabel::from_value(0.25), Some(MaskLabel::Edema));
        assert_eq!(MaskLabel::from_value(0.4999), Some(MaskLabel::Edema));
        assert_eq!(MaskLabel::from_value(0.5), Some(MaskLabel::Enhancing));
        assert_eq!(MaskLabel::from_value(0.75), Some(MaskLabel::Unassigned));
        assert_eq!(MaskLabel::from_value(3.0), Some(MaskLabel::Unassigned));
    }

    #[test]
    fn representative_values_round_trip() {
        for label in [
            MaskLabel::NecroticCore,
            MaskLabel::Edema,
            MaskLabel::Enhancing,
            MaskLabel::Unassigned,
        ] {
            assert_eq!(MaskLabel::from_value(label.representative_value()), Some(label));
        }
    }

    #[test]
    fn unassigned_band_is_black() {
        // values >= 0.75 have no color of their own but still take part in compositing
        assert_eq!(MaskLabel::Unassigned.color(), vector![0.0, 0.0, 0.0]);
    }
}

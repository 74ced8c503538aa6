use serde::{Deserialize, Serialize};

/// Logical size of the host viewport, in CSS-style (device independent) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Only meaningful for a non-empty viewport.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// A minimized window reports a zero-sized viewport.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Color space the renderer writes its output in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    /// No transfer function: shader output reaches the display unchanged.
    #[default]
    LinearSrgb,
    /// Gamma-encoded sRGB output.
    Srgb,
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearSrgb => f.write_str("linear-srgb"),
            Self::Srgb => f.write_str("srgb"),
        }
    }
}

/// Pixel ratio applied to the render surface: the device ratio, capped.
///
/// Non-finite or non-positive device ratios fall back to 1.
pub fn capped_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0_f64.min(max);
    }
    device_pixel_ratio.min(max)
}

/// Convert one sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_exact_ratio() {
        let v = Viewport::new(800, 600);
        assert_eq!(v.aspect(), 800.0_f32 / 600.0_f32);
    }

    #[test]
    fn zero_sized_viewport_is_empty() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(capped_pixel_ratio(3.0, 2.0), 2.0);
        assert_eq!(capped_pixel_ratio(1.5, 2.0), 1.5);
        assert_eq!(capped_pixel_ratio(2.0, 2.0), 2.0);
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        assert_eq!(capped_pixel_ratio(f64::NAN, 2.0), 1.0);
        assert_eq!(capped_pixel_ratio(0.0, 2.0), 1.0);
        assert_eq!(capped_pixel_ratio(-1.0, 2.0), 1.0);
    }

    #[test]
    fn srgb_conversion_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // Mid grey darkens when linearized.
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn color_space_yaml_names() {
        let s = serde_yaml::to_string(&ColorSpace::LinearSrgb).unwrap();
        assert_eq!(s.trim(), "linear-srgb");
        let parsed: ColorSpace = serde_yaml::from_str("srgb").unwrap();
        assert_eq!(parsed, ColorSpace::Srgb);
    }
}

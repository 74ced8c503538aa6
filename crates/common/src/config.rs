use crate::types::ColorSpace;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete viewer configuration.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub renderer: RendererConfig,
    pub controls: ControlsConfig,
    pub window: WindowConfig,
    pub gui: GuiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance back along the view axis.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.01,
            far: 100.0,
            distance: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Upper bound for the device pixel ratio applied to the surface.
    pub max_pixel_ratio: f64,
    pub output_color_space: ColorSpace,
    /// Convert sRGB-authored colors to linear before use.
    pub color_management: bool,
    pub clear_color: [f32; 4],
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            output_color_space: ColorSpace::LinearSrgb,
            color_management: false,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from the up axis.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::MAX,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "planeview".into(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub title: String,
    /// Whether the panel starts expanded.
    pub open: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Controls".into(),
            open: true,
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                tracing::debug!("loaded config from {}", path.display());
                Self::from_yaml_str(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the camera, renderer or controls cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        if !(cam.near > 0.0) {
            return Err(invalid("camera.near", "must be positive"));
        }
        if !(cam.far > cam.near) {
            return Err(invalid("camera.far", "must be greater than camera.near"));
        }
        if !(self.renderer.max_pixel_ratio > 0.0) {
            return Err(invalid("renderer.max_pixel_ratio", "must be positive"));
        }
        let ctl = &self.controls;
        if !(ctl.damping_factor > 0.0 && ctl.damping_factor <= 1.0) {
            return Err(invalid("controls.damping_factor", "must be in (0, 1]"));
        }
        if ctl.min_distance < 0.0 || ctl.max_distance < ctl.min_distance {
            return Err(invalid(
                "controls.max_distance",
                "distance limits must satisfy 0 <= min <= max",
            ));
        }
        if ctl.min_polar_angle < 0.0
            || ctl.max_polar_angle > std::f32::consts::PI
            || ctl.max_polar_angle < ctl.min_polar_angle
        {
            return Err(invalid(
                "controls.max_polar_angle",
                "polar limits must satisfy 0 <= min <= max <= pi",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

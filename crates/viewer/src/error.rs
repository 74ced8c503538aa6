use planeview_common::ConfigError;
use planeview_render::RenderError;

/// Errors from constructing or running the viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

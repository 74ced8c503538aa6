use planeview_common::{ColorSpace, Viewport};
use planeview_scene::{PerspectiveCamera, Scene};
use planeview_tools::{DebugPanel, SceneInspector};

/// Errors raised while binding or drawing to a render surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render surface unavailable: {0}")]
    Surface(String),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("GPU device request failed: {0}")]
    Device(String),
    #[error("shader compilation failed: {0}")]
    Shader(String),
}

/// Size of the drawing buffer backing a logical viewport: `floor(size * ratio)`, at least 1.
pub fn drawing_buffer_size(viewport: Viewport, pixel_ratio: f64) -> (u32, u32) {
    let w = (viewport.width as f64 * pixel_ratio).floor() as u32;
    let h = (viewport.height as f64 * pixel_ratio).floor() as u32;
    (w.max(1), h.max(1))
}

/// Renderer-agnostic render surface. All backends implement this trait.
pub trait Renderer {
    /// Convert sRGB-authored colors (clear color, light colors) to linear.
    fn set_color_management(&mut self, enabled: bool);

    fn color_management(&self) -> bool;

    /// Set the device pixel ratio and re-apply the current size.
    fn set_pixel_ratio(&mut self, ratio: f64);

    fn pixel_ratio(&self) -> f64;

    fn set_output_color_space(&mut self, space: ColorSpace);

    fn output_color_space(&self) -> ColorSpace;

    /// Resize the surface to a logical viewport.
    fn set_size(&mut self, viewport: Viewport);

    fn size(&self) -> Viewport;

    fn drawing_buffer_size(&self) -> (u32, u32) {
        drawing_buffer_size(self.size(), self.pixel_ratio())
    }

    /// Render one frame of `scene` through `camera`, with `panel` on top.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        panel: &mut DebugPanel,
    ) -> Result<(), RenderError>;

    /// Release backend resources.
    fn dispose(&mut self) {}
}

/// Debug text renderer: a render surface without a GPU.
///
/// Produces a human-readable description of each frame. Useful for CLI
/// output, logging, and testing the viewer lifecycle.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    color_management: bool,
    pixel_ratio: f64,
    output_color_space: ColorSpace,
    size: Viewport,
    frames: u64,
    last_frame: Option<String>,
    disposed: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            color_management: true,
            pixel_ratio: 1.0,
            output_color_space: ColorSpace::Srgb,
            size: Viewport::new(300, 150),
            frames: 0,
            last_frame: None,
            disposed: false,
        }
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DebugTextRenderer {
    fn set_color_management(&mut self, enabled: bool) {
        self.color_management = enabled;
    }

    fn color_management(&self) -> bool {
        self.color_management
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.set_size(self.size);
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn set_output_color_space(&mut self, space: ColorSpace) {
        self.output_color_space = space;
    }

    fn output_color_space(&self) -> ColorSpace {
        self.output_color_space
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.size = viewport;
    }

    fn size(&self) -> Viewport {
        self.size
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        panel: &mut DebugPanel,
    ) -> Result<(), RenderError> {
        if self.disposed {
            return Err(RenderError::Surface("renderer disposed".into()));
        }
        self.frames += 1;
        let (w, h) = self.drawing_buffer_size();
        let summary = SceneInspector::summary(scene, camera);
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} ({} @ {}x -> {}x{} px, {}) ===\n",
            self.frames, self.size, self.pixel_ratio, w, h, self.output_color_space
        ));
        out.push_str(&format!("{summary}\n"));
        if !panel.is_destroyed() {
            out.push_str(&format!("Panel: {} (empty)\n", panel.title()));
        }
        tracing::trace!(frame = self.frames, "debug renderer: frame");
        self.last_frame = Some(out);
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use planeview_scene::{AmbientLight, SceneNode};

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(50.0, 1.0, 0.01, 100.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera
    }

    #[test]
    fn drawing_buffer_floors_and_clamps() {
        assert_eq!(drawing_buffer_size(Viewport::new(800, 600), 2.0), (1600, 1200));
        assert_eq!(drawing_buffer_size(Viewport::new(101, 51), 1.5), (151, 76));
        assert_eq!(drawing_buffer_size(Viewport::new(0, 0), 2.0), (1, 1));
    }

    #[test]
    fn pixel_ratio_reapplies_size() {
        let mut r = DebugTextRenderer::new();
        r.set_size(Viewport::new(400, 300));
        r.set_pixel_ratio(2.0);
        assert_eq!(r.size(), Viewport::new(400, 300));
        assert_eq!(r.drawing_buffer_size(), (800, 600));
    }

    #[test]
    fn render_empty_scene() {
        let mut r = DebugTextRenderer::new();
        r.render(&Scene::new(), &camera(), &mut DebugPanel::default()).unwrap();
        assert_eq!(r.frames_rendered(), 1);
        let frame = r.last_frame().unwrap();
        assert!(frame.contains("Frame 1"));
        assert!(frame.contains("meshes=0"));
        assert!(frame.contains("Panel: Controls"));
    }

    #[test]
    fn render_reports_children() {
        let mut scene = Scene::new();
        scene.add(SceneNode::AmbientLight(AmbientLight::from_hex(0xffffff, 1.0)));
        let mut r = DebugTextRenderer::new();
        r.render(&scene, &camera(), &mut DebugPanel::default()).unwrap();
        assert!(r.last_frame().unwrap().contains("ambient_light"));
    }

    #[test]
    fn disposed_renderer_fails_to_render() {
        let mut r = DebugTextRenderer::new();
        r.dispose();
        assert!(r.is_disposed());
        let err = r
            .render(&Scene::new(), &camera(), &mut DebugPanel::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Surface(_)));
        assert_eq!(r.frames_rendered(), 0);
    }
}

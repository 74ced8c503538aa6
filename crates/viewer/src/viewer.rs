use crate::error::ViewerError;
use crate::host::Host;
use glam::Vec3;
use planeview_common::{CameraConfig, Viewport, ViewerConfig, capped_pixel_ratio};
use planeview_controls::OrbitControls;
use planeview_input::ControlInput;
use planeview_render::Renderer;
use planeview_scene::{
    AmbientLight, Clock, Mesh, PerspectiveCamera, PlaneGeometry, Scene, SceneNode, ShaderMaterial,
};
use planeview_tools::DebugPanel;

/// Outcome of one [`Viewer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// The frame was rendered and the next one requested.
    Scheduled,
    /// The viewer was stopped; nothing was rendered or requested.
    Stopped,
}

/// The viewer application.
///
/// Owns its viewport, camera, scene, clock, controls and debug panel. The
/// host drives it: `tick` once per frame callback, `resize` on every window
/// resize.
pub struct Viewer<R: Renderer, H: Host> {
    config: ViewerConfig,
    host: H,
    renderer: R,
    sizes: Viewport,
    scene: Scene,
    clock: Clock,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    panel: DebugPanel,
    elapsed: f32,
    frames: u64,
    running: bool,
    disposed: bool,
}

impl<R: Renderer, H: Host> Viewer<R, H> {
    /// Set up the viewer on an already bound render surface.
    ///
    /// Runs the setup steps in order, sizes everything once and requests
    /// the first frame.
    pub fn new(
        mut renderer: R,
        host: H,
        vertex_shader: &str,
        fragment_shader: &str,
        config: ViewerConfig,
    ) -> Result<Self, ViewerError> {
        config.validate()?;
        let sizes = host.inner_size();

        renderer.set_color_management(config.renderer.color_management);
        renderer.set_pixel_ratio(capped_pixel_ratio(
            host.device_pixel_ratio(),
            config.renderer.max_pixel_ratio,
        ));
        renderer.set_output_color_space(config.renderer.output_color_space);

        let mut scene = Scene::new();
        let clock = Clock::start();

        let camera = setup_camera(&config.camera, sizes);
        setup_light(&mut scene);
        setup_model(&mut scene, vertex_shader, fragment_shader);
        let controls = OrbitControls::new(&camera, &config.controls);
        tracing::debug!(damping = controls.enable_damping, "controls bound to camera");
        let panel = DebugPanel::new(config.gui.title.clone(), config.gui.open);

        let mut viewer = Self {
            config,
            host,
            renderer,
            sizes,
            scene,
            clock,
            camera,
            controls,
            panel,
            elapsed: 0.0,
            frames: 0,
            running: true,
            disposed: false,
        };
        viewer.resize();
        viewer.host.request_frame();
        tracing::info!(viewport = %viewer.sizes, "viewer started");
        Ok(viewer)
    }

    /// Render one frame and request the next.
    ///
    /// A render error is returned before the next frame is requested, so the
    /// loop ends; the viewer is stopped.
    pub fn tick(&mut self) -> Result<FrameState, ViewerError> {
        if !self.running {
            return Ok(FrameState::Stopped);
        }
        // Read every frame; not fed to the material's time uniform.
        self.elapsed = self.clock.elapsed_time();

        self.controls.update(&mut self.camera);

        if let Err(e) = self.renderer.render(&self.scene, &self.camera, &mut self.panel) {
            tracing::error!("frame {} failed: {e}", self.frames + 1);
            self.running = false;
            return Err(e.into());
        }
        self.frames += 1;
        tracing::trace!(frame = self.frames, elapsed = self.elapsed, "frame rendered");

        self.host.request_frame();
        Ok(FrameState::Scheduled)
    }

    /// Re-read the host size and bring camera, renderer and controls in line.
    ///
    /// A zero-sized (minimized) window leaves the previous state in place.
    pub fn resize(&mut self) {
        let size = self.host.inner_size();
        if size.is_empty() {
            tracing::debug!(%size, "ignoring resize to empty viewport");
            return;
        }
        self.sizes = size;

        self.camera.aspect = size.aspect();
        self.camera.update_projection_matrix();

        self.renderer.set_size(size);
        self.renderer.set_pixel_ratio(capped_pixel_ratio(
            self.host.device_pixel_ratio(),
            self.config.renderer.max_pixel_ratio,
        ));
        self.controls.set_viewport(size);
        tracing::debug!(%size, pixel_ratio = self.renderer.pixel_ratio(), "resized");
    }

    /// Forward pointer-derived input to the camera controls.
    pub fn handle_input(&mut self, input: ControlInput) {
        self.controls.handle_input(input);
    }

    /// Halt the loop: later ticks render nothing and request nothing.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(frames = self.frames, "viewer stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Release the debug panel, controls and renderer, in that order.
    ///
    /// The viewer is stopped for good; calling this again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.running = false;
        self.disposed = true;
        self.panel.destroy();
        self.controls.dispose();
        self.renderer.dispose();
        tracing::info!(frames = self.frames, "viewer disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn viewport(&self) -> Viewport {
        self.sizes
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to scene content, e.g. a material's time uniform.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn panel(&self) -> &DebugPanel {
        &self.panel
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Elapsed seconds as of the last frame.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

fn setup_camera(config: &CameraConfig, sizes: Viewport) -> PerspectiveCamera {
    let aspect = if sizes.is_empty() { 1.0 } else { sizes.aspect() };
    let mut camera = PerspectiveCamera::new(config.fov_degrees, aspect, config.near, config.far);
    camera.position = Vec3::new(0.0, 0.0, config.distance);
    camera.look_at(Vec3::ZERO);
    tracing::debug!(fov = config.fov_degrees, aspect, "camera created");
    camera
}

fn setup_light(scene: &mut Scene) {
    scene.add(SceneNode::AmbientLight(AmbientLight::from_hex(0xffffff, 1.0)));
}

fn setup_model(scene: &mut Scene, vertex_shader: &str, fragment_shader: &str) {
    let material = ShaderMaterial::new(vertex_shader, fragment_shader);
    let plane = Mesh::new(PlaneGeometry::new(1.0, 1.0), material);
    scene.add(SceneNode::Mesh(plane));
}

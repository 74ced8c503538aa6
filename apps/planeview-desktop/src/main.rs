use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use planeview_common::{Viewport, ViewerConfig};
use planeview_input::PointerButton;
use planeview_render_wgpu::WgpuRenderer;
use planeview_viewer::{Host, Viewer, shaders};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Pixels per wheel line, matching what browsers report for one notch.
const LINE_HEIGHT_PX: f32 = 100.0;

#[derive(Parser)]
#[command(name = "planeview-desktop", about = "Orbit a shader-driven plane in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// WGSL vertex shader replacing the built-in one
    #[arg(long)]
    vertex_shader: Option<PathBuf>,

    /// WGSL fragment shader replacing the built-in one
    #[arg(long)]
    fragment_shader: Option<PathBuf>,
}

/// Window metrics and frame scheduling backed by a winit window.
struct WinitHost {
    window: Arc<Window>,
}

impl Host for WinitHost {
    fn inner_size(&self) -> Viewport {
        let size: LogicalSize<u32> = self
            .window
            .inner_size()
            .to_logical(self.window.scale_factor());
        Viewport::new(size.width, size.height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn request_frame(&self) {
        self.window.request_redraw();
    }
}

struct App {
    config: ViewerConfig,
    vertex_shader: String,
    fragment_shader: String,
    viewer: Option<Viewer<WgpuRenderer, WinitHost>>,
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, vertex_shader: String, fragment_shader: String) -> Self {
        Self {
            config,
            vertex_shader,
            fragment_shader,
            viewer: None,
            startup_error: None,
        }
    }

    /// Keep a failed startup for `finish`. Returns true when startup failed.
    fn record_startup(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => false,
            Err(e) => {
                tracing::error!("failed to start viewer: {e:#}");
                self.startup_error = Some(e);
                true
            }
        }
    }

    /// Outcome of the event loop: an error when the viewer never started.
    fn finish(self) -> Result<()> {
        match self.startup_error {
            Some(e) => Err(e.context("viewer failed to start")),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let renderer = WgpuRenderer::new(window.clone(), self.config.renderer.clear_color)?;
        tracing::info!(format = ?renderer.surface_format(), "surface ready");

        let viewer = Viewer::new(
            renderer,
            WinitHost { window },
            &self.vertex_shader,
            &self.fragment_shader,
            self.config.clone(),
        )?;
        self.viewer = Some(viewer);
        Ok(())
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Browser-style `deltaY`: positive when scrolling towards the user.
fn wheel_delta_y(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}

fn logical_position(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let p = position.to_logical::<f32>(scale_factor);
    Vec2::new(p.x, p.y)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() || self.startup_error.is_some() {
            return;
        }
        let result = self.start(event_loop);
        if self.record_startup(result) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        if viewer.renderer_mut().on_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                viewer.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                viewer.resize();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = pointer_button(button) {
                    viewer
                        .controls_mut()
                        .pointer_button(button, state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = viewer.host().device_pixel_ratio();
                viewer
                    .controls_mut()
                    .pointer_moved(logical_position(position, scale));
            }
            WindowEvent::CursorLeft { .. } => {
                viewer.controls_mut().pointer_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                viewer.controls_mut().wheel(wheel_delta_y(delta));
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                let held = state.control_key() || state.shift_key() || state.super_key();
                viewer.controls_mut().set_pan_modifier(held);
            }
            WindowEvent::RedrawRequested => {
                // A failed frame is logged by the viewer, which stops itself.
                let _ = viewer.tick();
            }
            _ => {}
        }
    }
}

fn read_shader(path: Option<&PathBuf>, builtin: &str) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read shader {}", path.display())),
        None => Ok(builtin.to_owned()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("planeview-desktop starting");

    let config = ViewerConfig::load(cli.config.as_deref())?;
    let vertex_shader = read_shader(cli.vertex_shader.as_ref(), shaders::VERTEX)?;
    let fragment_shader = read_shader(cli.fragment_shader.as_ref(), shaders::FRAGMENT)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, vertex_shader, fragment_shader);
    event_loop.run_app(&mut app)?;

    app.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            ViewerConfig::default(),
            shaders::VERTEX.to_owned(),
            shaders::FRAGMENT.to_owned(),
        )
    }

    #[test]
    fn failed_startup_makes_main_fail() {
        let mut app = app();
        assert!(app.record_startup(Err(anyhow::anyhow!("no suitable GPU adapter"))));
        let err = app.finish().unwrap_err();
        assert_eq!(err.to_string(), "viewer failed to start");
        assert!(format!("{err:#}").contains("no suitable GPU adapter"));
    }

    #[test]
    fn clean_startup_finishes_ok() {
        let mut app = app();
        assert!(!app.record_startup(Ok(())));
        assert!(app.finish().is_ok());
    }

    #[test]
    fn wheel_lines_follow_browser_sign() {
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 1.0)), -100.0);
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))),
            12.0
        );
    }

    #[test]
    fn buttons_map_to_pointer_roles() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Back), None);
    }

    #[test]
    fn cursor_position_is_logical() {
        let p = logical_position(PhysicalPosition::new(200.0, 100.0), 2.0);
        assert_eq!(p, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn cli_accepts_shader_overrides() {
        let cli = Cli::parse_from([
            "planeview-desktop",
            "-v",
            "--fragment-shader",
            "frag.wgsl",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("frag.wgsl")));
        assert!(cli.vertex_shader.is_none());
    }
}
use crate::material::{DEPTH_FORMAT, GpuMesh, Uniforms, uniform_layout};
use crate::overlay::EguiOverlay;
use planeview_common::{ColorSpace, Viewport, srgb_to_linear};
use planeview_render::{RenderError, Renderer, drawing_buffer_size};
use planeview_scene::{PerspectiveCamera, Scene};
use planeview_tools::DebugPanel;
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

/// Pick the surface format for an output color space.
///
/// Linear output needs a non-sRGB format so shader values are stored as-is;
/// sRGB output needs an sRGB format so the hardware encodes them.
fn pick_format(formats: &[wgpu::TextureFormat], space: ColorSpace) -> Option<wgpu::TextureFormat> {
    let want_srgb = space == ColorSpace::Srgb;
    formats
        .iter()
        .find(|f| f.is_srgb() == want_srgb)
        .or_else(|| formats.first())
        .copied()
}

/// Apply color management to an sRGB-authored color.
fn managed(color: [f32; 3], enabled: bool) -> [f32; 3] {
    if enabled {
        color.map(srgb_to_linear)
    } else {
        color
    }
}

/// wgpu render surface bound to a window.
pub struct WgpuRenderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    formats: Vec<wgpu::TextureFormat>,
    uniform_layout: wgpu::BindGroupLayout,
    meshes: Vec<GpuMesh>,
    depth_texture: wgpu::TextureView,
    overlay: EguiOverlay,
    clear_color: [f32; 4],
    color_management: bool,
    pixel_ratio: f64,
    output_color_space: ColorSpace,
    size: Viewport,
    disposed: bool,
}

impl WgpuRenderer {
    /// Bind a render surface to `window`. Blocks on adapter and device requests.
    pub fn new(window: Arc<Window>, clear_color: [f32; 4]) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("planeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let output_color_space = ColorSpace::Srgb;
        let format = pick_format(&caps.formats, output_color_space)
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let physical = window.inner_size();
        let scale = window.scale_factor();
        let size = Viewport::new(
            (physical.width as f64 / scale).round() as u32,
            (physical.height as f64 / scale).round() as u32,
        );
        let (width, height) = drawing_buffer_size(size, 1.0);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_layout = uniform_layout(&device);
        let depth_texture = create_depth_texture(&device, width, height);
        let overlay = EguiOverlay::new(&window, &device, format);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            formats: caps.formats,
            uniform_layout,
            meshes: Vec::new(),
            depth_texture,
            overlay,
            clear_color,
            color_management: true,
            pixel_ratio: 1.0,
            output_color_space,
            size,
            disposed: false,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Forward a window event to the debug overlay. Returns true when the
    /// overlay consumed it and camera controls should ignore it.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        let consumed = self.overlay.on_window_event(&self.window, event);
        consumed || (is_pointer_event(event) && self.overlay.wants_pointer())
    }

    fn configure_surface(&mut self) {
        if self.disposed {
            return;
        }
        let (width, height) = drawing_buffer_size(self.size, self.pixel_ratio);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, width, height);
        tracing::debug!(width, height, "surface configured");
    }

    /// Build pipelines for the scene's meshes the first time they are seen.
    fn prepare(&mut self, scene: &Scene) -> Result<(), RenderError> {
        if self.meshes.len() == scene.meshes().count() {
            return Ok(());
        }
        self.meshes = scene
            .meshes()
            .map(|m| GpuMesh::new(&self.device, &self.uniform_layout, self.config.format, m))
            .collect::<Result<_, _>>()?;
        tracing::debug!(count = self.meshes.len(), "mesh pipelines built");
        Ok(())
    }
}

impl Renderer for WgpuRenderer {
    fn set_color_management(&mut self, enabled: bool) {
        self.color_management = enabled;
    }

    fn color_management(&self) -> bool {
        self.color_management
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.configure_surface();
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn set_output_color_space(&mut self, space: ColorSpace) {
        self.output_color_space = space;
        let Some(format) = pick_format(&self.formats, space) else {
            return;
        };
        if format != self.config.format {
            self.config.format = format;
            self.meshes.clear();
            self.overlay.set_format(&self.device, format);
            self.configure_surface();
            tracing::debug!(%space, ?format, "output color space changed");
        }
    }

    fn output_color_space(&self) -> ColorSpace {
        self.output_color_space
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.configure_surface();
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
        self.prepare(scene)?;

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let projection = camera.projection_matrix();
        let view_matrix = camera.view_matrix();
        let ambient = managed(scene.ambient(), self.color_management);
        for (gpu, mesh) in self.meshes.iter().zip(scene.meshes()) {
            let time = mesh.material.uniforms.time.unwrap_or(0.0);
            gpu.write_uniforms(
                &self.queue,
                &Uniforms::new(projection, view_matrix * mesh.model, ambient, time),
            );
        }

        let [r, g, b] = managed(
            [self.clear_color[0], self.clear_color[1], self.clear_color[2]],
            self.color_management,
        );
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: self.clear_color[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            for mesh in &self.meshes {
                mesh.draw(&mut pass);
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        self.overlay.paint(
            &self.window,
            &self.device,
            &self.queue,
            &view,
            [self.config.width, self.config.height],
            self.pixel_ratio as f32,
            panel,
        );

        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn dispose(&mut self) {
        self.meshes.clear();
        self.disposed = true;
        tracing::debug!("wgpu renderer disposed");
    }
}

fn is_pointer_event(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::CursorMoved { .. }
    )
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn linear_output_prefers_non_srgb_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            pick_format(&formats, ColorSpace::LinearSrgb),
            Some(TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            pick_format(&formats, ColorSpace::Srgb),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(
            pick_format(&formats, ColorSpace::Srgb),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_format(&[], ColorSpace::Srgb), None);
    }

    #[test]
    fn color_management_linearizes() {
        assert_eq!(managed([0.5, 0.5, 0.5], false), [0.5, 0.5, 0.5]);
        let linear = managed([0.5, 1.0, 0.0], true);
        assert!(linear[0] < 0.25);
        assert!((linear[1] - 1.0).abs() < 1e-6);
        assert_eq!(linear[2], 0.0);
    }
}

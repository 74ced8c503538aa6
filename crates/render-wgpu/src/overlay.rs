use planeview_tools::DebugPanel;
use winit::event::WindowEvent;
use winit::window::Window;

/// egui integration drawing the debug panel over the rendered scene.
pub(crate) struct EguiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiOverlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Target format changed; egui's pipeline must be rebuilt for it.
    pub fn set_format(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        self.renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    /// Run the panel UI and paint it on top of `view`.
    ///
    /// `pixel_ratio` is the surface's pixels per logical pixel, which may be
    /// capped below the window's scale factor.
    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        pixel_ratio: f32,
        panel: &mut DebugPanel,
    ) {
        let mut raw_input = self.state.take_egui_input(window);
        set_native_pixels_per_point(&mut raw_input, pixel_ratio);
        let full_output = self.ctx.run(raw_input, |ctx| panel.show(ctx));
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let paint_jobs = self.ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        let callbacks = self.renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(callbacks.into_iter().chain(std::iter::once(encoder.finish())));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Lay egui out at the surface's pixel ratio instead of the window's scale factor.
fn set_native_pixels_per_point(raw_input: &mut egui::RawInput, pixel_ratio: f32) {
    let id = raw_input.viewport_id;
    raw_input.viewports.entry(id).or_default().native_pixels_per_point = Some(pixel_ratio);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn egui_lays_out_at_surface_ratio() {
        let ctx = egui::Context::default();
        let mut raw_input = egui::RawInput::default();
        raw_input
            .viewports
            .entry(raw_input.viewport_id)
            .or_default()
            .native_pixels_per_point = Some(3.0);
        set_native_pixels_per_point(&mut raw_input, 2.0);
        let mut panel = DebugPanel::default();
        let output = ctx.run(raw_input, |ctx| panel.show(ctx));
        assert_eq!(output.pixels_per_point, 2.0);
        assert_eq!(ctx.pixels_per_point(), 2.0);
    }
}

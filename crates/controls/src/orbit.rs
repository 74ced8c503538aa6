use crate::spherical::Spherical;
use glam::{Vec2, Vec3};
use planeview_common::{ControlsConfig, Viewport};
use planeview_input::{ControlInput, PointerButton, PointerTracker};
use planeview_scene::PerspectiveCamera;
use std::f32::consts::TAU;

const EPS: f32 = 0.000_001;

/// Orbit-style camera manipulator with optional inertial damping.
///
/// Pointer events are routed through an internal [`PointerTracker`]; the
/// resulting motion accumulates until the next [`OrbitControls::update`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    target: Vec3,
    viewport: Viewport,
    pointer: PointerTracker,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    pending_pan: Vec2,
    scale: f32,
    last_position: Vec3,
    last_target: Vec3,
}

impl OrbitControls {
    /// Bind controls to `camera`, orbiting the origin.
    pub fn new(camera: &PerspectiveCamera, config: &ControlsConfig) -> Self {
        Self {
            enabled: true,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar_angle: config.min_polar_angle,
            max_polar_angle: config.max_polar_angle,
            target: Vec3::ZERO,
            viewport: Viewport::new(1, 1),
            pointer: PointerTracker::new(),
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            pending_pan: Vec2::ZERO,
            scale: 1.0,
            last_position: camera.position,
            last_target: Vec3::ZERO,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Size of the surface the pointer moves over; drag distances scale by its height.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True while pending motion remains to be applied.
    pub fn is_moving(&self) -> bool {
        self.spherical_delta.theta.abs() > EPS
            || self.spherical_delta.phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS
            || self.pending_pan != Vec2::ZERO
            || self.scale != 1.0
    }

    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) {
        if let Some(input) = self.pointer.button(button, pressed) {
            self.handle_input(input);
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(input) = self.pointer.moved(position) {
            self.handle_input(input);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pointer.set_pan_modifier(held);
    }

    /// Wheel scroll with browser `deltaY` sign.
    pub fn wheel(&mut self, delta_y: f32) {
        if let Some(input) = self.pointer.wheel(delta_y) {
            self.handle_input(input);
        }
    }

    /// Accumulate one control input.
    pub fn handle_input(&mut self, input: ControlInput) {
        if !self.enabled {
            return;
        }
        match input {
            ControlInput::Rotate(delta) if self.enable_rotate => {
                let height = self.viewport.height.max(1) as f32;
                self.rotate_left(TAU * delta.x / height * self.rotate_speed);
                self.rotate_up(TAU * delta.y / height * self.rotate_speed);
            }
            ControlInput::Pan(delta) if self.enable_pan => {
                self.pan(delta * self.pan_speed);
            }
            ControlInput::Dolly(delta) if self.enable_zoom => {
                if delta > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else if delta < 0.0 {
                    self.dolly_in(self.zoom_scale());
                }
            }
            _ => {}
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Queue a screen-space pan of `delta` logical pixels. It becomes a world
    /// offset along the camera's right and up axes on the next `update`.
    pub fn pan(&mut self, delta: Vec2) {
        self.pending_pan += delta;
    }

    /// Move towards the target: the radius shrinks by `scale`.
    pub fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    /// Move away from the target: the radius grows by `1 / scale`.
    pub fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Convert pending pan pixels to a world offset using the camera's frame.
    fn resolve_pan(&mut self, camera: &PerspectiveCamera) {
        if self.pending_pan == Vec2::ZERO {
            return;
        }
        let height = self.viewport.height.max(1) as f32;
        let distance = (camera.position - self.target).length();
        let target_distance = distance * (camera.fov.to_radians() * 0.5).tan();
        let left = 2.0 * self.pending_pan.x * target_distance / height;
        let up = 2.0 * self.pending_pan.y * target_distance / height;
        self.pan_offset += camera.right() * -left + camera.camera_up() * up;
        self.pending_pan = Vec2::ZERO;
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        self.resolve_pan(camera);

        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vec3(offset);

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.phi = spherical.phi.clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        self.target += self.pan_offset * factor;

        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_vec3();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = (camera.position - self.last_position).length_squared() > EPS
            || (self.target - self.last_target).length_squared() > EPS;
        self.last_position = camera.position;
        self.last_target = self.target;
        moved
    }

    /// Drop pointer state and pending motion, and stop reacting to input.
    pub fn dispose(&mut self) {
        self.pointer.reset();
        self.spherical_delta = Spherical::default();
        self.pan_offset = Vec3::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.scale = 1.0;
        self.enabled = false;
        tracing::debug!("orbit controls disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(damping: bool) -> (PerspectiveCamera, OrbitControls) {
        let mut camera = PerspectiveCamera::new(50.0, 1.0, 0.01, 100.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);
        let config = ControlsConfig {
            enable_damping: damping,
            ..ControlsConfig::default()
        };
        let mut controls = OrbitControls::new(&camera, &config);
        controls.set_viewport(Viewport::new(800, 600));
        (camera, controls)
    }

    fn azimuth(camera: &PerspectiveCamera) -> f32 {
        camera.position.x.atan2(camera.position.z)
    }

    #[test]
    fn idle_update_keeps_camera_still() {
        let (mut camera, mut controls) = setup(true);
        assert!(!controls.update(&mut camera));
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let (mut camera, mut controls) = setup(false);
        controls.rotate_left(-0.5);
        assert!(controls.update(&mut camera));
        assert!((azimuth(&camera) - 0.5).abs() < 1e-5);
        assert!(!controls.update(&mut camera));
        assert!((azimuth(&camera) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn damped_rotation_decays_geometrically() {
        let (mut camera, mut controls) = setup(true);
        controls.rotate_left(-1.0);
        controls.update(&mut camera);
        let first = azimuth(&camera);
        assert!((first - 0.05).abs() < 1e-5);
        controls.update(&mut camera);
        let second = azimuth(&camera) - first;
        assert!((second - 0.05 * 0.95).abs() < 1e-5);
        assert!(controls.is_moving());
    }

    #[test]
    fn damped_motion_settles() {
        let (mut camera, mut controls) = setup(true);
        controls.rotate_left(-1.0);
        for _ in 0..1000 {
            controls.update(&mut camera);
        }
        assert!(!controls.is_moving());
        // The full angle is eventually covered.
        assert!((azimuth(&camera) - 1.0).abs() < 1e-3);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn drag_across_full_height_orbits_a_full_turn() {
        let (mut camera, mut controls) = setup(false);
        controls.handle_input(ControlInput::Rotate(Vec2::new(300.0, 0.0)));
        controls.update(&mut camera);
        // Half the viewport height is half a turn.
        assert!((azimuth(&camera).abs() - std::f32::consts::PI).abs() < 1e-3);
    }

    #[test]
    fn wheel_dollies_with_zoom_scale() {
        let (mut camera, mut controls) = setup(true);
        controls.wheel(-100.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 5.0 * 0.95).abs() < 1e-5);

        controls.wheel(100.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let (mut camera, mut controls) = setup(false);
        controls.max_distance = 6.0;
        controls.dolly_out(0.1);
        controls.update(&mut camera);
        assert!((camera.position.length() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn polar_angle_never_reaches_pole() {
        let (mut camera, mut controls) = setup(false);
        controls.rotate_up(10.0);
        controls.update(&mut camera);
        assert!(camera.position.y > 4.99);
        assert!(camera.position.is_finite());
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let (mut camera, mut controls) = setup(false);
        controls.handle_input(ControlInput::Pan(Vec2::new(100.0, 0.0)));
        controls.update(&mut camera);
        // Dragging right moves the view left.
        assert!(controls.target().x < 0.0);
        assert!((camera.position.x - controls.target().x).abs() < 1e-5);
        assert!((camera.position.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn vertical_pan_follows_camera_up() {
        let (mut camera, mut controls) = setup(false);
        controls.pan(Vec2::new(0.0, 50.0));
        assert!(controls.is_moving());
        controls.update(&mut camera);
        assert!(controls.target().y > 0.0);
        assert!(controls.target().x.abs() < 1e-6);
        assert!(!controls.is_moving());
    }

    #[test]
    fn pointer_drag_routes_through_tracker() {
        let (mut camera, mut controls) = setup(false);
        controls.pointer_moved(Vec2::new(100.0, 100.0));
        controls.pointer_button(PointerButton::Primary, true);
        controls.pointer_moved(Vec2::new(130.0, 100.0));
        controls.pointer_button(PointerButton::Primary, false);
        assert!(controls.update(&mut camera));
        assert!(azimuth(&camera) < 0.0);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut camera, mut controls) = setup(false);
        controls.enabled = false;
        controls.handle_input(ControlInput::Dolly(-1.0));
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn dispose_clears_pending_motion() {
        let (mut camera, mut controls) = setup(true);
        controls.rotate_left(1.0);
        controls.dispose();
        assert!(!controls.is_moving());
        assert!(!controls.update(&mut camera));
        controls.wheel(-1.0);
        assert!(!controls.is_moving());
    }
}

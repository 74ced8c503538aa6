use crate::action::ControlInput;
use glam::Vec2;

/// Pointer button, independent of the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Tracks the active drag and turns pointer events into control inputs.
///
/// Primary drag rotates (pans while a pan modifier is held), middle drag
/// dollies, secondary drag pans. Only one button drives a drag at a time.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    active: Option<PointerButton>,
    last: Option<Vec2>,
    pan_modifier: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ctrl, Shift or Meta held: primary drag pans instead of rotating.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    pub fn active_button(&self) -> Option<PointerButton> {
        self.active
    }

    /// Button press or release. Releasing the active button ends the drag.
    pub fn button(&mut self, button: PointerButton, pressed: bool) -> Option<ControlInput> {
        if pressed {
            if self.active.is_none() {
                tracing::trace!(?button, "pointer: drag start");
                self.active = Some(button);
            }
            None
        } else if self.active == Some(button) {
            tracing::trace!(?button, "pointer: drag end");
            self.active = None;
            Some(ControlInput::End)
        } else {
            None
        }
    }

    /// Cursor moved to `position`. Yields the drag motion, if a drag is active.
    pub fn moved(&mut self, position: Vec2) -> Option<ControlInput> {
        let last = self.last.replace(position)?;
        let delta = position - last;
        let input = match self.active? {
            PointerButton::Primary if self.pan_modifier => ControlInput::Pan(delta),
            PointerButton::Primary => ControlInput::Rotate(delta),
            PointerButton::Middle => ControlInput::Dolly(delta.y),
            PointerButton::Secondary => ControlInput::Pan(delta),
        };
        (!input.is_zero()).then_some(input)
    }

    /// Wheel scroll, with the sign of a browser `deltaY`: positive scrolls down.
    pub fn wheel(&mut self, delta_y: f32) -> Option<ControlInput> {
        (delta_y != 0.0).then_some(ControlInput::Dolly(delta_y))
    }

    /// Cursor left the surface; the next move starts a fresh delta.
    pub fn left(&mut self) {
        self.last = None;
    }

    /// Forget any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

use glam::Vec2;

/// A high-level camera control request produced from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    /// Orbit around the target by a pointer drag delta.
    Rotate(Vec2),
    /// Translate camera and target by a pointer drag delta.
    Pan(Vec2),
    /// Move towards (negative) or away from (positive) the target.
    Dolly(f32),
    /// Pointer interaction ended.
    End,
}

impl ControlInput {
    /// True when the input carries no motion.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rotate(d) | Self::Pan(d) => *d == Vec2::ZERO,
            Self::Dolly(d) => *d == 0.0,
            Self::End => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_is_constructible() {
        let a = ControlInput::Rotate(Vec2::new(1.0, 0.0));
        assert!(matches!(a, ControlInput::Rotate(_)));
        assert!(!a.is_zero());
    }

    #[test]
    fn zero_motion() {
        assert!(ControlInput::Pan(Vec2::ZERO).is_zero());
        assert!(ControlInput::Dolly(0.0).is_zero());
        assert!(ControlInput::End.is_zero());
        assert!(!ControlInput::Dolly(-1.0).is_zero());
    }
}

//! Shader sources compiled into the binary.

/// Vertex stage: transforms the plane by the camera, passes uv through.
pub const VERTEX: &str = include_str!("../shaders/vertex.wgsl");

/// Fragment stage: colors the plane by its uv coordinates.
pub const FRAGMENT: &str = include_str!("../shaders/fragment.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_are_present() {
        assert!(VERTEX.contains("fn vs_main"));
        assert!(FRAGMENT.contains("fn fs_main"));
    }
}

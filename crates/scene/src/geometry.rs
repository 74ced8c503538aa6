/// One vertex of a plane: position, normal and texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat rectangle in the XY plane, centered at the origin, facing +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    vertices: Vec<PlaneVertex>,
    indices: Vec<u16>,
}

impl PlaneGeometry {
    /// A single-segment plane of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let n = [0.0, 0.0, 1.0];
        // Rows run top to bottom; uv v=1 at the top edge.
        #[rustfmt::skip]
        let vertices = vec![
            PlaneVertex { position: [-hw,  hh, 0.0], normal: n, uv: [0.0, 1.0] },
            PlaneVertex { position: [ hw,  hh, 0.0], normal: n, uv: [1.0, 1.0] },
            PlaneVertex { position: [-hw, -hh, 0.0], normal: n, uv: [0.0, 0.0] },
            PlaneVertex { position: [ hw, -hh, 0.0], normal: n, uv: [1.0, 0.0] },
        ];
        // Counter-clockwise when seen from +Z.
        let indices = vec![0, 2, 1, 2, 3, 1];
        Self {
            width,
            height,
            vertices,
            indices,
        }
    }

    pub fn vertices(&self) -> &[PlaneVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

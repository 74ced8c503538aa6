use crate::geometry::PlaneGeometry;
use crate::material::ShaderMaterial;
use glam::Mat4;

/// Uniform light applied equally to everything in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Linear RGB as authored.
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32, intensity: f32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::new([r, g, b], intensity)
    }
}

/// Geometry drawn with a shader material.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: ShaderMaterial,
    pub model: Mat4,
}

impl Mesh {
    pub fn new(geometry: PlaneGeometry, material: ShaderMaterial) -> Self {
        Self {
            geometry,
            material,
            model: Mat4::IDENTITY,
        }
    }
}

/// A direct child of the scene root.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    AmbientLight(AmbientLight),
    Mesh(Mesh),
}

/// Root of the scene graph. Children are kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    children: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) {
        tracing::debug!(kind = node.kind(), "scene: add child");
        self.children.push(node);
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn ambient_lights(&self) -> impl Iterator<Item = &AmbientLight> {
        self.children.iter().filter_map(|n| match n {
            SceneNode::AmbientLight(l) => Some(l),
            _ => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.children.iter().filter_map(|n| match n {
            SceneNode::Mesh(m) => Some(m),
            _ => None,
        })
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut Mesh> {
        self.children.iter_mut().filter_map(|n| match n {
            SceneNode::Mesh(m) => Some(m),
            _ => None,
        })
    }

    /// Sum of all ambient contributions, `color * intensity` per channel.
    pub fn ambient(&self) -> [f32; 3] {
        self.ambient_lights().fold([0.0; 3], |acc, l| {
            [
                acc[0] + l.color[0] * l.intensity,
                acc[1] + l.color[1] * l.intensity,
                acc[2] + l.color[2] * l.intensity,
            ]
        })
    }
}

impl SceneNode {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AmbientLight(_) => "ambient_light",
            Self::Mesh(_) => "mesh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_is_empty() {
        let scene = Scene::new();
        assert!(scene.children().is_empty());
        assert_eq!(scene.ambient(), [0.0; 3]);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut scene = Scene::new();
        scene.add(SceneNode::AmbientLight(AmbientLight::from_hex(0xffffff, 1.0)));
        scene.add(SceneNode::Mesh(Mesh::new(
            PlaneGeometry::new(1.0, 1.0),
            ShaderMaterial::new("v", "f"),
        )));
        let kinds: Vec<_> = scene.children().iter().map(SceneNode::kind).collect();
        assert_eq!(kinds, ["ambient_light", "mesh"]);
        assert_eq!(scene.meshes().count(), 1);
        assert_eq!(scene.ambient_lights().count(), 1);
    }

    #[test]
    fn hex_white_is_full_intensity() {
        let light = AmbientLight::from_hex(0xffffff, 1.0);
        assert_eq!(light.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn ambient_accumulates_lights() {
        let mut scene = Scene::new();
        scene.add(SceneNode::AmbientLight(AmbientLight::new([1.0, 0.5, 0.0], 0.5)));
        scene.add(SceneNode::AmbientLight(AmbientLight::new([0.0, 0.5, 1.0], 1.0)));
        assert_eq!(scene.ambient(), [0.5, 0.75, 1.0]);
    }

    #[test]
    fn meshes_mut_reaches_material() {
        let mut scene = Scene::new();
        scene.add(SceneNode::Mesh(Mesh::new(
            PlaneGeometry::new(1.0, 1.0),
            ShaderMaterial::new("v", "f"),
        )));
        for mesh in scene.meshes_mut() {
            mesh.material.set_time(2.0);
        }
        assert_eq!(scene.meshes().next().unwrap().material.uniforms.time, Some(2.0));
    }
}

use planeview_scene::{PerspectiveCamera, Scene, SceneNode};
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene and camera for logging, the CLI and
/// the debug renderer.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene as seen through `camera`.
    pub fn summary(scene: &Scene, camera: &PerspectiveCamera) -> SceneSummary {
        let p = camera.position;
        let t = camera.target();
        SceneSummary {
            children: scene.children().iter().map(|n| n.kind()).collect(),
            ambient: scene.ambient(),
            mesh_count: scene.meshes().count(),
            vertex_count: scene.meshes().map(|m| m.geometry.vertices().len()).sum(),
            camera_position: [p.x, p.y, p.z],
            camera_target: [t.x, t.y, t.z],
            camera_fov: camera.fov,
            camera_aspect: camera.aspect,
        }
    }

    /// Shader stage lengths per mesh, in bytes.
    pub fn shader_sizes(scene: &Scene) -> Vec<(usize, usize)> {
        scene
            .children()
            .iter()
            .filter_map(|n| match n {
                SceneNode::Mesh(m) => {
                    Some((m.material.vertex_shader.len(), m.material.fragment_shader.len()))
                }
                _ => None,
            })
            .collect()
    }
}

/// Summary of scene and camera state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub children: Vec<&'static str>,
    pub ambient: [f32; 3],
    pub mesh_count: usize,
    pub vertex_count: usize,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub camera_fov: f32,
    pub camera_aspect: f32,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: children=[{}] meshes={} vertices={} camera=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.4}",
            self.children.join(", "),
            self.mesh_count,
            self.vertex_count,
            self.camera_position[0],
            self.camera_position[1],
            self.camera_position[2],
            self.camera_fov,
            self.camera_aspect,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use planeview_scene::{AmbientLight, Mesh, PlaneGeometry, ShaderMaterial};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(SceneNode::AmbientLight(AmbientLight::from_hex(0xffffff, 1.0)));
        scene.add(SceneNode::Mesh(Mesh::new(
            PlaneGeometry::new(1.0, 1.0),
            ShaderMaterial::new("vertex", "fragment!"),
        )));
        scene
    }

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(50.0, 800.0 / 600.0, 0.01, 100.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera
    }

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&Scene::new(), &camera());
        assert!(summary.children.is_empty());
        assert_eq!(summary.mesh_count, 0);
        assert_eq!(summary.vertex_count, 0);
    }

    #[test]
    fn summary_with_light_and_plane() {
        let summary = SceneInspector::summary(&scene(), &camera());
        assert_eq!(summary.children, ["ambient_light", "mesh"]);
        assert_eq!(summary.mesh_count, 1);
        assert_eq!(summary.vertex_count, 4);
        assert_eq!(summary.ambient, [1.0, 1.0, 1.0]);
        assert_eq!(summary.camera_position, [0.0, 0.0, 5.0]);
        assert_eq!(summary.camera_aspect, 800.0 / 600.0);
    }

    #[test]
    fn shader_sizes_per_mesh() {
        assert_eq!(SceneInspector::shader_sizes(&scene()), vec![(6, 9)]);
    }

    #[test]
    fn summary_display_and_json() {
        let summary = SceneInspector::summary(&scene(), &camera());
        let s = format!("{summary}");
        assert!(s.contains("children=[ambient_light, mesh]"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mesh_count"], 1);
    }
}

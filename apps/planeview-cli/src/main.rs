use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use planeview_common::{Viewport, ViewerConfig};
use planeview_render::DebugTextRenderer;
use planeview_scene::Scene;
use planeview_tools::SceneInspector;
use planeview_viewer::{FrameState, HeadlessHost, Viewer, shaders};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planeview-cli", about = "Headless planeview tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Simulated window metrics.
#[derive(Args, Clone, Copy)]
struct HostArgs {
    /// Logical window width
    #[arg(long, default_value = "1280")]
    width: u32,
    /// Logical window height
    #[arg(long, default_value = "720")]
    height: u32,
    /// Device pixel ratio
    #[arg(long, default_value = "1.0")]
    dpr: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, camera defaults and shader sizes
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Build the scene and print a summary of it
    Inspect {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Drive the render loop against the text renderer
    Run {
        /// Number of frames to render
        #[arg(short, long, default_value = "3")]
        frames: u64,
        #[command(flatten)]
        host: HostArgs,
    },
}

type HeadlessViewer = Viewer<DebugTextRenderer, HeadlessHost>;

fn headless_viewer(config: ViewerConfig, host: HostArgs) -> anyhow::Result<HeadlessViewer> {
    let host = HeadlessHost::new(Viewport::new(host.width, host.height), host.dpr);
    Viewer::new(
        DebugTextRenderer::new(),
        host,
        shaders::VERTEX,
        shaders::FRAGMENT,
        config,
    )
    .context("create viewer")
}

impl Default for HostArgs {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            dpr: 1.0,
        }
    }
}

/// One line per mesh with the byte size of each shader stage.
fn shader_lines(scene: &Scene) -> Vec<String> {
    SceneInspector::shader_sizes(scene)
        .into_iter()
        .enumerate()
        .map(|(i, (vertex, fragment))| {
            format!("mesh {i}: vertex shader {vertex} bytes, fragment shader {fragment} bytes")
        })
        .collect()
}

/// Tick once per pending frame request, up to `frames` frames.
fn run_frames(viewer: &mut HeadlessViewer, frames: u64) -> anyhow::Result<u64> {
    let mut rendered = 0;
    while rendered < frames && viewer.host().take_frame() {
        match viewer.tick()? {
            FrameState::Scheduled => rendered += 1,
            FrameState::Stopped => break,
        }
    }
    Ok(rendered)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("planeview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "camera: fov={} near={} far={} distance={}",
                config.camera.fov_degrees,
                config.camera.near,
                config.camera.far,
                config.camera.distance
            );
            let mut viewer = headless_viewer(config, HostArgs::default())?;
            for line in shader_lines(viewer.scene()) {
                println!("{line}");
            }
            viewer.dispose();
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Inspect { json, host } => {
            let mut viewer = headless_viewer(config, host)?;
            let summary = SceneInspector::summary(viewer.scene(), viewer.camera());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
            viewer.dispose();
        }
        Commands::Run { frames, host } => {
            let mut viewer = headless_viewer(config, host)?;
            let rendered = run_frames(&mut viewer, frames)?;
            if let Some(text) = viewer.renderer().last_frame() {
                println!("{text}");
            }
            println!(
                "rendered {rendered} frame(s) in {:.3}s, pending requests: {}",
                viewer.elapsed_time(),
                viewer.host().pending_frames()
            );
            viewer.dispose();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostArgs {
        HostArgs {
            width: 800,
            height: 600,
            dpr: 3.0,
        }
    }

    #[test]
    fn run_frames_follows_host_requests() {
        let mut viewer = headless_viewer(ViewerConfig::default(), host()).unwrap();
        let rendered = run_frames(&mut viewer, 5).unwrap();
        assert_eq!(rendered, 5);
        assert_eq!(viewer.frames_rendered(), 5);
        // The last tick asked for one more frame.
        assert_eq!(viewer.host().pending_frames(), 1);
    }

    #[test]
    fn stopped_viewer_runs_nothing() {
        let mut viewer = headless_viewer(ViewerConfig::default(), host()).unwrap();
        viewer.stop();
        assert_eq!(run_frames(&mut viewer, 3).unwrap(), 0);
    }

    #[test]
    fn inspect_summary_reflects_host_metrics() {
        let viewer = headless_viewer(ViewerConfig::default(), host()).unwrap();
        let summary = SceneInspector::summary(viewer.scene(), viewer.camera());
        assert_eq!(summary.children, vec!["ambient_light", "mesh"]);
        assert!((summary.camera_aspect - 800.0 / 600.0).abs() < 1e-6);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mesh_count"], 1);
    }

    #[test]
    fn info_lists_builtin_shader_sizes() {
        let viewer = headless_viewer(ViewerConfig::default(), HostArgs::default()).unwrap();
        let lines = shader_lines(viewer.scene());
        assert_eq!(
            lines,
            vec![format!(
                "mesh 0: vertex shader {} bytes, fragment shader {} bytes",
                shaders::VERTEX.len(),
                shaders::FRAGMENT.len()
            )]
        );
    }

    #[test]
    fn cli_parses_run_with_host_metrics() {
        let cli = Cli::parse_from(["planeview-cli", "run", "--frames", "2", "--dpr", "2.5"]);
        match cli.command {
            Commands::Run { frames, host } => {
                assert_eq!(frames, 2);
                assert_eq!(host.width, 1280);
                assert_eq!(host.dpr, 2.5);
            }
            _ => panic!("expected run"),
        }
    }
}
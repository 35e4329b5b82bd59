use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use primer_engine::frame::TransformParams;
use primer_engine::shader::ShaderSources;
use primer_engine::window::RuntimeConfig;

/// Renders an animated procedural sphere.
#[derive(Debug, Parser)]
#[command(name = "primer", version)]
pub struct Args {
    /// Window width in physical pixels.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in physical pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Sphere radius before the object scale is applied.
    #[arg(long, default_value_t = 1.0)]
    pub radius: f32,

    /// Latitude bands; longitude segments are twice this.
    #[arg(long, default_value_t = 20)]
    pub tessellation: u32,

    /// WGSL vertex stage (`vs_main`). Built-in shader when omitted.
    #[arg(long)]
    pub vertex_shader: Option<PathBuf>,

    /// WGSL fragment stage (`fs_main`). Built-in shader when omitted.
    #[arg(long)]
    pub fragment_shader: Option<PathBuf>,

    /// Log filter, `env_logger` syntax. Overrides RUST_LOG.
    #[arg(long)]
    pub log: Option<String>,

    /// Sync presentation to the display instead of running uncapped.
    #[arg(long)]
    pub vsync: bool,

    #[arg(long, default_value = "primer")]
    pub title: String,
}

impl Args {
    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig {
            title: self.title.clone(),
            ..Default::default()
        };
        config.initial_size.width = self.width.max(1);
        config.initial_size.height = self.height.max(1);
        config
    }
}

/// What to draw and how to animate it.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub title: String,
    pub radius: f32,
    pub tessellation: u32,
    pub shaders: ShaderSources,
    pub params: TransformParams,
}

impl SceneConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let shaders = load_shaders(args.vertex_shader.as_ref(), args.fragment_shader.as_ref())?;
        shaders.check_entry_points()?;
        let block = shaders.uniform_layout()?;
        log::debug!("shaders declare {} parameters", block.fields().len());

        Ok(Self {
            title: args.title.clone(),
            radius: args.radius,
            tessellation: args.tessellation,
            shaders,
            params: TransformParams::default(),
        })
    }
}

/// Either stage may be overridden on its own; the other stays built in.
fn load_shaders(vertex: Option<&PathBuf>, fragment: Option<&PathBuf>) -> Result<ShaderSources> {
    if let (Some(v), Some(f)) = (vertex, fragment) {
        return ShaderSources::from_files(v, f);
    }

    let mut sources = ShaderSources::builtin();

    if let Some(path) = vertex {
        sources.vertex = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read vertex shader {}", path.display()))?;
        log::info!("vertex shader: {}", path.display());
    }
    if let Some(path) = fragment {
        sources.fragment = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fragment shader {}", path.display()))?;
        log::info!("fragment shader: {}", path.display());
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_scene() {
        let args = Args::parse_from(["primer"]);
        assert_eq!((args.width, args.height), (800, 600));
        assert_eq!(args.tessellation, 20);
        assert!(!args.vsync);

        let scene = SceneConfig::from_args(&args).unwrap();
        assert_eq!(scene.shaders, ShaderSources::builtin());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "primer",
            "--width",
            "1024",
            "--tessellation",
            "8",
            "--radius",
            "0.5",
            "--vsync",
            "--log",
            "debug",
        ]);
        let rt = args.runtime_config();
        assert_eq!(rt.initial_size.width, 1024);
        assert_eq!(args.radius, 0.5);
        assert_eq!(args.log.as_deref(), Some("debug"));
        assert!(args.vsync);
    }

    #[test]
    fn missing_shader_file_is_fatal() {
        let args = Args::parse_from(["primer", "--fragment-shader", "/nonexistent/f.wgsl"]);
        let err = SceneConfig::from_args(&args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/f.wgsl"));
    }
}

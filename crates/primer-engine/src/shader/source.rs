use std::path::Path;

use anyhow::{Context, Result};

use super::reflect::reflect_uniforms;
use super::UniformLayout;

/// Parameter names declared by the built-in shaders.
pub const MODELVIEW: &str = "modelview";
pub const MODEL: &str = "model";
pub const ROTATION: &str = "rotation";
pub const TIME: &str = "time";

/// WGSL source text for the two programmable stages.
///
/// The vertex source must define `vs_main`, the fragment source `fs_main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Shaders shipped with the engine; their uniform block declares every
    /// parameter the frame loop writes.
    pub fn builtin() -> Self {
        Self {
            vertex: include_str!("shaders/sphere.vert.wgsl").to_owned(),
            fragment: include_str!("shaders/sphere.frag.wgsl").to_owned(),
        }
    }

    /// Reads both stages from disk.
    pub fn from_files(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self> {
        let vertex = vertex.as_ref();
        let fragment = fragment.as_ref();

        let sources = Self {
            vertex: std::fs::read_to_string(vertex)
                .with_context(|| format!("failed to read vertex shader {}", vertex.display()))?,
            fragment: std::fs::read_to_string(fragment)
                .with_context(|| format!("failed to read fragment shader {}", fragment.display()))?,
        };

        log::info!("loaded shaders {} and {}", vertex.display(), fragment.display());
        Ok(sources)
    }

    /// Cheap sanity check run before handing the text to the GPU compiler.
    pub fn check_entry_points(&self) -> Result<()> {
        anyhow::ensure!(
            self.vertex.contains("@vertex") && self.vertex.contains("fn vs_main"),
            "vertex shader does not declare an `@vertex fn vs_main`"
        );
        anyhow::ensure!(
            self.fragment.contains("@fragment") && self.fragment.contains("fn fs_main"),
            "fragment shader does not declare an `@fragment fn fs_main`"
        );
        Ok(())
    }

    /// Uniform block the sources declare at `@group(0) @binding(0)`.
    ///
    /// When both stages declare it, one declaration must be a prefix of the
    /// other and the longer one wins. Sources with no block get an empty
    /// layout, so every parameter lookup misses.
    pub fn uniform_layout(&self) -> Result<UniformLayout> {
        let vertex = reflect_uniforms(&self.vertex).context("vertex shader")?;
        let fragment = reflect_uniforms(&self.fragment).context("fragment shader")?;

        match (vertex, fragment) {
            (Some(v), Some(f)) => {
                let (short, long) = if v.fields().len() <= f.fields().len() { (v, f) } else { (f, v) };
                anyhow::ensure!(
                    long.fields().starts_with(short.fields()),
                    "vertex and fragment shaders declare incompatible uniform blocks"
                );
                Ok(long)
            }
            (Some(layout), None) | (None, Some(layout)) => Ok(layout),
            (None, None) => {
                log::warn!("shaders declare no uniform block at @group(0) @binding(0)");
                Ok(UniformLayout::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_have_entry_points() {
        ShaderSources::builtin().check_entry_points().unwrap();
    }

    #[test]
    fn builtin_sources_declare_every_uniform() {
        let layout = ShaderSources::builtin().uniform_layout().unwrap();
        for name in [MODELVIEW, MODEL, ROTATION, TIME] {
            assert!(layout.find(name).is_some(), "missing `{name}`");
        }
        assert_eq!(layout.size(), 208);
    }

    #[test]
    fn fragment_only_block_is_used() {
        let sources = ShaderSources {
            vertex: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }".into(),
            fragment: ShaderSources::builtin().fragment,
        };
        let layout = sources.uniform_layout().unwrap();
        assert!(layout.find(TIME).is_some());
    }

    #[test]
    fn stages_must_agree_on_the_block() {
        let sources = ShaderSources {
            vertex: ShaderSources::builtin().vertex,
            fragment: "
                struct Params { time: f32 }
                @group(0) @binding(0) var<uniform> params: Params;
                @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(params.time); }
            "
            .into(),
        };
        let err = sources.uniform_layout().unwrap_err();
        assert!(err.to_string().contains("incompatible uniform blocks"));
    }

    #[test]
    fn shorter_block_may_be_a_prefix() {
        let sources = ShaderSources {
            vertex: "
                struct Params { modelview: mat4x4<f32> }
                @group(0) @binding(0) var<uniform> params: Params;
                @vertex fn vs_main() -> @builtin(position) vec4<f32> { return params.modelview[3]; }
            "
            .into(),
            fragment: ShaderSources::builtin().fragment,
        };
        let layout = sources.uniform_layout().unwrap();
        assert_eq!(layout.fields().len(), 4);
        assert!(layout.find(TIME).is_some());
    }

    #[test]
    fn parameter_missing_from_both_stages_has_no_slot() {
        let block = "
            struct Params { modelview: mat4x4<f32>, model: mat4x4<f32> }
            @group(0) @binding(0) var<uniform> params: Params;
        ";
        let sources = ShaderSources {
            vertex: format!("{block}@vertex fn vs_main() -> @builtin(position) vec4<f32> {{ return params.model[3]; }}"),
            fragment: format!("{block}@fragment fn fs_main() -> @location(0) vec4<f32> {{ return params.modelview[0]; }}"),
        };
        let layout = sources.uniform_layout().unwrap();
        assert!(layout.find(MODEL).is_some());
        assert_eq!(layout.find(TIME), None);
        assert_eq!(layout.find(ROTATION), None);
    }

    #[test]
    fn missing_entry_point_is_reported() {
        let sources = ShaderSources {
            vertex: "fn main() {}".into(),
            fragment: ShaderSources::builtin().fragment,
        };
        assert!(sources.check_entry_points().is_err());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = ShaderSources::from_files("/nonexistent/v.wgsl", "/nonexistent/f.wgsl").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/v.wgsl"));
    }
}

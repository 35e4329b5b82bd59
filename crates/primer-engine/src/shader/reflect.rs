use anyhow::{bail, Context, Result};
use wgpu::naga;

use super::{ParamKind, UniformLayout};

/// Reads the uniform struct bound at `@group(0) @binding(0)` out of WGSL.
///
/// Returns `Ok(None)` when the source declares nothing at that binding.
/// Members must be `mat4x4<f32>` or `f32` and sit at the offsets WGSL's
/// default layout gives them; anything else is an error.
pub fn reflect_uniforms(source: &str) -> Result<Option<UniformLayout>> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow::anyhow!("{}", e.emit_to_string(source)))
        .context("failed to parse WGSL")?;

    let Some(var) = module
        .global_variables
        .iter()
        .map(|(_, var)| var)
        .find(|var| matches!(var.binding, Some(naga::ResourceBinding { group: 0, binding: 0 })))
    else {
        return Ok(None);
    };

    if !matches!(var.space, naga::AddressSpace::Uniform) {
        bail!("@group(0) @binding(0) is not a uniform buffer");
    }
    let naga::TypeInner::Struct { members, .. } = &module.types[var.ty].inner else {
        bail!("uniform at @group(0) @binding(0) is not a struct");
    };

    let mut layout = UniformLayout::new();
    for member in members {
        let name = member
            .name
            .as_deref()
            .context("uniform struct has an unnamed member")?;
        let Some(kind) = param_kind(&module.types[member.ty].inner) else {
            bail!("uniform member `{name}` must be mat4x4<f32> or f32");
        };

        let slot = layout.push(name, kind);
        let offset = layout.field(slot).map(|f| f.offset);
        if offset != Some(member.offset as usize) {
            bail!(
                "uniform member `{name}` is at offset {} but the default layout puts it at {:?}",
                member.offset,
                offset
            );
        }
    }

    Ok(Some(layout))
}

fn param_kind(inner: &naga::TypeInner) -> Option<ParamKind> {
    match *inner {
        naga::TypeInner::Matrix {
            columns: naga::VectorSize::Quad,
            rows: naga::VectorSize::Quad,
            scalar,
        } if scalar == naga::Scalar::F32 => Some(ParamKind::Mat4),
        naga::TypeInner::Scalar(scalar) if scalar == naga::Scalar::F32 => Some(ParamKind::Float),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ShaderSources, MODEL, MODELVIEW, ROTATION, TIME};

    const NO_TIME: &str = "
        struct Params {
            modelview: mat4x4<f32>,
            model: mat4x4<f32>,
        }
        @group(0) @binding(0) var<uniform> params: Params;

        @vertex
        fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
            return params.modelview * vec4<f32>(p, 1.0);
        }
    ";

    #[test]
    fn builtin_vertex_block_has_every_parameter() {
        let layout = reflect_uniforms(&ShaderSources::builtin().vertex).unwrap().unwrap();
        let fields: Vec<(&str, ParamKind, usize)> = layout
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.offset))
            .collect();
        assert_eq!(
            fields,
            vec![
                (MODELVIEW, ParamKind::Mat4, 0),
                (MODEL, ParamKind::Mat4, 64),
                (ROTATION, ParamKind::Mat4, 128),
                (TIME, ParamKind::Float, 192),
            ]
        );
    }

    #[test]
    fn undeclared_member_has_no_slot() {
        let layout = reflect_uniforms(NO_TIME).unwrap().unwrap();
        assert!(layout.find(MODELVIEW).is_some());
        assert_eq!(layout.find(TIME), None);
        assert_eq!(layout.find(ROTATION), None);
        assert_eq!(layout.size(), 128);
    }

    #[test]
    fn source_without_binding_has_no_block() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        assert_eq!(reflect_uniforms(src).unwrap(), None);
    }

    #[test]
    fn unsupported_member_type_is_rejected() {
        let src = "
            struct Params { tint: vec3<f32> }
            @group(0) @binding(0) var<uniform> params: Params;
        ";
        let err = reflect_uniforms(src).unwrap_err();
        assert!(format!("{err:#}").contains("`tint`"));
    }

    #[test]
    fn explicit_alignment_that_moves_a_member_is_rejected() {
        let src = "
            struct Params { time: f32, @align(32) model: mat4x4<f32> }
            @group(0) @binding(0) var<uniform> params: Params;
        ";
        assert!(reflect_uniforms(src).is_err());
    }

    #[test]
    fn invalid_wgsl_is_an_error() {
        assert!(reflect_uniforms("struct {").is_err());
    }
}

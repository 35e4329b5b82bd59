use std::f32::consts::FRAC_PI_6;

use crate::math::Mat4;

/// Animation parameters for the per-frame transform stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformParams {
    /// Spin about +Y in radians per second.
    pub spin_rate: f32,
    /// Tumble about +Z in radians per second.
    pub tumble_rate: f32,
    /// Uniform object scale.
    pub scale: f32,
    /// Object translation, applied last.
    pub offset: [f32; 3],
    /// Fixed camera tilt about +X in radians.
    pub camera_pitch: f32,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            spin_rate: 1.0,
            tumble_rate: 0.35,
            scale: 0.8,
            offset: [0.0, 0.0, 0.0],
            camera_pitch: FRAC_PI_6,
        }
    }
}

/// Matrices pushed to the shader for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTransforms {
    /// `T(offset) · Ry(spin·t) · Rz(tumble·t) · S(scale)`: scale acts first.
    pub model: Mat4,
    /// `Rx(camera_pitch)`.
    pub camera: Mat4,
    /// `camera · model`.
    pub modelview: Mat4,
    /// `Ry(spin·t)` on its own.
    pub rotation: Mat4,
}

impl FrameTransforms {
    /// Builds the stack for `time` seconds of wall-clock animation.
    pub fn at(time: f32, params: &TransformParams) -> Self {
        let rotation = Mat4::rotation_y(params.spin_rate * time);
        let tumble = Mat4::rotation_z(params.tumble_rate * time);
        let scale = Mat4::scale(params.scale);
        let [x, y, z] = params.offset;
        let translation = Mat4::translation(x, y, z);

        let model = translation * (rotation * (tumble * scale));
        let camera = Mat4::rotation_x(params.camera_pitch);
        let modelview = camera * model;

        Self {
            model,
            camera,
            modelview,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> TransformParams {
        TransformParams {
            spin_rate: 1.0,
            tumble_rate: 0.0,
            scale: 0.5,
            offset: [1.0, 0.0, 0.0],
            camera_pitch: 0.0,
        }
    }

    #[test]
    fn time_zero_is_scale_then_translate() {
        let xf = FrameTransforms::at(0.0, &still());
        assert_eq!(xf.model.transform_point([2.0, 2.0, 2.0]), [2.0, 1.0, 1.0]);
        assert_eq!(xf.rotation, Mat4::IDENTITY);
        assert_eq!(xf.modelview, xf.model);
    }

    #[test]
    fn translation_is_not_rotated() {
        // Whatever the spin, the object center stays at the offset.
        for t in [0.0, 0.7, 2.0, 13.0] {
            let xf = FrameTransforms::at(t, &still());
            let c = xf.model.transform_point([0.0, 0.0, 0.0]);
            assert!((c[0] - 1.0).abs() < 1e-6 && c[1].abs() < 1e-6 && c[2].abs() < 1e-6);
        }
    }

    #[test]
    fn modelview_applies_camera_last() {
        let params = TransformParams::default();
        let xf = FrameTransforms::at(1.25, &params);
        assert_eq!(xf.modelview, xf.camera * xf.model);
        assert_eq!(xf.camera, Mat4::rotation_x(params.camera_pitch));
    }

    #[test]
    fn animation_depends_only_on_time() {
        let params = TransformParams::default();
        assert_eq!(FrameTransforms::at(3.5, &params), FrameTransforms::at(3.5, &params));
        assert_ne!(FrameTransforms::at(3.5, &params), FrameTransforms::at(3.6, &params));
    }
}

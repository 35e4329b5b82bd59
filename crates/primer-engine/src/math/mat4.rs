use std::fmt;
use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

/// 4x4 affine transform, column-major.
///
/// Element `(row, col)` lives at index `col * 4 + row`. Every constructor
/// produces a bottom row of `(0, 0, 0, 1)`; `multiply` preserves it.
///
/// `Mat4` is `Pod`, so it can be written straight into a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Builds a matrix from 16 values in column-major order.
    #[inline]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Returns the 16 values in column-major order.
    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }

    /// Element at `(row, col)`.
    ///
    /// Panics if either index is outside `0..4`.
    #[inline]
    pub const fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4);
        self.m[col * 4 + row]
    }

    /// Column `i` as `[x, y, z, w]`.
    #[inline]
    pub fn col(&self, i: usize) -> [f32; 4] {
        let b = i * 4;
        [self.m[b], self.m[b + 1], self.m[b + 2], self.m[b + 3]]
    }

    // ── constructors ──────────────────────────────────────────────────────

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `angle` radians about +X.
    ///
    /// Maps +Y toward +Z: `rotation_x(θ) · (0, 1, 0) = (0, cos θ, sin θ)`.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about +Y.
    ///
    /// Maps +Z toward +X: `rotation_y(θ) · (0, 0, 1) = (sin θ, 0, cos θ)`.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians about +Z.
    ///
    /// Maps +X toward +Y: `rotation_z(θ) · (1, 0, 0) = (cos θ, sin θ, 0)`.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Uniform scale by `factor`; the homogeneous entry stays 1.
    pub const fn scale(factor: f32) -> Self {
        Self::from_cols_array([
            factor, 0.0, 0.0, 0.0, //
            0.0, factor, 0.0, 0.0, //
            0.0, 0.0, factor, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Translation by `(x, y, z)`, stored in the fourth column.
    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            x, y, z, 1.0,
        ])
    }

    // ── composition ───────────────────────────────────────────────────────

    /// Matrix product `self · rhs`.
    ///
    /// Applied to a vector, `rhs` acts first. Each element is accumulated in
    /// the fixed order k = 0..4, so results are reproducible bit-for-bit.
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [0.0f32; 16];

        for col in 0..4 {
            let bc = col * 4;
            for row in 0..4 {
                out[bc + row] = a[row] * b[bc]
                    + a[4 + row] * b[bc + 1]
                    + a[8 + row] * b[bc + 2]
                    + a[12 + row] * b[bc + 3];
            }
        }

        Mat4 { m: out }
    }

    /// `self · v` for a homogeneous column vector.
    pub fn transform_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = m[row] * v[0] + m[4 + row] * v[1] + m[8 + row] * v[2] + m[12 + row] * v[3];
        }
        out
    }

    /// Transforms a point (`w = 1`), so translation applies.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let [x, y, z, _] = self.transform_vec4([p[0], p[1], p[2], 1.0]);
        [x, y, z]
    }

    /// Whether the bottom row is exactly `(0, 0, 0, 1)`.
    pub fn is_affine(&self) -> bool {
        self.m[3] == 0.0 && self.m[7] == 0.0 && self.m[11] == 0.0 && self.m[15] == 1.0
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl Mul<&Mat4> for &Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: &Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

/// Prints rows top to bottom, two decimals per element.
impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "{:6.2} {:6.2} {:6.2} {:6.2}",
                self.m[row],
                self.m[4 + row],
                self.m[8 + row],
                self.m[12 + row]
            )?;
        }
        Ok(())
    }
}

use std::f32::consts::{PI, TAU};

use super::MeshError;

/// Smallest sphere tessellation that yields a closed, non-degenerate mesh.
pub const MIN_TESSELLATION: u32 = 2;

/// Largest sphere tessellation whose vertices are all addressable by `u32`
/// indices: `(N + 1) * (2N + 1) <= u32::MAX`.
pub const MAX_TESSELLATION: u32 = 46_340;

/// CPU-side indexed triangle mesh: xyz positions, rgb colors, triangle indices.
///
/// This is the transient source of an upload; once a [`Mesh`](super::Mesh)
/// exists the data can be dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Generates a UV-sphere centered at the origin.
    ///
    /// `tessellation = N` gives N latitude bands and 2N longitude segments.
    /// The seam column and the pole rows are duplicated per segment, so:
    ///
    /// - vertices: `(N + 1) * (2N + 1)`
    /// - triangles: `4N * (N - 1)` (one per segment in each cap, two elsewhere)
    ///
    /// For N = 20 that is 861 vertices and 1520 triangles. Triangles wind
    /// counter-clockwise seen from outside. Colors map each unit direction
    /// from `[-1, 1]` to `[0, 1]`.
    pub fn sphere(radius: f32, tessellation: u32) -> Result<Self, MeshError> {
        if tessellation < MIN_TESSELLATION {
            return Err(MeshError::TessellationTooLow {
                requested: tessellation,
                minimum: MIN_TESSELLATION,
            });
        }
        if tessellation > MAX_TESSELLATION {
            return Err(MeshError::TessellationTooHigh {
                requested: tessellation,
                maximum: MAX_TESSELLATION,
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MeshError::InvalidRadius(radius));
        }

        let stacks = tessellation;
        let slices = 2 * tessellation;
        let ring = slices + 1;

        let vertex_count = sphere_vertex_count(tessellation);
        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut colors = Vec::with_capacity(vertex_count * 3);

        for i in 0..=stacks {
            let phi = PI * i as f32 / stacks as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            for j in 0..=slices {
                let theta = TAU * j as f32 / slices as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let dir = [sin_phi * sin_theta, cos_phi, sin_phi * cos_theta];
                positions.extend(dir.map(|d| d * radius));
                colors.extend(dir.map(|d| 0.5 * d + 0.5));
            }
        }

        let mut indices = Vec::with_capacity(sphere_triangle_count(tessellation) * 3);
        for i in 0..stacks {
            for j in 0..slices {
                // a-d is the upper edge of the quad, b-c the lower one.
                let a = i * ring + j;
                let b = a + ring;
                let c = b + 1;
                let d = a + 1;

                // At the poles one edge collapses to a point; skip the
                // triangle that would have zero area.
                if i + 1 != stacks {
                    indices.extend([a, b, c]);
                }
                if i != 0 {
                    indices.extend([a, c, d]);
                }
            }
        }

        Ok(Self {
            positions,
            colors,
            indices,
        })
    }

    /// A single triangle in the XY plane, facing +Z, with red/green/blue corners.
    pub fn triangle() -> Self {
        Self {
            positions: vec![
                -0.5, -0.5, 0.0, //
                0.5, -0.5, 0.0, //
                0.0, 0.5, 0.0,
            ],
            colors: vec![
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
            indices: vec![0, 1, 2],
        }
    }

    /// Axis-aligned cube with a flat color per face.
    ///
    /// Corners are duplicated per face (24 vertices, 12 triangles) so faces
    /// do not share colors.
    pub fn cube(half_extent: f32) -> Self {
        // (normal, u, v, color) with u x v = normal, so the corner order
        // below winds counter-clockwise seen from outside.
        const FACES: [([f32; 3], [f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
        ];
        const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut data = Self {
            positions: Vec::with_capacity(24 * 3),
            colors: Vec::with_capacity(24 * 3),
            indices: Vec::with_capacity(36),
        };

        for (face, (n, u, v, color)) in FACES.iter().enumerate() {
            for (su, sv) in CORNERS {
                for k in 0..3 {
                    data.positions.push(half_extent * (n[k] + su * u[k] + sv * v[k]));
                }
                data.colors.extend_from_slice(color);
            }
            let base = face as u32 * 4;
            data.indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        data
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks the invariants an upload relies on.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.is_empty() || self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::MisalignedPositions(self.positions.len()));
        }
        if self.colors.len() != self.positions.len() {
            return Err(MeshError::AttributeLengthMismatch {
                positions: self.positions.len(),
                colors: self.colors.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::MisalignedIndices(self.indices.len()));
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }
        Ok(())
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        let b = i * 3;
        [self.positions[b], self.positions[b + 1], self.positions[b + 2]]
    }
}

/// Vertex count of [`MeshData::sphere`] for a valid tessellation.
pub const fn sphere_vertex_count(tessellation: u32) -> usize {
    let n = tessellation as usize;
    (n + 1) * (2 * n + 1)
}

/// Triangle count of [`MeshData::sphere`] for a valid tessellation.
pub const fn sphere_triangle_count(tessellation: u32) -> usize {
    let n = tessellation as usize;
    4 * n * (n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0]]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Twice-area normal and centroid of every triangle.
    fn faces(mesh: &MeshData) -> Vec<([f32; 3], [f32; 3])> {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                let [a, b, c] = [0, 1, 2].map(|k| mesh.position(t[k] as usize));
                let n = cross(sub(b, a), sub(c, a));
                let centroid = [0, 1, 2].map(|k| (a[k] + b[k] + c[k]) / 3.0);
                (n, centroid)
            })
            .collect()
    }

    // ── sphere ────────────────────────────────────────────────────────────

    #[test]
    fn sphere_counts_for_twenty() {
        let mesh = MeshData::sphere(1.0, 20).unwrap();
        assert_eq!(mesh.vertex_count(), 861);
        assert_eq!(mesh.triangle_count(), 1520);
        assert_eq!(mesh.indices.len(), 4560);
        assert_eq!(mesh.colors.len(), mesh.positions.len());
    }

    #[test]
    fn sphere_counts_match_formula() {
        for n in [2, 3, 7, 16] {
            let mesh = MeshData::sphere(0.5, n).unwrap();
            assert_eq!(mesh.vertex_count(), sphere_vertex_count(n), "n = {n}");
            assert_eq!(mesh.triangle_count(), sphere_triangle_count(n), "n = {n}");
        }
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = MeshData::sphere(2.0, 20).unwrap();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        mesh.validate().unwrap();
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = MeshData::sphere(2.5, 9).unwrap();
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let r = dot(p, p).sqrt();
            assert!((r - 2.5).abs() < 1e-5, "vertex {i} at distance {r}");
        }
    }

    #[test]
    fn sphere_has_no_zero_area_triangles() {
        let mesh = MeshData::sphere(1.0, 20).unwrap();
        for (i, (n, _)) in faces(&mesh).into_iter().enumerate() {
            assert!(dot(n, n).sqrt() > 1e-6, "triangle {i} is degenerate");
        }
    }

    #[test]
    fn sphere_winds_counter_clockwise_from_outside() {
        let mesh = MeshData::sphere(1.0, 12).unwrap();
        for (i, (n, centroid)) in faces(&mesh).into_iter().enumerate() {
            assert!(dot(n, centroid) > 0.0, "triangle {i} faces inward");
        }
    }

    #[test]
    fn minimum_tessellation_is_an_octahedron() {
        let mesh = MeshData::sphere(1.0, 2).unwrap();
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn low_tessellation_is_rejected() {
        for n in [0, 1] {
            assert_eq!(
                MeshData::sphere(1.0, n),
                Err(MeshError::TessellationTooLow { requested: n, minimum: 2 })
            );
        }
    }

    #[test]
    fn high_tessellation_is_rejected_before_allocating() {
        for n in [MAX_TESSELLATION + 1, u32::MAX / 2 + 1, u32::MAX] {
            assert_eq!(
                MeshData::sphere(1.0, n),
                Err(MeshError::TessellationTooHigh {
                    requested: n,
                    maximum: MAX_TESSELLATION
                })
            );
        }
    }

    #[test]
    fn max_tessellation_is_the_u32_index_limit() {
        assert!(sphere_vertex_count(MAX_TESSELLATION) <= u32::MAX as usize);
        assert!(sphere_vertex_count(MAX_TESSELLATION + 1) > u32::MAX as usize);
    }

    #[test]
    fn bad_radius_is_rejected() {
        assert!(matches!(MeshData::sphere(0.0, 8), Err(MeshError::InvalidRadius(_))));
        assert!(matches!(MeshData::sphere(-1.0, 8), Err(MeshError::InvalidRadius(_))));
        assert!(matches!(MeshData::sphere(f32::NAN, 8), Err(MeshError::InvalidRadius(_))));
    }

    #[test]
    fn sphere_colors_are_normalized() {
        let mesh = MeshData::sphere(3.0, 6).unwrap();
        assert!(mesh.colors.iter().all(|c| (-1e-6..=1.0 + 1e-6).contains(c)));
    }

    // ── other shapes ──────────────────────────────────────────────────────

    #[test]
    fn cube_faces_outward() {
        let mesh = MeshData::cube(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        mesh.validate().unwrap();
        for (n, centroid) in faces(&mesh) {
            assert!(dot(n, centroid) > 0.0);
        }
    }

    #[test]
    fn triangle_faces_plus_z() {
        let mesh = MeshData::triangle();
        mesh.validate().unwrap();
        let (n, _) = faces(&mesh)[0];
        assert!(n[2] > 0.0);
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn validate_catches_mismatched_attributes() {
        let mut mesh = MeshData::triangle();
        mesh.colors.truncate(6);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::AttributeLengthMismatch { positions: 9, colors: 6 })
        );
    }

    #[test]
    fn validate_catches_out_of_range_index() {
        let mut mesh = MeshData::triangle();
        mesh.indices[2] = 3;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { index: 3, vertex_count: 3 })
        );
    }

    #[test]
    fn validate_rejects_empty() {
        assert_eq!(MeshData::default().validate(), Err(MeshError::Empty));
    }
}

//! The mesh (model) data model, grounded on
//! `examples/novacrazy-rust-softrender/src/mesh.rs` (vertex-with-attributes,
//! indexed mesh shape) and
//! `examples/original_source/source/software_renderer.cpp`'s `Model` struct
//! and `compute_vertex_normals` (world transform fields, per-vertex normal
//! averaging for meshes without authored normals).

use crate::error::{RenderError, RenderResult};
use crate::math::{cross, unit, V3};

/// A value-owning indexed triangle mesh with its world transform.
///
/// Invariant: every index is strictly less than `positions.len()`, and
/// `normals.len() == positions.len()`.
#[derive(Debug, Clone)]
pub struct Model {
    pub positions: Vec<V3>,
    pub normals: Vec<V3>,
    pub indices: Vec<u32>,

    pub position: V3,
    pub scale: V3,
    pub rotation_z: f32,
}

impl Model {
    /// Construct a mesh from positions, indices, and already-known normals.
    ///
    /// Returns `RenderError::MismatchedAttributeCount` if `normals` and
    /// `positions` differ in length, and `RenderError::IndexOutOfBounds` if
    /// any index doesn't address a position.
    pub fn new(positions: Vec<V3>, normals: Vec<V3>, indices: Vec<u32>) -> RenderResult<Model> {
        if normals.len() != positions.len() {
            return Err(RenderError::MismatchedAttributeCount(normals.len(), positions.len()));
        }

        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(RenderError::IndexOutOfBounds(bad, positions.len()));
        }

        Ok(Model {
            positions,
            normals,
            indices,
            position: V3::new(0.0, 0.0, 0.0),
            scale: V3::new(1.0, 1.0, 1.0),
            rotation_z: 0.0,
        })
    }

    /// Construct a mesh from positions and indices alone, deriving
    /// per-vertex normals as the normalized average of the face normals of
    /// every triangle incident to that vertex.
    ///
    /// Ports `compute_vertex_normals` from the original C++ source.
    pub fn with_computed_normals(positions: Vec<V3>, indices: Vec<u32>) -> RenderResult<Model> {
        let normals = compute_vertex_normals(&positions, &indices);
        Model::new(positions, normals, indices)
    }

    /// An empty mesh, used when asset loading fails.
    pub fn empty() -> Model {
        Model {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            position: V3::new(0.0, 0.0, 0.0),
            scale: V3::new(1.0, 1.0, 1.0),
            rotation_z: 0.0,
        }
    }

    /// The model's world transform: `translation * rotate_z * scale`.
    #[inline]
    pub fn world_matrix(&self) -> crate::math::M4 {
        crate::math::translation(self.position) * crate::math::rotation_z(self.rotation_z) * crate::math::scale(self.scale)
    }
}

fn compute_vertex_normals(positions: &[V3], indices: &[u32]) -> Vec<V3> {
    let mut sums = vec![V3::new(0.0, 0.0, 0.0); positions.len()];
    let mut counts = vec![0u32; positions.len()];

    for tri in indices.chunks(3) {
        if tri.len() != 3 {
            continue;
        }

        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (p0, p1, p2) = (positions[i0], positions[i1], positions[i2]);

        let face_normal = cross(p1 - p0, p2 - p0);
        if face_normal.dot(&face_normal) == 0.0 {
            continue;
        }
        let face_normal = unit(face_normal);

        sums[i0] += face_normal;
        sums[i1] += face_normal;
        sums[i2] += face_normal;
        counts[i0] += 1;
        counts[i1] += 1;
        counts[i2] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| if count > 0 { sum / count as f32 } else { V3::new(0.0, 0.0, 0.0) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<V3>, Vec<u32>) {
        (
            vec![
                V3::new(-1.0, -1.0, 0.0),
                V3::new(1.0, -1.0, 0.0),
                V3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn computed_normals_face_plus_z_for_ccw_triangle() {
        let (positions, indices) = triangle();
        let model = Model::with_computed_normals(positions, indices).unwrap();
        for n in &model.normals {
            assert!((n.z - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_out_of_bounds_index() {
        let (positions, _) = triangle();
        let err = Model::new(positions.clone(), vec![V3::new(0.0, 0.0, 1.0); 3], vec![0, 1, 5]);
        assert!(err.is_err());
    }

    #[test]
    fn world_matrix_composes_translation_rotation_scale() {
        let mut model = Model::with_computed_normals(vec![V3::new(1.0, 0.0, 0.0)], vec![]).unwrap();
        model.position = V3::new(2.0, 0.0, 0.0);
        model.scale = V3::new(3.0, 1.0, 1.0);

        let p = crate::math::V4::new(1.0, 0.0, 0.0, 1.0);
        let got = model.world_matrix() * p;
        assert!((got.x - 5.0).abs() < 1e-5);
    }
}

//! Minimal Wavefront OBJ loader and mesh normalization, grounded on
//! `examples/original_source/source/asset_loading.cpp`'s `load_obj` (the
//! token-at-a-time scan, fan triangulation of `f` lines) and
//! `normalize_mesh` (centroid/extent fit into `[-1, 1]`).

use std::fs;
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::math::V3;
use crate::mesh::Model;

/// Loads an OBJ file, keeping only `v` (position) and `f` (face) lines, and
/// triangulating n-gon faces as a fan starting at the face's first vertex.
///
/// Per `spec.md` §6, tokens are split on spaces, tabs, newlines, and `/`
/// (so `f 1/2/3 4/5/6 7/8/9` yields position indices `1 4 7`); only the
/// first slash-delimited field of each face vertex is read.
pub fn load_obj<P: AsRef<Path>>(path: P) -> RenderResult<Model> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RenderError::AssetLoad(path.display().to_string(), e.to_string()))?;

    let mut positions: Vec<V3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for line in text.lines() {
        let mut tokens = line.split(|c: char| c == ' ' || c == '\t' || c == '\r' || c == '/').filter(|t| !t.is_empty());

        match tokens.next() {
            Some("v") => {
                let x = next_f32(&mut tokens, path)?;
                let y = next_f32(&mut tokens, path)?;
                let z = next_f32(&mut tokens, path)?;
                positions.push(V3::new(x, y, z));
            }
            Some("f") => {
                let face: Vec<u32> = tokens.map(|t| t.parse::<i64>()).collect::<Result<_, _>>().map_err(|e| RenderError::AssetLoad(path.display().to_string(), e.to_string()))?;

                if face.len() < 3 {
                    return Err(RenderError::AssetLoad(path.display().to_string(), format!("face with {} vertices", face.len())));
                }

                // Fan triangulation: (i0, i_prev, i_new) for each vertex past the second.
                let i0 = to_index(face[0], positions.len(), path)?;
                let mut i_prev = to_index(face[1], positions.len(), path)?;
                for &raw in &face[2..] {
                    let i_new = to_index(raw, positions.len(), path)?;
                    indices.push(i0);
                    indices.push(i_prev);
                    indices.push(i_new);
                    i_prev = i_new;
                }
            }
            _ => {}
        }
    }

    Model::with_computed_normals(positions, indices)
}

fn next_f32<'a, I: Iterator<Item = &'a str>>(tokens: &mut I, path: &Path) -> RenderResult<f32> {
    tokens
        .next()
        .ok_or_else(|| RenderError::AssetLoad(path.display().to_string(), "truncated vertex line".to_string()))?
        .parse::<f32>()
        .map_err(|e| RenderError::AssetLoad(path.display().to_string(), e.to_string()))
}

/// OBJ face indices are 1-based, and negative indices count from the end of
/// the vertex list so far; this crate only needs the common positive case.
fn to_index(raw: i64, count: usize, path: &Path) -> RenderResult<u32> {
    if raw <= 0 || raw as usize > count {
        return Err(RenderError::AssetLoad(path.display().to_string(), format!("face index {} out of range for {} vertices", raw, count)));
    }
    Ok((raw - 1) as u32)
}

/// Recenters `positions` on their centroid and scales them uniformly so the
/// largest axis extent spans `[-1, 1]`.
///
/// Ports `normalize_mesh`, but uses the true maximum of all three axis
/// extents rather than the original's extent comparison, which never
/// actually folds the Z extent into the running maximum.
pub fn normalize_mesh(positions: &mut [V3]) {
    if positions.is_empty() {
        return;
    }

    let mut min = positions[0];
    let mut max = positions[0];
    for p in positions.iter() {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    let centroid = positions.iter().fold(V3::new(0.0, 0.0, 0.0), |acc, p| acc + p) / positions.len() as f32;

    let extent = max - min;
    let max_extent = extent.x.max(extent.y).max(extent.z);
    if max_extent == 0.0 {
        return;
    }

    for p in positions.iter_mut() {
        *p = (*p - centroid) / max_extent * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_triangle_and_quad_with_fan_triangulation() {
        let path = write_temp("cpu_raster_test_quad.obj", "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        let model = load_obj(&path).unwrap();
        assert_eq!(model.positions.len(), 4);
        assert_eq!(model.indices, vec![0, 1, 2, 0, 2, 3]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn slash_separated_face_tokens_use_only_position_index() {
        let path = write_temp("cpu_raster_test_slash.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 3/3/3\n");
        let model = load_obj(&path).unwrap();
        assert_eq!(model.indices, vec![0, 1, 2]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn normalize_centers_and_scales_to_unit_extent() {
        let mut positions = vec![V3::new(0.0, 0.0, 0.0), V3::new(4.0, 0.0, 0.0), V3::new(0.0, 2.0, 0.0)];
        normalize_mesh(&mut positions);

        let mut min = positions[0];
        let mut max = positions[0];
        for p in &positions {
            min.x = min.x.min(p.x);
            max.x = max.x.max(p.x);
        }
        assert!((max.x - min.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn missing_file_reports_asset_load_error() {
        let err = load_obj("/nonexistent/path/does_not_exist.obj");
        assert!(matches!(err, Err(RenderError::AssetLoad(_, _))));
    }
}

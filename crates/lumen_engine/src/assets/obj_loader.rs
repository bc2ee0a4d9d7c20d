//! OBJ file loader for 3D models
//!
//! Reads the face-indexed subset of Wavefront OBJ used by the renderer:
//! `v`, `vt` and `vn` records plus `f` records whose corners are full
//! `position/texcoord/normal` triplets. Every face corner becomes one
//! interleaved vertex; polygons are fan-triangulated.

use crate::assets::AssetError;
use crate::render::mesh::{MeshData, Vertex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Loader for face-indexed OBJ geometry
pub struct ObjLoader;

#[derive(Default)]
struct ObjRecords {
    positions: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl ObjLoader {
    /// Load an OBJ file into an interleaved vertex buffer
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshData, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AssetError::io(path, e))?;
        let mesh = Self::parse(BufReader::new(file)).map_err(|e| match e {
            AssetError::Io { source, .. } => AssetError::io(path, source),
            other => other,
        })?;

        log::debug!("Loaded {} vertices from {:?}", mesh.vertex_count(), path);
        Ok(mesh)
    }

    /// Parse OBJ records from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<MeshData, AssetError> {
        let mut records = ObjRecords::default();
        let mut vertices = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| AssetError::io("<obj stream>", e))?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            let Some(keyword) = words.next() else {
                continue;
            };
            let fields: Vec<&str> = words.collect();

            match keyword {
                "v" => records.positions.push(parse_floats(&fields, line_number, "vertex")?),
                "vt" => records.tex_coords.push(parse_floats(&fields, line_number, "texture coordinate")?),
                "vn" => records.normals.push(parse_floats(&fields, line_number, "normal")?),
                "f" => {
                    let corners = fields
                        .iter()
                        .map(|corner| records.resolve_corner(corner, line_number))
                        .collect::<Result<Vec<_>, _>>()?;

                    if corners.len() < 3 {
                        return Err(AssetError::Parse {
                            line: line_number,
                            message: format!("face has {} corners, need at least 3", corners.len()),
                        });
                    }

                    // Fan triangulation keeps triangles as-is
                    for i in 1..corners.len() - 1 {
                        vertices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {
                    // Ignore other commands (o, g, s, usemtl, ...)
                }
            }
        }

        if vertices.is_empty() {
            return Err(AssetError::InvalidFormat("No faces found in OBJ data".to_string()));
        }

        Ok(MeshData::from_vertices(vertices))
    }
}

impl ObjRecords {
    /// Expand one `v/vt/vn` corner into a full vertex
    fn resolve_corner(&self, corner: &str, line: usize) -> Result<Vertex, AssetError> {
        let parts: Vec<&str> = corner.split('/').collect();
        if parts.len() != 3 {
            return Err(AssetError::Parse {
                line,
                message: format!("face corner '{}' is not a v/vt/vn triplet", corner),
            });
        }

        Ok(Vertex {
            position: lookup(&self.positions, parts[0], line, "position")?,
            tex_coord: lookup(&self.tex_coords, parts[1], line, "texture coordinate")?,
            normal: lookup(&self.normals, parts[2], line, "normal")?,
        })
    }
}

fn parse_floats<const N: usize>(fields: &[&str], line: usize, what: &str) -> Result<[f32; N], AssetError> {
    if fields.len() < N {
        return Err(AssetError::Parse {
            line,
            message: format!("{} needs {} components, found {}", what, N, fields.len()),
        });
    }

    let mut values = [0.0; N];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse().map_err(|_| AssetError::Parse {
            line,
            message: format!("invalid {} component '{}'", what, field),
        })?;
    }
    Ok(values)
}

/// Resolve a 1-based OBJ index
fn lookup<T: Copy>(items: &[T], index: &str, line: usize, what: &str) -> Result<T, AssetError> {
    let parsed: usize = index.parse().map_err(|_| AssetError::Parse {
        line,
        message: format!("invalid {} index '{}'", what, index),
    })?;

    parsed
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .copied()
        .ok_or_else(|| AssetError::Parse {
            line,
            message: format!("{} index {} out of range (have {})", what, parsed, items.len()),
        })
}

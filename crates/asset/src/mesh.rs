//! CPU-side mesh representation produced by the loader.

use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use corelib::light::Material;

use crate::error::ValidationError;

/// Triangle index type. Meshes are limited to `MAX_INDEX + 1` addressable
/// vertices.
pub type Index = u16;

/// Largest vertex index a triangle may reference.
pub const MAX_INDEX: u32 = Index::MAX as u32;

/// Vertex with position/normal/uv/tangent in object space.
/// `tangent.w` is the bitangent handedness sign.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], tangent: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            uv,
            tangent,
        }
    }
}

/// Contiguous range of the index buffer drawn with one material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subset {
    pub id: u32,
    pub vertex_start: u32,
    pub vertex_count: u32,
    /// First index (not triangle) of the range.
    pub index_start: u32,
    pub index_count: u32,
}

impl Subset {
    /// Half-open index range `[index_start, index_start + index_count)`.
    pub fn index_range(&self) -> std::ops::Range<usize> {
        let start = self.index_start as usize;
        start..start + self.index_count as usize
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}

/// Material record as stored in the file: lighting parameters plus the
/// effect to draw with and optional texture maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshMaterial {
    pub mat: Material,
    pub alpha_clip: bool,
    pub effect: String,
    pub diffuse_map: Option<PathBuf>,
    pub normal_map: Option<PathBuf>,
}

impl MeshMaterial {
    pub fn diffuse_map(&self) -> Option<&Path> {
        self.diffuse_map.as_deref()
    }

    pub fn normal_map(&self) -> Option<&Path> {
        self.normal_map.as_deref()
    }
}

/// One subset together with the material it is drawn with.
#[derive(Clone, Copy, Debug)]
pub struct Submesh<'a> {
    pub subset: &'a Subset,
    pub material: &'a MeshMaterial,
}

/// Indexed triangle mesh split into material subsets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<Index>,
    pub subsets: Vec<Subset>,
    pub materials: Vec<MeshMaterial>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Subsets paired with their materials by position.
    pub fn submeshes(&self) -> impl Iterator<Item = Submesh<'_>> {
        self.subsets
            .iter()
            .zip(&self.materials)
            .map(|(subset, material)| Submesh { subset, material })
    }

    /// Indices belonging to one subset, if the range is in bounds.
    pub fn subset_indices(&self, subset: &Subset) -> Option<&[Index]> {
        self.indices.get(subset.index_range())
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Checks the invariants renderers rely on: one subset per material,
    /// whole triangles, every index addressing a vertex, and subsets tiling
    /// the index buffer in ascending order with no gaps or overlaps.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subsets.len() != self.materials.len() {
            return Err(ValidationError::SubsetMaterialMismatch {
                subsets: self.subsets.len(),
                materials: self.materials.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(ValidationError::RaggedIndices(self.indices.len()));
        }

        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(ValidationError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        let mut expected = 0usize;
        for (i, subset) in self.subsets.iter().enumerate() {
            let range = subset.index_range();
            if range.start != expected {
                return Err(ValidationError::SubsetGapOrOverlap {
                    subset: i,
                    start: range.start,
                    expected,
                });
            }
            expected = range.end;
        }
        if expected != self.indices.len() {
            return Err(ValidationError::SubsetCoverage {
                covered: expected,
                len: self.indices.len(),
            });
        }
        Ok(())
    }
}

//! Asset loading: `.m3d` text meshes with material subsets, and the
//! textures their materials reference.

pub mod error;
pub mod m3d;
pub mod mesh;
pub mod texture;

pub use error::{M3dError, M3dResult, Section, ValidationError};
pub use m3d::{load_m3d_from_path, load_m3d_from_reader, load_m3d_from_str};
pub use mesh::{MAX_INDEX, MeshData, MeshMaterial, Subset, Vertex};

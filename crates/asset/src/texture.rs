//! Texture loading for material maps referenced by a mesh.
//! Decodes PNG/JPEG/DDS into RGBA8.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};

use crate::mesh::MeshMaterial;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// RGBA8 texture; `data` must hold `width * height * 4` bytes.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            data.len() == expected,
            "RGBA8 {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Decode an image file; the format is picked from its contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading texture from {:?}", path);

        let rgba = image::ImageReader::open(path)
            .with_context(|| format!("Failed to open texture {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to probe texture format {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode texture {}", path.display()))?
            .to_rgba8();

        let (width, height) = rgba.dimensions();
        log::info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::new_rgba8(width, height, rgba.into_raw())
    }
}

/// Textures resolved for one material. `None` where the material has no map.
#[derive(Clone, Debug, Default)]
pub struct MaterialTextures {
    pub diffuse: Option<Arc<TextureData>>,
    pub normal: Option<Arc<TextureData>>,
}

/// Loads each distinct texture file once, keyed by resolved path.
#[derive(Debug, Default)]
pub struct TextureCache {
    loaded: HashMap<PathBuf, Arc<TextureData>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<TextureData>> {
        if let Some(tex) = self.loaded.get(path) {
            return Ok(Arc::clone(tex));
        }
        let tex = Arc::new(TextureData::load(path)?);
        self.loaded.insert(path.to_path_buf(), Arc::clone(&tex));
        Ok(tex)
    }

    /// Load the maps of every material, resolving relative names against
    /// `base_dir` (normally the directory of the mesh file).
    pub fn load_materials(
        &mut self,
        materials: &[MeshMaterial],
        base_dir: &Path,
    ) -> Result<Vec<MaterialTextures>> {
        let mut out = Vec::with_capacity(materials.len());
        for (i, mat) in materials.iter().enumerate() {
            let mut load = |name: Option<&Path>| -> Result<Option<Arc<TextureData>>> {
                name.map(|name| {
                    self.get_or_load(&base_dir.join(name))
                        .with_context(|| format!("Material #{i}"))
                })
                .transpose()
            };
            let diffuse = load(mat.diffuse_map())?;
            let normal = load(mat.normal_map())?;
            out.push(MaterialTextures { diffuse, normal });
        }
        Ok(out)
    }
}

/// One-shot helper over a fresh [`TextureCache`].
pub fn load_material_textures(
    materials: &[MeshMaterial],
    base_dir: impl AsRef<Path>,
) -> Result<Vec<MaterialTextures>> {
    TextureCache::new().load_materials(materials, base_dir.as_ref())
}

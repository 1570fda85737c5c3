//! meshinfo: load an `.m3d` mesh and log what it contains.
//! Usage: meshinfo [--mesh=]<path> [--validate[=on|off]] [--textures[=on|off]]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

fn parse_switch(name: &str) -> bool {
    // --name[=on|off], по умолчанию off
    let prefix = format!("--{name}=");
    for arg in std::env::args().skip(1) {
        if arg == format!("--{name}") {
            return true;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_mesh_arg() -> Option<PathBuf> {
    // Accept: --mesh=<path> or the first bare argument.
    let mut positional = None;
    for arg in std::env::args().skip(1) {
        if let Some(val) = arg.strip_prefix("--mesh=") {
            return Some(PathBuf::from(val));
        }
        if !arg.starts_with("--") && positional.is_none() {
            positional = Some(PathBuf::from(arg));
        }
    }
    positional
}

fn load_textures(mesh: &asset::MeshData, mesh_path: &Path) -> Result<()> {
    let base = mesh_path.parent().unwrap_or_else(|| Path::new("."));
    let mut cache = asset::texture::TextureCache::new();
    let textures = cache.load_materials(&mesh.materials, base)?;
    let bound = textures
        .iter()
        .map(|t| usize::from(t.diffuse.is_some()) + usize::from(t.normal.is_some()))
        .sum::<usize>();
    log::info!(
        "Textures: {} map references, {} distinct files",
        bound,
        cache.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = parse_mesh_arg() else {
        anyhow::bail!("usage: meshinfo [--mesh=]<file.m3d> [--validate] [--textures]");
    };
    let validate = parse_switch("validate");
    let textures = parse_switch("textures");
    log::info!(
        "Loading {} (validate={}, textures={})",
        path.display(),
        validate,
        textures
    );

    let mesh = asset::load_m3d_from_path(&path)
        .with_context(|| format!("Failed to load mesh {}", path.display()))?;

    for (i, sub) in mesh.submeshes().enumerate() {
        let mat = sub.material;
        log::info!(
            "Subset {} (id {}): {} triangles from index {}, effect '{}', alpha_clip={}, diffuse={}, normal={}",
            i,
            sub.subset.id,
            sub.subset.triangle_count(),
            sub.subset.index_start,
            mat.effect,
            mat.alpha_clip,
            mat.diffuse_map()
                .map_or_else(|| "-".to_owned(), |p| p.display().to_string()),
            mat.normal_map()
                .map_or_else(|| "-".to_owned(), |p| p.display().to_string()),
        );
    }
    log::info!(
        "{} vertices ({} bytes), {} indices ({} bytes)",
        mesh.vertices.len(),
        mesh.vertex_bytes().len(),
        mesh.indices.len(),
        mesh.index_bytes().len()
    );

    if validate {
        mesh.validate().context("Mesh failed validation")?;
        log::info!("Mesh invariants hold");
    }
    if textures {
        load_textures(&mesh, &path)?;
    }

    Ok(())
}

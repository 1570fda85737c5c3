//! Loader for `.m3d` text meshes: a count header followed by material,
//! subset, vertex and triangle sections, each sized by the header.
//!
//! ```text
//! #Materials 1
//! #Vertices 3
//! #Triangles 1
//!
//! #Materials
//! Ambient:    0.2 0.2 0.2
//! Diffuse:    0.8 0.8 0.8
//! Specular:   0.5 0.5 0.5 16
//! Reflective: 0 0 0
//! AlphaClip:  0
//! Effect:     Normal
//! DiffuseMap: stone.dds
//! NormalMap:  null
//!
//! #SubsetTable
//! 0 0 3 0 1
//!
//! #Vertices
//! 0 0 0  0 0 -1  0 1  1 0 0 1
//! 1 0 0  0 0 -1  1 1  1 0 0 1
//! 0 1 0  0 0 -1  0 0  1 0 0 1
//!
//! #Triangles
//! 0 1 2
//! ```
//!
//! Colour fields take an optional fourth channel. Subset face fields are
//! counted in triangles; the loaded [`Subset`] stores index offsets.

use std::{
    fs::File,
    io::{BufReader, Read},
    num::IntErrorKind,
    path::{Path, PathBuf},
};

use corelib::{Vec4, light::Material};

use crate::{
    error::{M3dError, M3dResult, Section},
    mesh::{Index, MAX_INDEX, MeshData, MeshMaterial, Subset, Vertex},
};

/// Texture token meaning "no map assigned".
pub const NO_TEXTURE: &str = "null";

const FLOATS_PER_VERTEX: usize = 12;
const TOKENS_PER_SUBSET: usize = 5;
const TOKENS_PER_MATERIAL: usize = 24;

/// Counts declared at the top of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct M3dHeader {
    pub material_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Load an M3D mesh from a file path.
pub fn load_m3d_from_path(path: impl AsRef<Path>) -> M3dResult<MeshData> {
    let path = path.as_ref();
    let file = File::open(path).inspect_err(|e| {
        log::debug!("Failed to open M3D file {}: {}", path.display(), e);
    })?;
    let mesh = load_m3d_from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded {}: {} vertices, {} triangles, {} subsets",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.subsets.len()
    );
    Ok(mesh)
}

/// Load an M3D mesh from any reader. The whole input is consumed.
pub fn load_m3d_from_reader<R: Read>(mut reader: R) -> M3dResult<MeshData> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_m3d(&contents)
}

/// Convenience helper to parse M3D text held in memory.
pub fn load_m3d_from_str(contents: &str) -> M3dResult<MeshData> {
    parse_m3d(contents)
}

fn parse_m3d(contents: &str) -> M3dResult<MeshData> {
    let mut tokens = TokenStream::new(contents);

    let header = read_header(&mut tokens)?;
    log::debug!("M3D header: {:?}", header);

    let materials = read_materials(&mut tokens, header.material_count)?;
    log::debug!("Read {} materials", materials.len());

    let subsets = read_subset_table(&mut tokens, header.material_count)?;
    log::debug!("Read {} subsets", subsets.len());

    if subsets.len() != materials.len() {
        return Err(M3dError::MalformedHeader {
            line: tokens.line(),
            reason: format!(
                "{} subsets do not pair with {} materials",
                subsets.len(),
                materials.len()
            ),
        });
    }

    let vertices = read_vertices(&mut tokens, header.vertex_count)?;
    log::debug!("Read {} vertices", vertices.len());

    let indices = read_triangles(&mut tokens, header.triangle_count, vertices.len())?;
    log::debug!("Read {} triangles", indices.len() / 3);

    if let Some(extra) = tokens.peek() {
        log::warn!(
            "Ignoring {} trailing tokens starting on line {} ('{}')",
            tokens.remaining(),
            extra.line,
            extra.text
        );
    }

    Ok(MeshData {
        vertices,
        indices,
        subsets,
        materials,
    })
}

fn read_header(tokens: &mut TokenStream<'_>) -> M3dResult<M3dHeader> {
    let mut r = RecordReader::new(tokens, Section::Header, 0);
    r.label("#Materials")?;
    let material_count = r.count("material count")?;
    r.label("#Vertices")?;
    let vertex_count = r.count("vertex count")?;
    r.label("#Triangles")?;
    let triangle_count = r.count("triangle count")?;
    Ok(M3dHeader {
        material_count,
        vertex_count,
        triangle_count,
    })
}

fn read_materials(tokens: &mut TokenStream<'_>, count: usize) -> M3dResult<Vec<MeshMaterial>> {
    RecordReader::new(tokens, Section::Materials, 0).label("#Materials")?;

    let mut mats = Vec::with_capacity(count.min(tokens.remaining() / TOKENS_PER_MATERIAL));
    for record in 0..count {
        let mut r = RecordReader::new(tokens, Section::Materials, record);

        r.label("Ambient:")?;
        let ambient = r.color("ambient")?;
        r.label("Diffuse:")?;
        let diffuse = r.color("diffuse")?;
        r.label("Specular:")?;
        let [sr, sg, sb, power] = r.floats::<4>("specular colour and power")?;
        r.label("Reflective:")?;
        let reflect = r.color("reflective")?;
        r.label("AlphaClip:")?;
        let alpha_clip = r.flag("alpha clip flag")?;
        r.label("Effect:")?;
        let effect = r.token("effect name")?.text.to_owned();
        r.label("DiffuseMap:")?;
        let diffuse_map = r.texture("diffuse map")?;
        r.label("NormalMap:")?;
        let normal_map = r.texture("normal map")?;

        mats.push(MeshMaterial {
            mat: Material::new(ambient, diffuse, Vec4::new(sr, sg, sb, power), reflect),
            alpha_clip,
            effect,
            diffuse_map,
            normal_map,
        });
    }
    Ok(mats)
}

fn read_subset_table(tokens: &mut TokenStream<'_>, count: usize) -> M3dResult<Vec<Subset>> {
    RecordReader::new(tokens, Section::SubsetTable, 0).label("#SubsetTable")?;

    let mut subsets = Vec::with_capacity(count.min(tokens.remaining() / TOKENS_PER_SUBSET));
    for record in 0..count {
        let mut r = RecordReader::new(tokens, Section::SubsetTable, record);
        let id = r.uint("subset id")?;
        let vertex_start = r.uint("vertex start")?;
        let vertex_count = r.uint("vertex count")?;
        let face_start = r.uint("face start")?;
        let face_count = r.uint("face count")?;

        let line = r.line();
        let to_indices = |faces: u32| {
            faces.checked_mul(3).ok_or_else(|| {
                r.malformed(line, format!("face value {faces} overflows the index range"))
            })
        };
        subsets.push(Subset {
            id,
            vertex_start,
            vertex_count,
            index_start: to_indices(face_start)?,
            index_count: to_indices(face_count)?,
        });
    }
    Ok(subsets)
}

fn read_vertices(tokens: &mut TokenStream<'_>, count: usize) -> M3dResult<Vec<Vertex>> {
    RecordReader::new(tokens, Section::Vertices, 0).label("#Vertices")?;

    let mut vertices = Vec::with_capacity(count.min(tokens.remaining() / FLOATS_PER_VERTEX));
    for record in 0..count {
        let mut r = RecordReader::new(tokens, Section::Vertices, record);
        let position = r.floats::<3>("position")?;
        let normal = r.floats::<3>("normal")?;
        let uv = r.floats::<2>("texture coordinate")?;
        let tangent = r.floats::<4>("tangent")?;
        vertices.push(Vertex::new(position, normal, uv, tangent));
    }
    Ok(vertices)
}

fn read_triangles(
    tokens: &mut TokenStream<'_>,
    count: usize,
    vertex_count: usize,
) -> M3dResult<Vec<Index>> {
    RecordReader::new(tokens, Section::Triangles, 0).label("#Triangles")?;

    let mut indices = Vec::with_capacity(count.saturating_mul(3).min(tokens.remaining()));
    for triangle in 0..count {
        let mut r = RecordReader::new(tokens, Section::Triangles, triangle);
        for _ in 0..3 {
            let token = r.token("vertex index")?;
            r.unsigned_text(token, "vertex index")?;
            let value = match token.text.parse::<u32>() {
                Ok(value) => Some(value),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => None,
                Err(e) => {
                    return Err(r.malformed(
                        token.line,
                        format!("invalid vertex index '{}': {}", token.text, e),
                    ));
                }
            };
            let Some(index) = value.filter(|&v| v <= MAX_INDEX).map(|v| v as Index) else {
                return Err(M3dError::IndexOverflow {
                    triangle,
                    line: token.line,
                    value: token.text.to_owned(),
                });
            };
            if index as usize >= vertex_count {
                return Err(M3dError::IndexOutOfRange {
                    triangle,
                    line: token.line,
                    index,
                    vertex_count,
                });
            }
            indices.push(index);
        }
    }
    Ok(indices)
}

fn is_unsigned_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone, Copy, Debug)]
struct Token<'a> {
    line: usize,
    text: &'a str,
}

/// Whitespace-separated tokens tagged with their 1-based line.
struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    fn new(contents: &'a str) -> Self {
        let tokens = contents
            .lines()
            .enumerate()
            .flat_map(|(n, line)| {
                line.split_whitespace()
                    .map(move |text| Token { line: n + 1, text })
            })
            .collect();
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    /// Line of the most recently consumed token.
    fn line(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |t| t.line)
    }
}

/// Field reader for a single record. Errors carry the section and record.
struct RecordReader<'s, 'a> {
    tokens: &'s mut TokenStream<'a>,
    section: Section,
    record: usize,
}

impl<'s, 'a> RecordReader<'s, 'a> {
    fn new(tokens: &'s mut TokenStream<'a>, section: Section, record: usize) -> Self {
        Self {
            tokens,
            section,
            record,
        }
    }

    fn line(&self) -> usize {
        self.tokens.line()
    }

    fn malformed(&self, line: usize, reason: String) -> M3dError {
        match self.section {
            Section::Header => M3dError::MalformedHeader { line, reason },
            section => M3dError::MalformedRecord {
                section,
                record: self.record,
                line,
                reason,
            },
        }
    }

    fn token(&mut self, expected: &'static str) -> M3dResult<Token<'a>> {
        match self.tokens.next() {
            Some(token) => Ok(token),
            // A short header is malformed rather than truncated: nothing
            // has been sized by it yet.
            None if self.section == Section::Header => Err(M3dError::MalformedHeader {
                line: self.line(),
                reason: format!("missing {expected}"),
            }),
            None => Err(M3dError::PrematureEnd {
                section: self.section,
                record: self.record,
                expected,
            }),
        }
    }

    fn label(&mut self, label: &'static str) -> M3dResult<()> {
        let token = self.token(label)?;
        if token.text != label {
            return Err(self.malformed(
                token.line,
                format!("expected '{}', found '{}'", label, token.text),
            ));
        }
        Ok(())
    }

    fn count(&mut self, what: &'static str) -> M3dResult<usize> {
        let token = self.token(what)?;
        if token.text.starts_with('-') {
            return Err(self.malformed(
                token.line,
                format!("{} must not be negative, found '{}'", what, token.text),
            ));
        }
        self.unsigned_text(token, what)?;
        token.text.parse::<usize>().map_err(|e| {
            self.malformed(token.line, format!("invalid {} '{}': {}", what, token.text, e))
        })
    }

    fn uint(&mut self, what: &'static str) -> M3dResult<u32> {
        let token = self.token(what)?;
        self.unsigned_text(token, what)?;
        token.text.parse::<u32>().map_err(|e| {
            self.malformed(token.line, format!("invalid {} '{}': {}", what, token.text, e))
        })
    }

    /// Plain decimal digits only; signs are not part of the grammar.
    fn unsigned_text(&self, token: Token<'a>, what: &'static str) -> M3dResult<()> {
        if is_unsigned_decimal(token.text) {
            Ok(())
        } else {
            Err(self.malformed(
                token.line,
                format!("invalid {} '{}': expected decimal digits", what, token.text),
            ))
        }
    }

    fn float(&mut self, what: &'static str) -> M3dResult<f32> {
        let token = self.token(what)?;
        match token.text.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(self.malformed(
                token.line,
                format!("{} '{}' is not a finite number", what, token.text),
            )),
            Err(e) => Err(self.malformed(
                token.line,
                format!("invalid {} '{}': {}", what, token.text, e),
            )),
        }
    }

    fn floats<const N: usize>(&mut self, what: &'static str) -> M3dResult<[f32; N]> {
        let mut out = [0.0; N];
        for v in &mut out {
            *v = self.float(what)?;
        }
        Ok(out)
    }

    /// RGB with an optional alpha; alpha defaults to 1.
    fn color(&mut self, what: &'static str) -> M3dResult<Vec4> {
        let [r, g, b] = self.floats::<3>(what)?;
        let a = match self.tokens.peek().map(|t| t.text.parse::<f32>()) {
            Some(Ok(a)) if a.is_finite() => {
                self.tokens.next();
                a
            }
            _ => 1.0,
        };
        Ok(Vec4::new(r, g, b, a))
    }

    fn flag(&mut self, what: &'static str) -> M3dResult<bool> {
        let token = self.token(what)?;
        match token.text {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(self.malformed(
                token.line,
                format!("invalid {what} '{other}', expected 0 or 1"),
            )),
        }
    }

    fn texture(&mut self, what: &'static str) -> M3dResult<Option<PathBuf>> {
        let token = self.token(what)?;
        Ok((token.text != NO_TEXTURE).then(|| PathBuf::from(token.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = r#"
        #Materials 2
        #Vertices 4
        #Triangles 2

        #Materials
        Ambient:    0.2 0.2 0.2
        Diffuse:    0.8 0.8 0.8 0.5
        Specular:   0.4 0.4 0.4 16
        Reflective: 0 0 0
        AlphaClip:  1
        Effect:     Normal
        DiffuseMap: bricks.dds
        NormalMap:  bricks_nmap.dds

        Ambient:    0.1 0.1 0.1
        Diffuse:    1 1 1
        Specular:   0 0 0 1
        Reflective: 0.3 0.3 0.3
        AlphaClip:  false
        Effect:     Basic
        DiffuseMap: null
        NormalMap:  null

        #SubsetTable
        0 0 3 0 1
        1 0 4 1 1

        #Vertices
        -1 -1 0  0 0 -1  0 1  1 0 0 1
        -1  1 0  0 0 -1  0 0  1 0 0 1
         1  1 0  0 0 -1  1 0  1 0 0 1
         1 -1 0  0 0 -1  1 1  1 0 0 -1

        #Triangles
        0 1 2
        0 2 3
    "#;

    fn with_triangles(triangles: &str) -> String {
        let (head, _) = QUAD.rsplit_once("#Triangles").expect("triangle section");
        format!("{head}#Triangles\n{triangles}")
    }

    #[test]
    fn parse_two_material_quad() {
        let mesh = load_m3d_from_str(QUAD).expect("parse quad");
        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(mesh.subsets.len(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.validate(), Ok(()));

        let first = &mesh.materials[0];
        assert!(first.alpha_clip);
        assert_eq!(first.effect, "Normal");
        assert_eq!(first.mat.alpha(), 0.5);
        assert_eq!(first.mat.specular_power(), 16.0);
        assert_eq!(first.diffuse_map(), Some(Path::new("bricks.dds")));
        assert_eq!(first.normal_map(), Some(Path::new("bricks_nmap.dds")));

        assert_eq!(mesh.subsets[1].index_range(), 3..6);
        assert_eq!(mesh.vertices[3].tangent, [1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn null_texture_token_means_no_map() {
        let mesh = load_m3d_from_str(QUAD).expect("parse quad");
        let second = &mesh.materials[1];
        assert!(!second.alpha_clip);
        assert_eq!(second.diffuse_map, None);
        assert_eq!(second.normal_map, None);
        assert_eq!(second.mat.diffuse.w, 1.0);
        assert!(second.mat.is_reflective());
    }

    #[test]
    fn index_overflow_is_not_truncated() {
        let src = with_triangles("0 1 2\n0 70000 3\n");
        match load_m3d_from_str(&src) {
            Err(M3dError::IndexOverflow {
                triangle, value, ..
            }) => {
                assert_eq!(triangle, 1);
                assert_eq!(value, "70000");
            }
            other => panic!("expected IndexOverflow, got {other:?}"),
        }
    }

    #[test]
    fn index_past_vertex_count_is_rejected() {
        let src = with_triangles("0 1 2\n0 2 4\n");
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::IndexOutOfRange {
                triangle: 1,
                index: 4,
                vertex_count: 4,
                ..
            })
        ));
    }

    #[test]
    fn negative_index_is_malformed() {
        let src = with_triangles("0 1 2\n0 -2 3\n");
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::Triangles,
                record: 1,
                ..
            })
        ));
    }

    #[test]
    fn missing_triangle_is_premature_end() {
        let src = with_triangles("0 1 2\n");
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::PrematureEnd {
                section: Section::Triangles,
                record: 1,
                ..
            })
        ));
    }

    #[test]
    fn negative_header_count_is_malformed_header() {
        let src = QUAD.replacen("#Vertices 4", "#Vertices -4", 1);
        match load_m3d_from_str(&src) {
            Err(M3dError::MalformedHeader { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("negative"), "{reason}");
            }
            other => panic!("expected MalformedHeader, got {other:?}"),
        }
    }

    #[test]
    fn truncated_header_is_malformed_header() {
        assert!(matches!(
            load_m3d_from_str("#Materials 1\n#Vertices"),
            Err(M3dError::MalformedHeader { .. })
        ));
        assert!(matches!(
            load_m3d_from_str("#Materials one"),
            Err(M3dError::MalformedHeader { line: 1, .. })
        ));
    }

    #[test]
    fn bad_material_field_names_the_record() {
        let src = QUAD.replacen("Specular:   0 0 0 1", "Specular:   0 0 zero 1", 1);
        match load_m3d_from_str(&src) {
            Err(M3dError::MalformedRecord {
                section,
                record,
                line,
                ..
            }) => {
                assert_eq!(section, Section::Materials);
                assert_eq!(record, 1);
                assert_eq!(line, 18);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn wrong_section_label_is_malformed() {
        let src = QUAD.replacen("#SubsetTable", "#Subsets", 1);
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::SubsetTable,
                ..
            })
        ));
    }

    #[test]
    fn bad_alpha_clip_flag_is_malformed() {
        let src = QUAD.replacen("AlphaClip:  1", "AlphaClip:  2", 1);
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::Materials,
                record: 0,
                ..
            })
        ));
    }

    #[test]
    fn index_limit_is_max_index() {
        let src = with_triangles("0 1 2\n0 65535 3\n");
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::IndexOutOfRange { index: 65535, .. })
        ));
        for value in ["65536", "99999999999"] {
            let src = with_triangles(&format!("0 1 2\n0 {value} 3\n"));
            assert!(
                matches!(load_m3d_from_str(&src), Err(M3dError::IndexOverflow { triangle: 1, .. })),
                "{value}"
            );
        }
    }

    #[test]
    fn signed_index_is_malformed() {
        let src = with_triangles("0 1 2\n0 +2 3\n");
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::Triangles,
                record: 1,
                ..
            })
        ));
    }

    #[test]
    fn plus_signed_count_is_malformed_header() {
        let src = QUAD.replacen("#Vertices 4", "#Vertices +4", 1);
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedHeader { line: 3, .. })
        ));
    }

    #[test]
    fn bad_vertex_field_is_malformed() {
        let src = QUAD.replacen("-1  1 0  0 0 -1  0 0", "-1  x 0  0 0 -1  0 0", 1);
        match load_m3d_from_str(&src) {
            Err(M3dError::MalformedRecord {
                section,
                record,
                line,
                ..
            }) => {
                assert_eq!(section, Section::Vertices);
                assert_eq!(record, 1);
                assert_eq!(line, 31);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_vertex_field_is_malformed() {
        let src = QUAD.replacen("-1  1 0  0 0 -1  0 0", "NaN inf 0  0 0 -1  0 0", 1);
        match load_m3d_from_str(&src) {
            Err(M3dError::MalformedRecord {
                section,
                record,
                line,
                reason,
            }) => {
                assert_eq!(section, Section::Vertices);
                assert_eq!(record, 1);
                assert_eq!(line, 31);
                assert!(reason.contains("finite"), "{reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_colour_is_malformed() {
        let src = QUAD.replacen("Diffuse:    1 1 1", "Diffuse:    1 inf 1", 1);
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::Materials,
                record: 1,
                line: 17,
                ..
            })
        ));
    }

    #[test]
    fn bad_subset_field_is_malformed() {
        let src = QUAD.replacen("1 0 4 1 1", "1 0 4 zero 1", 1);
        assert!(matches!(
            load_m3d_from_str(&src),
            Err(M3dError::MalformedRecord {
                section: Section::SubsetTable,
                record: 1,
                line: 27,
                ..
            })
        ));
    }

    #[test]
    fn subset_face_overflow_is_malformed() {
        let src = QUAD.replacen("1 0 4 1 1", "1 0 4 2000000000 1", 1);
        match load_m3d_from_str(&src) {
            Err(M3dError::MalformedRecord {
                section, reason, ..
            }) => {
                assert_eq!(section, Section::SubsetTable);
                assert!(reason.contains("overflows"), "{reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn empty_mesh_is_accepted() {
        let src = "#Materials 0 #Vertices 0 #Triangles 0\n#Materials #SubsetTable #Vertices #Triangles";
        let mesh = load_m3d_from_str(src).expect("parse empty mesh");
        assert_eq!(mesh, MeshData::default());
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn huge_counts_fail_without_allocating() {
        let src = "#Materials 0 #Vertices 4000000000 #Triangles 0\n#Materials #SubsetTable #Vertices 0 0 0";
        assert!(matches!(
            load_m3d_from_str(src),
            Err(M3dError::PrematureEnd {
                section: Section::Vertices,
                record: 0,
                ..
            })
        ));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let src = format!("{QUAD}\n#Bones 0\n");
        let mesh = load_m3d_from_str(&src).expect("parse with trailer");
        assert_eq!(mesh, load_m3d_from_str(QUAD).expect("parse quad"));
    }

    #[test]
    fn reader_and_str_agree() {
        let from_reader = load_m3d_from_reader(QUAD.as_bytes()).expect("parse reader");
        assert_eq!(from_reader, load_m3d_from_str(QUAD).expect("parse str"));
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let bytes: &[u8] = &[b'#', 0xff, 0xfe];
        assert!(matches!(
            load_m3d_from_reader(bytes),
            Err(M3dError::Io(_))
        ));
    }
}

//! Typed failures for the M3D loader.

use std::{fmt, io};

use thiserror::Error;

/// Section of an M3D file, in the order the loader visits them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Section {
    Header,
    Materials,
    SubsetTable,
    Vertices,
    Triangles,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Materials => "materials",
            Section::SubsetTable => "subset table",
            Section::Vertices => "vertices",
            Section::Triangles => "triangles",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum M3dError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed header on line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("Malformed {section} record #{record} on line {line}: {reason}")]
    MalformedRecord {
        section: Section,
        record: usize,
        line: usize,
        reason: String,
    },

    #[error("Unexpected end of file in {section} section (record #{record}): expected {expected}")]
    PrematureEnd {
        section: Section,
        record: usize,
        expected: &'static str,
    },

    #[error("Triangle #{triangle} on line {line}: index {value} exceeds the 16-bit limit")]
    IndexOverflow {
        triangle: usize,
        line: usize,
        value: String,
    },

    #[error("Triangle #{triangle} on line {line}: index {index} out of range (vertex count {vertex_count})")]
    IndexOutOfRange {
        triangle: usize,
        line: usize,
        index: u16,
        vertex_count: usize,
    },
}

pub type M3dResult<T> = Result<T, M3dError>;

/// Invariant violations found by [`crate::mesh::MeshData::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{subsets} subsets but {materials} materials")]
    SubsetMaterialMismatch { subsets: usize, materials: usize },

    #[error("index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),

    #[error("index {index} at position {position} >= vertex count {vertex_count}")]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },

    #[error("subset {subset} starts at {start}, expected {expected}")]
    SubsetGapOrOverlap {
        subset: usize,
        start: usize,
        expected: usize,
    },

    #[error("subsets cover {covered} indices, index buffer has {len}")]
    SubsetCoverage { covered: usize, len: usize },
}

//! Error type shared by the loaders.

use std::{fmt, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssetError>;

/// Which per-corner reference was out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    TextureCoords,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Vertex => f.write_str("vertex"),
            IndexKind::TextureCoords => f.write_str("texture coordinate"),
        }
    }
}

/// Location of the first line the grammar could not consume.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {reason} in '{text}'")]
pub struct GrammarError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the first unconsumed character.
    pub column: usize,
    pub text: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Can't read from file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Grammar mismatch at {0}")]
    Grammar(GrammarError),

    #[error("In material library {}", path.display())]
    Material {
        path: PathBuf,
        #[source]
        source: Box<AssetError>,
    },

    #[error(
        "Malformed mesh: face {face} corner {corner} references out-of-range {kind} index {index} ({len} available)"
    )]
    IndexOutOfRange {
        face: usize,
        corner: usize,
        kind: IndexKind,
        index: u32,
        len: usize,
    },

    #[error("Unable to load image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Import of '{format}' data failed: {message}")]
    Import { format: String, message: String },

    #[error("Too many vertices in mesh (>{})", u32::MAX)]
    TooManyVertices,
}

impl From<GrammarError> for AssetError {
    fn from(err: GrammarError) -> Self {
        AssetError::Grammar(err)
    }
}

//! Asset loading: OBJ/MTL parsing, mesh flattening, textures.
//!
//! The pipeline is `ResourceResolver` bytes -> [`obj::ObjParser`] (which
//! follows `mtllib` into [`mtl::parse_material`]) -> [`assemble::assemble`]
//! -> [`ModelData`] ready for upload. [`loader::ModelLoader`] runs all of it.

pub mod assemble;
pub mod error;
pub mod grammar;
pub mod import;
pub mod loader;
pub mod mtl;
pub mod obj;
pub mod options;
pub mod primitives;
pub mod resolver;
pub mod texture;

pub use assemble::ModelData;
pub use error::{AssetError, GrammarError, IndexKind, Result};
pub use import::MeshImporter;
#[cfg(feature = "assimp")]
pub use import::AssimpImporter;
pub use loader::{LoadRequest, LoaderKind, ModelLoader};
pub use options::{LoadOptions, ParsePolicy, Parsed};
pub use resolver::{FsResolver, MemoryResolver, ResourceResolver};
pub use texture::{ImageTextureSource, TextureData, TextureSource};

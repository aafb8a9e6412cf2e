//! One-call model loading: read, parse, assemble, resolve the texture.

use std::{path::Path, time::Instant};

use crate::{
    assemble::{ModelData, assemble},
    error::Result,
    import::MeshImporter,
    obj::ObjParser,
    options::LoadOptions,
    resolver::ResourceResolver,
    texture::{TextureData, TextureSource},
};

/// Which loader reads a model file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderKind {
    /// Built-in OBJ/MTL parser. Texture comes from the material's `map_Kd`.
    Obj,
    /// General-purpose importer for `format` data, texture supplied separately.
    Importer { format: String, texture_path: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: String,
    pub kind: LoaderKind,
}

impl LoadRequest {
    pub fn obj(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: LoaderKind::Obj,
        }
    }

    pub fn importer(
        path: impl Into<String>,
        format: impl Into<String>,
        texture_path: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: LoaderKind::Importer {
                format: format.into(),
                texture_path: texture_path.into(),
            },
        }
    }
}

pub struct ModelLoader<'a> {
    resolver: &'a dyn ResourceResolver,
    textures: &'a dyn TextureSource,
    importer: Option<&'a dyn MeshImporter>,
    options: LoadOptions,
}

impl<'a> ModelLoader<'a> {
    pub fn new(resolver: &'a dyn ResourceResolver, textures: &'a dyn TextureSource) -> Self {
        Self {
            resolver,
            textures,
            importer: None,
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_importer(mut self, importer: &'a dyn MeshImporter) -> Self {
        self.importer = Some(importer);
        self
    }

    pub fn load(&self, request: &LoadRequest) -> Result<ModelData> {
        match &request.kind {
            LoaderKind::Obj => self.load_obj(&request.path),
            LoaderKind::Importer {
                format,
                texture_path,
            } => {
                let importer = self.importer.ok_or_else(|| crate::AssetError::Import {
                    format: format.clone(),
                    message: "no general-purpose importer is available".to_owned(),
                })?;
                self.load_with_importer(importer, &request.path, format, texture_path)
            }
        }
    }

    pub fn load_obj(&self, path: &str) -> Result<ModelData> {
        let bytes = self.resolver.read_bytes(Path::new(path))?;
        let start = Instant::now();
        let obj = ObjParser::new(self.resolver)
            .material_policy(self.options.policy)
            .parse(&bytes)?
            .into_result(self.options.policy, path)?;
        log::info!(
            "Parsing both OBJ and MTL files took {:.3} ms ({} points, {} uvs, {} faces)",
            start.elapsed().as_secs_f64() * 1e3,
            obj.points.len(),
            obj.uvs.len(),
            obj.faces.len()
        );
        assemble(&obj, self.textures, self.options.flip_textures)
    }

    pub fn load_with_importer(
        &self,
        importer: &dyn MeshImporter,
        path: &str,
        format: &str,
        texture_path: &str,
    ) -> Result<ModelData> {
        let bytes = self.resolver.read_bytes(Path::new(path))?;
        let start = Instant::now();
        let (vertices, elements) = importer.import(&bytes, format)?;
        log::info!(
            "Importing {} as '{}' took {:.3} ms",
            path,
            format,
            start.elapsed().as_secs_f64() * 1e3
        );
        let texture = if texture_path.is_empty() {
            TextureData::empty()
        } else {
            self.textures.load_texture(texture_path, self.options.flip_textures)?
        };
        Ok(ModelData::new(vertices, elements, texture))
    }
}

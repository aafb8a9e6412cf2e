//! OBJ mesh parser: positions, texture coordinates, triangular faces and a
//! single `mtllib` material.

use std::path::Path;

use crate::{
    error::{AssetError, Result},
    grammar::{ObjDirective, for_each_line, obj_line},
    mtl::parse_material,
    options::{ParsePolicy, Parsed},
    primitives::{Color, Face, Point, TextureCoords},
    resolver::ResourceResolver,
};

/// Indexed mesh as written in the file, before flattening.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjData {
    pub points: Vec<Point>,
    pub uvs: Vec<TextureCoords>,
    pub faces: Vec<Face>,
    /// Diffuse color of the referenced material, white without one.
    pub color: Color,
    /// `map_Kd` path of the referenced material, empty without one.
    pub texture_path: String,
}

/// Mesh parser. `mtllib` references are read through `resolver` while parsing.
pub struct ObjParser<'r> {
    resolver: &'r dyn ResourceResolver,
    material_policy: ParsePolicy,
}

impl<'r> ObjParser<'r> {
    pub fn new(resolver: &'r dyn ResourceResolver) -> Self {
        Self {
            resolver,
            material_policy: ParsePolicy::FailFast,
        }
    }

    /// Policy applied to grammar mismatches inside referenced material libraries.
    pub fn material_policy(mut self, policy: ParsePolicy) -> Self {
        self.material_policy = policy;
        self
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Parsed<ObjData>> {
        let mut data = ObjData::default();
        let mismatch = for_each_line(bytes, obj_line, |directive| {
            match directive {
                ObjDirective::MaterialLib(path) => {
                    log::debug!("mtllib {path}");
                    self.load_material(&path, &mut data)?;
                }
                ObjDirective::Vertex(p) => data.points.push(p),
                ObjDirective::TextureCoords(uv) => data.uvs.push(uv),
                ObjDirective::Face(face) => data.faces.push(face),
                ObjDirective::Skip => {}
            }
            Ok(())
        })?;
        Ok(Parsed {
            value: data,
            mismatch,
        })
    }

    fn load_material(&self, path: &str, data: &mut ObjData) -> Result<()> {
        let path = Path::new(path);
        let bytes = self.resolver.read_bytes(path)?;
        let material = parse_material(&bytes)?
            .into_result(self.material_policy, &path.display().to_string())
            .map_err(|err| AssetError::Material {
                path: path.to_path_buf(),
                source: Box::new(err),
            })?;
        data.color = material.diffuse;
        data.texture_path = material.texture_path;
        Ok(())
    }
}

/// Parse `bytes` with a parser that applies `policy` to nested material libraries.
pub fn parse_obj(
    bytes: &[u8],
    resolver: &dyn ResourceResolver,
    policy: ParsePolicy,
) -> Result<Parsed<ObjData>> {
    ObjParser::new(resolver).material_policy(policy).parse(bytes)
}

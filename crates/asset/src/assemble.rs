//! Flattening parsed meshes into GPU-ready arrays.

use crate::{
    error::{AssetError, IndexKind, Result},
    obj::ObjData,
    primitives::{RenderElement, RenderVertex},
    texture::{TextureData, TextureSource},
};

/// Renderable model: flat vertices, triangles indexing them, and the diffuse texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<RenderVertex>,
    pub elements: Vec<RenderElement>,
    pub texture: TextureData,
}

impl ModelData {
    pub fn new(vertices: Vec<RenderVertex>, elements: Vec<RenderElement>, texture: TextureData) -> Self {
        Self {
            vertices,
            elements,
            texture,
        }
    }

    /// Number of indices an indexed draw call consumes.
    pub fn index_count(&self) -> usize {
        self.elements.len() * 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn element_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.elements)
    }

    /// Returns `true` if both vertex and element buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.elements.is_empty()
    }
}

/// Flatten `obj` into one vertex per face corner.
///
/// Vertices are never shared between faces: element `i` always refers to
/// vertices `3i + 2`, `3i + 1` and `3i`.
pub fn flatten(obj: &ObjData) -> Result<(Vec<RenderVertex>, Vec<RenderElement>)> {
    let mut vertices = Vec::with_capacity(obj.faces.len().saturating_mul(3));
    let mut elements = Vec::with_capacity(obj.faces.len());

    for (face_idx, face) in obj.faces.iter().enumerate() {
        let mut corners = [RenderVertex::default(); 3];
        for (corner_idx, (slot, corner)) in corners.iter_mut().zip(&face.corners).enumerate() {
            let point = obj.points.get(corner.vertex_id as usize).copied().ok_or(
                AssetError::IndexOutOfRange {
                    face: face_idx,
                    corner: corner_idx,
                    kind: IndexKind::Vertex,
                    index: corner.vertex_id,
                    len: obj.points.len(),
                },
            )?;
            let uv = obj.uvs.get(corner.uv_id as usize).copied().ok_or(
                AssetError::IndexOutOfRange {
                    face: face_idx,
                    corner: corner_idx,
                    kind: IndexKind::TextureCoords,
                    index: corner.uv_id,
                    len: obj.uvs.len(),
                },
            )?;
            *slot = RenderVertex::from_parts(point, obj.color, uv);
        }
        push_triangle(&mut vertices, &mut elements, corners)?;
    }

    Ok((vertices, elements))
}

/// Append one triangle as three fresh vertices and the element indexing them,
/// last appended vertex first.
pub(crate) fn push_triangle(
    vertices: &mut Vec<RenderVertex>,
    elements: &mut Vec<RenderElement>,
    corners: [RenderVertex; 3],
) -> Result<()> {
    let base = u32::try_from(vertices.len())
        .ok()
        .filter(|b| b.checked_add(2).is_some())
        .ok_or(AssetError::TooManyVertices)?;
    vertices.extend_from_slice(&corners);
    elements.push(RenderElement::new(base + 2, base + 1, base));
    Ok(())
}

/// Flatten `obj` and resolve its texture path through `textures`.
///
/// Without a texture path the texture is left empty (0x0).
pub fn assemble(
    obj: &ObjData,
    textures: &dyn TextureSource,
    flip_vertical: bool,
) -> Result<ModelData> {
    let (vertices, elements) = flatten(obj)?;
    let texture = if obj.texture_path.is_empty() {
        TextureData::empty()
    } else {
        textures.load_texture(&obj.texture_path, flip_vertical)?
    };
    Ok(ModelData::new(vertices, elements, texture))
}

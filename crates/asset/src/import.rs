//! Boundary to general-purpose mesh importers for formats the OBJ parser
//! does not cover.

use crate::{
    error::Result,
    primitives::{RenderElement, RenderVertex},
};

/// Turns raw mesh bytes of format `format_hint` (e.g. `"fbx"`) into flat arrays.
///
/// Implementations produce the same layout as the OBJ path: one vertex per
/// face corner, white vertex color. The texture is supplied by the caller.
pub trait MeshImporter {
    fn import(&self, bytes: &[u8], format_hint: &str) -> Result<(Vec<RenderVertex>, Vec<RenderElement>)>;
}

impl<T: MeshImporter + ?Sized> MeshImporter for &T {
    fn import(&self, bytes: &[u8], format_hint: &str) -> Result<(Vec<RenderVertex>, Vec<RenderElement>)> {
        (**self).import(bytes, format_hint)
    }
}

#[cfg(feature = "assimp")]
pub use assimp::AssimpImporter;

#[cfg(feature = "assimp")]
mod assimp {
    use asset_importer::{Importer, postprocess::PostProcessSteps};

    use super::MeshImporter;
    use crate::{
        assemble::push_triangle,
        error::{AssetError, Result},
        primitives::{RenderElement, RenderVertex},
    };

    /// Importer backed by Assimp through the `asset-importer` bindings.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct AssimpImporter;

    impl MeshImporter for AssimpImporter {
        fn import(
            &self,
            bytes: &[u8],
            format_hint: &str,
        ) -> Result<(Vec<RenderVertex>, Vec<RenderElement>)> {
            let hint = (!format_hint.is_empty()).then_some(format_hint);
            let scene = Importer::new()
                .read_from_memory(bytes)
                .with_post_process(PostProcessSteps::TRIANGULATE)
                .import_from_memory(bytes, hint)
                .map_err(|err| AssetError::Import {
                    format: format_hint.to_owned(),
                    message: err.to_string(),
                })?;

            let mut vertices = Vec::new();
            let mut elements = Vec::new();
            for mesh in scene.meshes() {
                let positions = mesh.vertices();
                let uvs = mesh.texture_coords(0).unwrap_or_default();
                for face in mesh.faces() {
                    let [a, b, c] = match face.indices() {
                        &[a, b, c] => [a, b, c],
                        // Points and lines survive triangulation; they have no area to draw.
                        _ => continue,
                    };
                    let mut corners = [RenderVertex::default(); 3];
                    for (slot, idx) in corners.iter_mut().zip([a, b, c]) {
                        let idx = idx as usize;
                        let p = positions.get(idx).ok_or_else(|| AssetError::Import {
                            format: format_hint.to_owned(),
                            message: format!("face references missing vertex {idx}"),
                        })?;
                        let uv = uvs.get(idx).map_or([0.0, 0.0], |t| [t.x, t.y]);
                        *slot = RenderVertex::new([p.x, p.y, p.z], [1.0, 1.0, 1.0], uv);
                    }
                    push_triangle(&mut vertices, &mut elements, corners)?;
                }
            }

            log::info!(
                "Imported {} meshes from '{}' data: {} vertices, {} triangles",
                scene.num_meshes(),
                format_hint,
                vertices.len(),
                elements.len()
            );
            Ok((vertices, elements))
        }
    }
}

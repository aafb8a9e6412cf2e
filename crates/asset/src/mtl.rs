//! Material library (MTL) parser: diffuse color and diffuse texture only.

use crate::{
    error::Result,
    grammar::{MtlDirective, for_each_line, mtl_line},
    options::Parsed,
    primitives::Color,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Last non-empty `newmtl` name seen. Only one material per library is supported.
    pub name: Option<String>,
    pub diffuse: Color,
    /// `map_Kd` path exactly as written; empty when absent.
    pub texture_path: String,
}

impl Material {
    pub fn has_texture(&self) -> bool {
        !self.texture_path.is_empty()
    }
}

/// Parse one material library blob. Later `Kd`/`map_Kd` lines override earlier ones.
pub fn parse_material(bytes: &[u8]) -> Result<Parsed<Material>> {
    let mut material = Material::default();
    let mismatch = for_each_line(bytes, mtl_line, |directive| {
        match directive {
            MtlDirective::NewMaterial(name) => {
                if !name.is_empty() {
                    material.name = Some(name);
                }
            }
            MtlDirective::Diffuse(color) => material.diffuse = color,
            MtlDirective::DiffuseMap(path) => {
                log::debug!("map_Kd {path}");
                material.texture_path = path;
            }
            MtlDirective::Skip => {}
        }
        Ok(())
    })?;
    Ok(Parsed {
        value: material,
        mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_is_white_without_texture() {
        let parsed = parse_material(b"").unwrap();
        assert!(parsed.is_complete());
        assert_eq!(parsed.value.diffuse, Color::WHITE);
        assert!(!parsed.value.has_texture());
    }

    #[test]
    fn typical_blender_export() {
        let src = "\
# Blender MTL File: 'None'
# Material Count: 1

newmtl Material
Ns 323.999994
Ka 1.000000 1.000000 1.000000
Kd 0.800000 0.400000 0.200000
Ks 0.500000 0.500000 0.500000
Ni 1.450000
d 1.000000
illum 2
map_Kd textures/crate.png
";
        let parsed = parse_material(src.as_bytes()).unwrap();
        assert!(parsed.is_complete(), "{:?}", parsed.mismatch);
        let mtl = parsed.value;
        assert_eq!(mtl.name.as_deref(), Some("Material"));
        assert_eq!(mtl.diffuse, Color::new(0.8, 0.4, 0.2));
        assert_eq!(mtl.texture_path, "textures/crate.png");
    }

    #[test]
    fn malformed_kd_is_reported_with_prefix_kept() {
        let parsed = parse_material(b"map_Kd a.png\nKd 0.1 zero 0.3\nKd 1 0 0\n").unwrap();
        let err = parsed.mismatch.as_ref().expect("Kd must fail");
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("green component"), "{}", err.reason);
        assert_eq!(parsed.value.texture_path, "a.png");
        assert_eq!(parsed.value.diffuse, Color::WHITE);
    }

    #[test]
    fn unnamed_material_is_accepted() {
        let parsed = parse_material(b"newmtl\nKd 0.3 0.3 0.3\n").unwrap();
        assert!(parsed.is_complete(), "{:?}", parsed.mismatch);
        assert_eq!(parsed.value.name, None);
        assert_eq!(parsed.value.diffuse, Color::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn last_kd_wins() {
        let parsed = parse_material(b"Kd 1 0 0\nKd 0 1 0\n").unwrap();
        assert_eq!(parsed.value.diffuse, Color::new(0.0, 1.0, 0.0));
    }
}

//! Plain records shared by the parsers and the assembly stage.

use bytemuck::{Pod, Zeroable};

/// One vertex position as written in the source file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Diffuse color of a material. Components are expected in `0..=1` but not checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One UV sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextureCoords {
    pub u: f64,
    pub v: f64,
}

impl TextureCoords {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// One corner of a face. Ids are 0-based indices into the parsed lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceVertexRef {
    pub vertex_id: u32,
    pub uv_id: u32,
    pub normal_id: u32,
}

impl FaceVertexRef {
    pub fn new(vertex_id: u32, uv_id: u32, normal_id: u32) -> Self {
        Self {
            vertex_id,
            uv_id,
            normal_id,
        }
    }
}

/// A triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: [FaceVertexRef; 3],
}

/// GPU vertex: position + color + uv, tightly packed (8 floats).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    pub coord: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl RenderVertex {
    pub fn new(coord: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self { coord, color, uv }
    }

    /// Narrow the parser's f64 records into one GPU vertex.
    pub fn from_parts(point: Point, color: Color, uv: TextureCoords) -> Self {
        Self {
            coord: [point.x as f32, point.y as f32, point.z as f32],
            color: [color.r as f32, color.g as f32, color.b as f32],
            uv: [uv.u as f32, uv.v as f32],
        }
    }
}

/// GPU triangle: three indices into the flat vertex array.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RenderElement {
    pub vertices: [u32; 3],
}

impl RenderElement {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_to_white() {
        assert_eq!(Color::default(), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn render_vertex_layout_is_eight_floats() {
        assert_eq!(std::mem::size_of::<RenderVertex>(), 8 * 4);
        assert_eq!(std::mem::size_of::<RenderElement>(), 3 * 4);
    }

    #[test]
    fn from_parts_narrows_to_f32() {
        let v = RenderVertex::from_parts(
            Point::new(1.0, 2.0, 3.0),
            Color::new(0.5, 0.25, 0.0),
            TextureCoords::new(0.0, 1.0),
        );
        assert_eq!(v.coord, [1.0, 2.0, 3.0]);
        assert_eq!(v.color, [0.5, 0.25, 0.0]);
        assert_eq!(v.uv, [0.0, 1.0]);
    }
}

//! Per-model settings edited from the models panel.

use crate::{Vec3, transform::Transform};

pub const MIN_SCALE: f32 = 0.001;
pub const MAX_SCALE: f32 = 1000.0;
pub const MIN_OFFSET: f32 = -10.0;
pub const MAX_OFFSET: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ModelSettings {
    pub name: String,
    scale: Vec3,
    offset: Vec3,
    pub is_rotating: bool,
    /// Removed by [`crate::ecs::World::remove_marked`] before the next frame.
    pub delete_me: bool,
}

impl ModelSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scale: Vec3::ONE,
            offset: Vec3::ZERO,
            is_rotating: true,
            delete_me: false,
        }
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Set per-axis scale, clamped to [`MIN_SCALE`, `MAX_SCALE`].
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale.clamp(Vec3::splat(MIN_SCALE), Vec3::splat(MAX_SCALE));
    }

    /// Same scale on every axis ("preserve scale ratio").
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::splat(scale));
    }

    /// Collapse the scale onto its x component, as toggling "preserve scale ratio" does.
    pub fn preserve_scale_ratio(&mut self) {
        self.set_uniform_scale(self.scale.x);
    }

    /// Set the offset, clamped to [`MIN_OFFSET`, `MAX_OFFSET`] per axis.
    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset.clamp(Vec3::splat(MIN_OFFSET), Vec3::splat(MAX_OFFSET));
    }

    /// Copy scale and offset into `t`, keeping its rotation.
    pub fn apply_to(&self, t: &mut Transform) {
        t.scale = self.scale;
        t.translation = self.offset;
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::new("Model")
    }
}

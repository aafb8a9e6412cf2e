//! Tiny ECS: World, Entity, components: Transform + ModelSettings + payload.

use std::f32::consts::PI;

use crate::{Mat4, Vec3, settings::ModelSettings, transform::Transform};

/// Entity id (dense, index into component arrays). Ids are never reused.
pub type Entity = u32;

/// Rotation speed of spinning models, radians per second.
pub const ROTATION_SPEED: f32 = 0.1 * PI;

/// Borrowed view of one live model.
pub struct ModelRef<'w, M> {
    pub entity: Entity,
    pub settings: &'w ModelSettings,
    pub transform: &'w Transform,
    pub mvp: &'w Mat4,
    pub payload: &'w M,
}

/// Models stored in dense parallel arrays, iterated in spawn order.
pub struct World<M> {
    transforms: Vec<Transform>,
    settings: Vec<ModelSettings>,
    mvps: Vec<Mat4>,
    payloads: Vec<Option<M>>,
}

impl<M> Default for World<M> {
    fn default() -> Self {
        Self {
            transforms: Vec::new(),
            settings: Vec::new(),
            mvps: Vec::new(),
            payloads: Vec::new(),
        }
    }
}

impl<M> World<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a model; its transform starts from the settings' scale and offset.
    pub fn spawn(&mut self, settings: ModelSettings, payload: M) -> Entity {
        let id = self.payloads.len() as Entity;
        let mut t = Transform::identity();
        settings.apply_to(&mut t);
        self.transforms.push(t);
        self.settings.push(settings);
        self.mvps.push(Mat4::IDENTITY);
        self.payloads.push(Some(payload));
        id
    }

    #[inline]
    pub fn is_alive(&self, e: Entity) -> bool {
        matches!(self.payloads.get(e as usize), Some(Some(_)))
    }

    /// Number of live models.
    pub fn len(&self) -> usize {
        self.payloads.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn settings(&self, e: Entity) -> Option<&ModelSettings> {
        self.is_alive(e).then(|| &self.settings[e as usize])
    }

    /// Mutable settings; call [`World::system_apply_settings`] to push edits
    /// into the transform.
    pub fn settings_mut(&mut self, e: Entity) -> Option<&mut ModelSettings> {
        if self.is_alive(e) {
            Some(&mut self.settings[e as usize])
        } else {
            None
        }
    }

    pub fn transform(&self, e: Entity) -> Option<&Transform> {
        self.is_alive(e).then(|| &self.transforms[e as usize])
    }

    pub fn mvp(&self, e: Entity) -> Option<Mat4> {
        self.is_alive(e).then(|| self.mvps[e as usize])
    }

    pub fn payload(&self, e: Entity) -> Option<&M> {
        self.payloads.get(e as usize).and_then(Option::as_ref)
    }

    /// Iterate over live models.
    pub fn iter(&self) -> impl Iterator<Item = ModelRef<'_, M>> {
        self.payloads.iter().enumerate().filter_map(move |(i, p)| {
            p.as_ref().map(|payload| ModelRef {
                entity: i as Entity,
                settings: &self.settings[i],
                transform: &self.transforms[i],
                mvp: &self.mvps[i],
                payload,
            })
        })
    }

    /// Drop every model flagged `delete_me` and hand back their payloads.
    pub fn remove_marked(&mut self) -> Vec<M> {
        let mut removed = Vec::new();
        for (settings, payload) in self.settings.iter().zip(self.payloads.iter_mut()) {
            if settings.delete_me {
                if let Some(p) = payload.take() {
                    removed.push(p);
                }
            }
        }
        removed
    }

    /// Copy every live model's scale and offset into its transform.
    pub fn system_apply_settings(&mut self) {
        let live = self.payloads.iter().map(Option::is_some);
        for ((settings, t), _) in self
            .settings
            .iter()
            .zip(self.transforms.iter_mut())
            .zip(live)
            .filter(|(_, alive)| *alive)
        {
            settings.apply_to(t);
        }
    }

    /// Set rotating models to `elapsed_secs * ROTATION_SPEED` about +Y.
    /// Models with rotation switched off keep their last angle.
    pub fn system_rotate(&mut self, elapsed_secs: f32) {
        let angle = elapsed_secs * ROTATION_SPEED;
        let live = self.payloads.iter().map(Option::is_some);
        for ((settings, t), alive) in self.settings.iter().zip(self.transforms.iter_mut()).zip(live) {
            if alive && settings.is_rotating {
                t.set_axis_angle(Vec3::Y, angle);
            }
        }
    }

    /// mvp = proj_view * model for every live model.
    pub fn update_mvp(&mut self, proj_view: Mat4) {
        let live = self.payloads.iter().map(Option::is_some);
        for ((mvp, t), _) in self
            .mvps
            .iter_mut()
            .zip(&self.transforms)
            .zip(live)
            .filter(|(_, alive)| *alive)
        {
            *mvp = proj_view * t.matrix();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quat, vec3};

    fn world() -> (World<&'static str>, Entity, Entity) {
        let mut w = World::new();
        let a = w.spawn(ModelSettings::new("a"), "mesh-a");
        let b = w.spawn(ModelSettings::new("b"), "mesh-b");
        (w, a, b)
    }

    #[test]
    fn spawn_and_iterate_in_order() {
        let (w, a, b) = world();
        let names: Vec<_> = w.iter().map(|m| m.settings.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!((a, b), (0, 1));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn remove_marked_keeps_ids_stable() {
        let (mut w, a, b) = world();
        w.settings_mut(a).unwrap().delete_me = true;
        assert_eq!(w.remove_marked(), vec!["mesh-a"]);
        assert!(!w.is_alive(a));
        assert!(w.is_alive(b));
        assert_eq!(w.payload(b), Some(&"mesh-b"));
        assert!(w.settings_mut(a).is_none());
        assert!(w.remove_marked().is_empty());
    }

    #[test]
    fn removed_models_are_left_alone_by_systems() {
        let (mut w, a, b) = world();
        w.settings_mut(a).unwrap().delete_me = true;
        w.remove_marked();

        w.system_rotate(3.0);
        w.update_mvp(Mat4::from_scale(Vec3::splat(2.0)));

        assert_eq!(w.transforms[a as usize].rotation, Quat::IDENTITY);
        assert_eq!(w.mvps[a as usize], Mat4::IDENTITY);
        assert_ne!(w.mvp(b).unwrap(), Mat4::IDENTITY);
        assert_ne!(w.transform(b).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn rotation_is_absolute_in_time() {
        let (mut w, a, b) = world();
        w.settings_mut(b).unwrap().is_rotating = false;
        w.system_rotate(5.0);
        w.system_rotate(10.0);
        let expected = Quat::from_axis_angle(Vec3::Y, 10.0 * ROTATION_SPEED);
        assert!(w.transform(a).unwrap().rotation.abs_diff_eq(expected, 1e-6));
        assert_eq!(w.transform(b).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn mvp_composes_projection_view_model() {
        let (mut w, a, _) = world();
        w.settings_mut(a).unwrap().set_offset(vec3(1.0, 2.0, 3.0));
        w.system_apply_settings();
        let pv = Mat4::from_scale(Vec3::splat(2.0));
        w.update_mvp(pv);
        let m = w.mvp(a).unwrap().to_cols_array();
        assert!((m[12] - 2.0).abs() < 1e-6);
        assert!((m[13] - 4.0).abs() < 1e-6);
        assert!((m[14] - 6.0).abs() < 1e-6);
    }
}

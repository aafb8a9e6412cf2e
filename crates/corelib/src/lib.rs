//! Core types: math re-exports, Transform, Camera, model settings and the world.

pub use glam::{Mat4, Quat, Vec3, Vec4, vec3};

pub mod camera;
pub mod ecs;
pub mod settings;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform {
            translation: vec3(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: vec3(2.0, 2.0, 2.0),
        };
        // Last column is the translation, diagonal the scale (no rotation).
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_about_y_moves_x_to_minus_z() {
        let mut t = transform::Transform::identity();
        t.set_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(vec3(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn zero_axis_means_no_rotation() {
        let mut t = transform::Transform::identity();
        t.set_axis_angle(Vec3::ZERO, 1.0);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = camera::Camera::viewer_default(camera::Camera::aspect_for(1024, 768));
        let pv = cam.proj_view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn scene_center_projects_inside_clip_volume() {
        let cam = camera::Camera::viewer_default(4.0 / 3.0);
        let clip = cam.proj_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn aspect_guards_zero_height() {
        assert_eq!(camera::Camera::aspect_for(800, 0), 800.0);
    }
}

use glam::{Vec3, Vec4};
use super::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_default_desc() {
    let desc = CameraDesc::default();
    assert_eq!((desc.offset_x, desc.offset_y, desc.offset_z), (0.0, 0.0, 0.0));
    assert_eq!((desc.near, desc.far), (-2000.0, 2000.0));
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_projection_layout() {
    let m = orthographic_projection(800.0, 600.0, &CameraDesc::default());

    assert_eq!(
        m.to_cols_array(),
        [
            2.0 / 800.0, 0.0, 0.0, 0.0,
            0.0, 2.0 / 600.0, 0.0, 0.0,
            0.0, 0.0, 2.0 / -4000.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]
    );
}

#[test]
fn test_projection_maps_edges_to_clip_space() {
    let desc = CameraDesc { near: -1024.0, far: 1024.0, ..CameraDesc::default() };
    let m = orthographic_projection(1024.0, 512.0, &desc);

    let corner = m.transform_point3(Vec3::new(512.0, 256.0, 0.0));
    assert_eq!(corner, Vec3::new(1.0, 1.0, 0.0));

    let depth = m * Vec4::new(0.0, 0.0, 1024.0, 1.0);
    assert_eq!(depth.z, -1.0);
}

#[test]
fn test_offset_is_translation() {
    let desc = CameraDesc { offset_x: 0.5, offset_y: -0.25, offset_z: 1.0, ..CameraDesc::default() };
    let m = orthographic_projection(2.0, 2.0, &desc);

    assert_eq!(m.w_axis, Vec4::new(0.5, -0.25, 1.0, 1.0));
    assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(0.5, -0.25, 1.0));
}

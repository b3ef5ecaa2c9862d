/// Orthographic camera - passive description plus the projection it yields.
///
/// The renderer stores the last `CameraDesc` it was given and rebuilds the
/// projection from it on demand.

use glam::{Mat4, Vec4};

/// Orthographic camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDesc {
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
            near: -2000.0,
            far: 2000.0,
        }
    }
}

/// Orthographic projection for a `width` x `height` viewport.
///
/// Scale is `diag(2/width, 2/height, 2/(near - far), 1)` and the camera
/// offset is stored as the translation column.
pub fn orthographic_projection(width: f32, height: f32, desc: &CameraDesc) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 2.0 / (desc.near - desc.far), 0.0),
        Vec4::new(desc.offset_x, desc.offset_y, desc.offset_z, 1.0),
    )
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;

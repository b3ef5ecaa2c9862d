/// Uniform location handle and upload payloads

use std::any::Any;

/// Resolved location of one leaf uniform inside a linked program
pub trait UniformLocation {
    /// Fully qualified GLSL name (e.g. "u_waveLayers[1].color")
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Value pushed to a uniform location
///
/// One variant per upload entry point of the device (1f, 1i, 2fv, 3fv, 4fv,
/// Matrix4fv).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformUpload<'a> {
    Float(f32),
    Int(i32),
    Vec2(&'a [f32; 2]),
    Vec3(&'a [f32; 3]),
    Vec4(&'a [f32; 4]),
    Mat4 {
        transpose: bool,
        data: &'a [f32; 16],
    },
}

/// Renderer - engine root owning the common uniforms and the mesh list

use slotmap::{new_key_type, SlotMap};

use crate::camera::{orthographic_projection, CameraDesc};
use crate::error::Result;
use crate::graphics_device::{ClearDesc, ClearMask, SharedGraphicsDevice, Viewport};
use crate::resource::Mesh;
use crate::uniform::{SharedUniforms, Uniform, UniformSet};
use crate::{engine_debug, engine_error};

new_key_type! {
    /// Handle of a mesh owned by a `Renderer`
    pub struct MeshKey;
}

/// Names of the renderer-wide uniforms, in declaration order
pub const PROJECTION_MATRIX: &str = "projectionMatrix";
pub const MODEL_VIEW_MATRIX: &str = "modelViewMatrix";
pub const RESOLUTION: &str = "resolution";
pub const ASPECT_RATIO: &str = "aspectRatio";

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

// ============================================================================
// Configuration
// ============================================================================

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Color written by `render` before drawing
    pub clear_color: [f32; 4],
    /// Depth written by `render` before drawing
    pub clear_depth: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            clear_depth: 1.0,
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

pub struct Renderer {
    device: SharedGraphicsDevice,
    config: RendererConfig,
    common: SharedUniforms,
    meshes: SlotMap<MeshKey, Mesh>,
    draw_order: Vec<MeshKey>,
    width: u32,
    height: u32,
    camera: CameraDesc,
}

impl Renderer {
    /// Create a renderer for a `width` x `height` surface
    pub fn new(device: SharedGraphicsDevice, width: u32, height: u32, config: RendererConfig) -> Result<Self> {
        let mut common = UniformSet::new();
        common.insert(PROJECTION_MATRIX, Uniform::mat4(IDENTITY));
        common.insert(MODEL_VIEW_MATRIX, Uniform::mat4(IDENTITY));
        common.insert(RESOLUTION, Uniform::vec2([width as f32, height as f32]));
        common.insert(ASPECT_RATIO, Uniform::float(aspect_ratio(width, height)));

        let mut renderer = Self {
            device,
            config,
            common: common.into_shared(),
            meshes: SlotMap::with_key(),
            draw_order: Vec::new(),
            width,
            height,
            camera: CameraDesc::default(),
        };
        renderer.resize(width, height)?;
        Ok(renderer)
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &SharedGraphicsDevice {
        &self.device
    }

    /// Uniforms shared by every material created for this renderer
    pub fn common_uniforms(&self) -> &SharedUniforms {
        &self.common
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn camera(&self) -> &CameraDesc {
        &self.camera
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    // ===== SURFACE =====

    /// Update the viewport, `resolution` and `aspectRatio`
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.device.borrow_mut().set_viewport(Viewport { x: 0, y: 0, width, height })?;

        let mut common = self.common.borrow_mut();
        if let Some(u) = common.get_mut(RESOLUTION) {
            u.set_vec2([width as f32, height as f32])?;
        }
        if let Some(u) = common.get_mut(ASPECT_RATIO) {
            u.set_float(aspect_ratio(width, height))?;
        }
        engine_debug!("wavefield::Renderer", "Resized to {}x{}", width, height);
        Ok(())
    }

    /// Rebuild `projectionMatrix` as an orthographic projection of the
    /// current surface
    pub fn set_orthographic_camera(&mut self, desc: CameraDesc) -> Result<()> {
        self.camera = desc;
        let projection = orthographic_projection(
            self.width.max(1) as f32,
            self.height.max(1) as f32,
            &desc,
        );
        match self.common.borrow_mut().get_mut(PROJECTION_MATRIX) {
            Some(u) => u.set_mat4(projection.to_cols_array()),
            None => Ok(()),
        }
    }

    // ===== MESHES =====

    /// Take ownership of `mesh`; it is drawn after every mesh added before it
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        let key = self.meshes.insert(mesh);
        self.draw_order.push(key);
        key
    }

    /// Remove a mesh from the draw list and hand it back
    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Mesh> {
        let mesh = self.meshes.remove(key)?;
        self.draw_order.retain(|k| *k != key);
        Some(mesh)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    pub fn mesh_count(&self) -> usize {
        self.draw_order.len()
    }

    /// Mesh keys in draw order
    pub fn mesh_keys(&self) -> &[MeshKey] {
        &self.draw_order
    }

    // ===== FRAME =====

    /// Clear color and depth, then draw every mesh in insertion order
    ///
    /// A mesh that fails to draw is logged and skipped; the remaining
    /// meshes are still drawn. Only a failed clear is returned.
    pub fn render(&self) -> Result<()> {
        self.device.borrow_mut().clear(ClearDesc {
            mask: ClearMask::COLOR | ClearMask::DEPTH,
            color: self.config.clear_color,
            depth: self.config.clear_depth,
        })?;
        for key in &self.draw_order {
            if let Some(mesh) = self.meshes.get(*key) {
                if let Err(e) = mesh.draw() {
                    engine_error!("wavefield::Renderer", "Mesh draw failed: {}", e);
                }
            }
        }
        Ok(())
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;

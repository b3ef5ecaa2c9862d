/// Gradient - assembly of the animated gradient scene

use crate::animation::{AnimationController, FrameScheduler};
use crate::engine_info;
use crate::error::Result;
use crate::gradient::gradient_material::{fragment_body, gradient_uniforms, vertex_body};
use crate::gradient::GradientConfig;
use crate::graphics_device::SharedGraphicsDevice;
use crate::renderer::{Renderer, RendererConfig};
use crate::resource::{Material, Mesh, PlaneGeometry};

/// Build the renderer, the gradient mesh and its controller for a
/// `width` x `height` surface
///
/// The initial resize is applied; the returned controller is idle until
/// `play` is called.
pub fn create_gradient(
    device: SharedGraphicsDevice,
    width: u32,
    height: u32,
    config: &GradientConfig,
    scheduler: Box<dyn FrameScheduler>,
) -> Result<AnimationController> {
    let animation = &config.animation;
    let mut renderer = Renderer::new(device.clone(), width, height, RendererConfig::default())?;

    let uniforms = gradient_uniforms(config, animation.shadow_power_for(width))?;
    let material = Material::new(
        device.clone(),
        renderer.common_uniforms().clone(),
        &vertex_body(),
        fragment_body(),
        uniforms,
    )?;

    let (x_segments, y_segments) = animation.segments_for(width, height);
    let geometry = PlaneGeometry::new(
        device.clone(),
        width as f32,
        height as f32,
        x_segments,
        y_segments,
        animation.axis_order,
    )?;

    let mesh = Mesh::new(device, geometry, material)?;
    let key = renderer.add_mesh(mesh);

    let mut controller = AnimationController::new(renderer, key, scheduler, animation.clone())?;
    controller.resize(width, height)?;

    engine_info!(
        "wavefield::Gradient",
        "Gradient created: {}x{}, {} colours, {}x{} segments",
        width,
        height,
        config.palette.len(),
        x_segments,
        y_segments
    );
    Ok(controller)
}

/// Move the global noise frequency by `steps` times `config.frequency_delta`
pub fn step_frequency(controller: &mut AnimationController, config: &GradientConfig, steps: i32) -> Result<()> {
    controller.update_frequency(config.frequency_delta * steps as f32)
}

#[cfg(test)]
#[path = "gradient_tests.rs"]
mod tests;

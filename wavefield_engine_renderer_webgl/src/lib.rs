/*!
# Wavefield Engine - WebGL Backend

WebGL 1 implementation of the wavefield_engine `GraphicsDevice` trait over
`web-sys`, plus a `requestAnimationFrame` host loop for
`AnimationController`.
*/

// WebGL implementation modules
mod webgl_format;
mod webgl_buffer;
mod webgl_shader;
mod webgl_uniform_location;
mod webgl_graphics_device;
mod animation_frame_loop;

pub use webgl_graphics_device::{WebGlGraphicsDevice, ELEMENT_INDEX_UINT_EXTENSION};
pub use webgl_buffer::WebGlDeviceBuffer;
pub use webgl_shader::{WebGlDeviceProgram, WebGlDeviceShader};
pub use webgl_uniform_location::WebGlDeviceUniformLocation;
pub use animation_frame_loop::{AnimationFrameLoop, AnimationFrameScheduler};

use std::cell::RefCell;
use std::rc::Rc;

use wavefield_engine::wavefield::animation::AnimationController;
use wavefield_engine::wavefield::device::SharedGraphicsDevice;
use wavefield_engine::wavefield::gradient::{create_gradient, GradientConfig};
use wavefield_engine::wavefield::Result;
use web_sys::HtmlCanvasElement;

/// Build the animated gradient on `canvas` and wire it to a frame loop
///
/// The canvas backing store must already be `width` x `height`. Keep the
/// returned loop alive for as long as the gradient runs; call `play` on the
/// controller to start it.
///
/// ```no_run
/// # use wavefield_engine::wavefield::gradient::GradientConfig;
/// # fn run(canvas: web_sys::HtmlCanvasElement) -> wavefield_engine::wavefield::Result<()> {
/// let (controller, frame_loop) =
///     wavefield_engine_renderer_webgl::mount_gradient(&canvas, 1280, 720, &GradientConfig::default())?;
/// controller.borrow_mut().play();
/// # std::mem::forget(frame_loop);
/// # Ok(())
/// # }
/// ```
pub fn mount_gradient(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
    config: &GradientConfig,
) -> Result<(Rc<RefCell<AnimationController>>, AnimationFrameLoop)> {
    let device: SharedGraphicsDevice = Rc::new(RefCell::new(WebGlGraphicsDevice::from_canvas(canvas)?));
    let frame_loop = AnimationFrameLoop::new()?;
    let controller = create_gradient(device, width, height, config, Box::new(frame_loop.scheduler()))?;
    let controller = Rc::new(RefCell::new(controller));
    frame_loop.attach(controller.clone());
    Ok((controller, frame_loop))
}

// Main wavefield namespace module
pub mod wavefield {
    pub use crate::{
        AnimationFrameLoop, AnimationFrameScheduler, WebGlGraphicsDevice, mount_gradient,
    };
}

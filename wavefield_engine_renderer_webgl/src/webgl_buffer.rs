/// WebGlDeviceBuffer - WebGL implementation of the Buffer trait

use std::any::Any;
use std::cell::Cell;

use wavefield_engine::wavefield::device::{Buffer, BufferUsage};
use web_sys::{WebGlBuffer, WebGlRenderingContext};

pub struct WebGlDeviceBuffer {
    gl: WebGlRenderingContext,
    pub(crate) buffer: WebGlBuffer,
    pub(crate) usage: BufferUsage,
    pub(crate) label: String,
    /// Bytes allocated by the last `bufferData`
    pub(crate) capacity: Cell<u64>,
}

impl WebGlDeviceBuffer {
    pub(crate) fn new(gl: WebGlRenderingContext, buffer: WebGlBuffer, usage: BufferUsage, label: String) -> Self {
        Self {
            gl,
            buffer,
            usage,
            label,
            capacity: Cell::new(0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Buffer for WebGlDeviceBuffer {
    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn capacity(&self) -> u64 {
        self.capacity.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for WebGlDeviceBuffer {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.buffer));
    }
}

/// WebGlDeviceUniformLocation - resolved uniform location plus its name

use std::any::Any;

use wavefield_engine::wavefield::device::UniformLocation;
use web_sys::WebGlUniformLocation;

pub struct WebGlDeviceUniformLocation {
    pub(crate) location: WebGlUniformLocation,
    name: String,
}

impl WebGlDeviceUniformLocation {
    pub(crate) fn new(location: WebGlUniformLocation, name: String) -> Self {
        Self { location, name }
    }
}

impl UniformLocation for WebGlDeviceUniformLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

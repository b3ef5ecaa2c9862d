/// WebGL shader and program handles

use std::any::Any;

use wavefield_engine::wavefield::device::{Program, Shader, ShaderStage};
use web_sys::{WebGlProgram, WebGlRenderingContext, WebGlShader};

pub struct WebGlDeviceShader {
    gl: WebGlRenderingContext,
    pub(crate) shader: WebGlShader,
    stage: ShaderStage,
    compiled: bool,
    info_log: String,
}

impl WebGlDeviceShader {
    pub(crate) fn new(
        gl: WebGlRenderingContext,
        shader: WebGlShader,
        stage: ShaderStage,
        compiled: bool,
        info_log: String,
    ) -> Self {
        Self { gl, shader, stage, compiled, info_log }
    }
}

impl Shader for WebGlDeviceShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn is_compiled(&self) -> bool {
        self.compiled
    }

    fn info_log(&self) -> &str {
        &self.info_log
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for WebGlDeviceShader {
    fn drop(&mut self) {
        self.gl.delete_shader(Some(&self.shader));
    }
}

pub struct WebGlDeviceProgram {
    gl: WebGlRenderingContext,
    pub(crate) program: WebGlProgram,
    linked: bool,
    info_log: String,
}

impl WebGlDeviceProgram {
    pub(crate) fn new(gl: WebGlRenderingContext, program: WebGlProgram, linked: bool, info_log: String) -> Self {
        Self { gl, program, linked, info_log }
    }
}

impl Program for WebGlDeviceProgram {
    fn is_linked(&self) -> bool {
        self.linked
    }

    fn info_log(&self) -> &str {
        &self.info_log
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for WebGlDeviceProgram {
    fn drop(&mut self) {
        self.gl.delete_program(Some(&self.program));
    }
}

/// WebGlGraphicsDevice - WebGL 1 implementation of the GraphicsDevice trait

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wavefield_engine::wavefield::device::{
    Buffer, BufferDesc, ClearDesc, GraphicsDevice, IndexType, PrimitiveTopology, Program, Shader,
    ShaderDesc, UniformLocation, UniformUpload, VertexPointer, Viewport,
};
use wavefield_engine::wavefield::{Error, Result};
use wavefield_engine::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};
use web_sys::{HtmlCanvasElement, WebGlRenderingContext as Gl};

use crate::webgl_buffer::WebGlDeviceBuffer;
use crate::webgl_format::{
    buffer_target, clear_bits, element_type, index_type, primitive_mode, shader_type, upload_matrix,
};
use crate::webgl_shader::{WebGlDeviceProgram, WebGlDeviceShader};
use crate::webgl_uniform_location::WebGlDeviceUniformLocation;

/// Extension lifting the 16-bit index limit of WebGL 1
pub const ELEMENT_INDEX_UINT_EXTENSION: &str = "OES_element_index_uint";

// ============================================================================
// Device
// ============================================================================

pub struct WebGlGraphicsDevice {
    gl: Gl,
    element_index_uint: bool,
}

impl WebGlGraphicsDevice {
    /// Wrap an existing WebGL 1 context
    pub fn new(gl: Gl) -> Self {
        let element_index_uint = matches!(gl.get_extension(ELEMENT_INDEX_UINT_EXTENSION), Ok(Some(_)));
        if !element_index_uint {
            engine_warn!(
                "wavefield::webgl",
                "{} unavailable, meshes above 65536 vertices cannot be drawn",
                ELEMENT_INDEX_UINT_EXTENSION
            );
        }
        engine_info!("wavefield::webgl", "WebGL device ready");
        Self { gl, element_index_uint }
    }

    /// Acquire an antialiased `"webgl"` context from `canvas`
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("antialias"), &JsValue::TRUE)
            .map_err(|e| init_error("cannot build context options", &e))?;

        let context = canvas
            .get_context_with_context_options("webgl", &options)
            .map_err(|e| init_error("getContext failed", &e))?
            .ok_or_else(|| Error::InitializationFailed("WebGL is not supported".to_string()))?;
        let gl = context
            .dyn_into::<Gl>()
            .map_err(|e| init_error("context is not a WebGLRenderingContext", &e))?;
        Ok(Self::new(gl))
    }

    pub fn context(&self) -> &Gl {
        &self.gl
    }

    /// Whether 32-bit indices can be drawn
    pub fn supports_u32_indices(&self) -> bool {
        self.element_index_uint
    }
}

fn init_error(what: &str, value: &JsValue) -> Error {
    Error::InitializationFailed(format!("{}: {:?}", what, value))
}

// ===== DOWNCASTS =====

fn webgl_buffer(buffer: &dyn Buffer) -> Result<&WebGlDeviceBuffer> {
    match buffer.as_any().downcast_ref::<WebGlDeviceBuffer>() {
        Some(b) => Ok(b),
        None => engine_bail!("wavefield::webgl", "Buffer was not created by the WebGL device"),
    }
}

fn webgl_shader(shader: &dyn Shader) -> Result<&WebGlDeviceShader> {
    match shader.as_any().downcast_ref::<WebGlDeviceShader>() {
        Some(s) => Ok(s),
        None => engine_bail!("wavefield::webgl", "Shader was not created by the WebGL device"),
    }
}

fn webgl_program(program: &dyn Program) -> Result<&WebGlDeviceProgram> {
    match program.as_any().downcast_ref::<WebGlDeviceProgram>() {
        Some(p) => Ok(p),
        None => engine_bail!("wavefield::webgl", "Program was not created by the WebGL device"),
    }
}

fn webgl_location(location: &dyn UniformLocation) -> Result<&WebGlDeviceUniformLocation> {
    match location.as_any().downcast_ref::<WebGlDeviceUniformLocation>() {
        Some(l) => Ok(l),
        None => engine_bail!("wavefield::webgl", "Uniform location '{}' is foreign", location.name()),
    }
}

// ============================================================================
// GraphicsDevice
// ============================================================================

impl GraphicsDevice for WebGlGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Rc<dyn Buffer>> {
        let buffer = self.gl.create_buffer().ok_or(Error::OutOfMemory)?;
        Ok(Rc::new(WebGlDeviceBuffer::new(self.gl.clone(), buffer, desc.usage, desc.label)))
    }

    fn upload_buffer(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()> {
        let buffer = webgl_buffer(buffer)?;
        let target = buffer_target(buffer.usage);
        self.gl.bind_buffer(target, Some(&buffer.buffer));

        if data.len() as u64 > buffer.capacity.get() {
            self.gl.buffer_data_with_u8_array(target, data, Gl::STATIC_DRAW);
            buffer.capacity.set(data.len() as u64);
            engine_debug!(
                "wavefield::webgl",
                "Allocated {} bytes for buffer '{}'",
                data.len(),
                buffer.label
            );
        } else {
            self.gl.buffer_sub_data_with_i32_and_u8_array(target, 0, data);
        }
        Ok(())
    }

    fn bind_buffer(&mut self, buffer: &dyn Buffer) -> Result<()> {
        let buffer = webgl_buffer(buffer)?;
        self.gl.bind_buffer(buffer_target(buffer.usage), Some(&buffer.buffer));
        Ok(())
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Rc<dyn Shader>> {
        let shader = match self.gl.create_shader(shader_type(desc.stage)) {
            Some(s) => s,
            None => engine_bail!("wavefield::webgl", "createShader({}) returned null", desc.stage.name()),
        };
        self.gl.shader_source(&shader, desc.source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        let info_log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
        Ok(Rc::new(WebGlDeviceShader::new(self.gl.clone(), shader, desc.stage, compiled, info_log)))
    }

    fn create_program(&mut self, vertex: &dyn Shader, fragment: &dyn Shader) -> Result<Rc<dyn Program>> {
        let vertex = webgl_shader(vertex)?;
        let fragment = webgl_shader(fragment)?;
        let program = match self.gl.create_program() {
            Some(p) => p,
            None => engine_bail!("wavefield::webgl", "createProgram returned null"),
        };
        self.gl.attach_shader(&program, &vertex.shader);
        self.gl.attach_shader(&program, &fragment.shader);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        let info_log = self.gl.get_program_info_log(&program).unwrap_or_default();
        Ok(Rc::new(WebGlDeviceProgram::new(self.gl.clone(), program, linked, info_log)))
    }

    fn use_program(&mut self, program: &dyn Program) -> Result<()> {
        let program = webgl_program(program)?;
        self.gl.use_program(Some(&program.program));
        Ok(())
    }

    fn attribute_location(&mut self, program: &dyn Program, name: &str) -> Option<u32> {
        let program = webgl_program(program).ok()?;
        u32::try_from(self.gl.get_attrib_location(&program.program, name)).ok()
    }

    fn uniform_location(&mut self, program: &dyn Program, name: &str) -> Option<Rc<dyn UniformLocation>> {
        let program = webgl_program(program).ok()?;
        let location = self.gl.get_uniform_location(&program.program, name)?;
        Some(Rc::new(WebGlDeviceUniformLocation::new(location, name.to_string())))
    }

    fn enable_vertex_attribute(&mut self, location: u32, pointer: VertexPointer) -> Result<()> {
        self.gl.enable_vertex_attrib_array(location);
        self.gl.vertex_attrib_pointer_with_i32(
            location,
            pointer.component_count as i32,
            element_type(pointer.element_type),
            pointer.normalized,
            pointer.stride as i32,
            pointer.offset as i32,
        );
        Ok(())
    }

    fn set_uniform(&mut self, location: &dyn UniformLocation, value: UniformUpload<'_>) -> Result<()> {
        let location = Some(&webgl_location(location)?.location);
        match value {
            UniformUpload::Float(v) => self.gl.uniform1f(location, v),
            UniformUpload::Int(v) => self.gl.uniform1i(location, v),
            UniformUpload::Vec2(v) => self.gl.uniform2fv_with_f32_array(location, v),
            UniformUpload::Vec3(v) => self.gl.uniform3fv_with_f32_array(location, v),
            UniformUpload::Vec4(v) => self.gl.uniform4fv_with_f32_array(location, v),
            UniformUpload::Mat4 { transpose, data } => {
                let matrix = upload_matrix(transpose, data);
                self.gl.uniform_matrix4fv_with_f32_array(location, false, &matrix)
            }
        }
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.gl.viewport(viewport.x, viewport.y, viewport.width as i32, viewport.height as i32);
        Ok(())
    }

    fn clear(&mut self, desc: ClearDesc) -> Result<()> {
        let [r, g, b, a] = desc.color;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear_depth(desc.depth);
        self.gl.clear(clear_bits(desc.mask));
        Ok(())
    }

    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32, index: IndexType) -> Result<()> {
        if index == IndexType::U32 && !self.element_index_uint {
            return Err(engine_err!(
                "wavefield::webgl",
                "32-bit indices need {}",
                ELEMENT_INDEX_UINT_EXTENSION
            ));
        }
        self.gl
            .draw_elements_with_i32(primitive_mode(topology), index_count as i32, index_type(index), 0);
        Ok(())
    }
}

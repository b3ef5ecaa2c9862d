/// Mock graphics device for unit tests (no GPU required)
///
/// Records every command as a short string (`"use_program"`,
/// `"set_uniform:u_time"`, `"draw_indexed:TriangleList:24:U16"`, ...) and keeps
/// owned copies of buffer contents and uniform uploads so tests can assert on
/// what reached the device.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, SharedGraphicsDevice, Buffer, BufferDesc, BufferUsage, Shader, ShaderDesc,
    ShaderStage, Program, UniformLocation, UniformUpload, Viewport, ClearDesc,
    PrimitiveTopology, IndexType, VertexPointer,
};

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub usage: BufferUsage,
    pub label: String,
    capacity: Cell<u64>,
    reallocations: Cell<u32>,
    upload_count: Cell<u32>,
    data: RefCell<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(usage: BufferUsage, label: String) -> Self {
        Self {
            usage,
            label,
            capacity: Cell::new(0),
            reallocations: Cell::new(0),
            upload_count: Cell::new(0),
            data: RefCell::new(Vec::new()),
        }
    }

    /// Number of times storage had to grow
    pub fn reallocations(&self) -> u32 {
        self.reallocations.get()
    }

    pub fn upload_count(&self) -> u32 {
        self.upload_count.get()
    }

    /// Bytes of the last upload
    pub fn data(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    /// Last upload reinterpreted as f32 values
    pub fn data_f32(&self) -> Vec<f32> {
        self.data
            .borrow()
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }
}

impl Buffer for MockBuffer {
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

// ============================================================================
// Mock Shader / Program
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    compiled: bool,
    log: String,
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn is_compiled(&self) -> bool {
        self.compiled
    }

    fn info_log(&self) -> &str {
        &self.log
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct MockProgram {
    pub vertex_source: String,
    pub fragment_source: String,
    linked: bool,
    log: String,
}

impl Program for MockProgram {
    fn is_linked(&self) -> bool {
        self.linked
    }

    fn info_log(&self) -> &str {
        &self.log
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct MockUniformLocation {
    pub name: String,
}

impl UniformLocation for MockUniformLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Owned copy of a `UniformUpload`
#[derive(Debug, Clone, PartialEq)]
pub enum MockUpload {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4 { transpose: bool, data: [f32; 16] },
}

impl From<UniformUpload<'_>> for MockUpload {
    fn from(value: UniformUpload<'_>) -> Self {
        match value {
            UniformUpload::Float(v) => MockUpload::Float(v),
            UniformUpload::Int(v) => MockUpload::Int(v),
            UniformUpload::Vec2(v) => MockUpload::Vec2(*v),
            UniformUpload::Vec3(v) => MockUpload::Vec3(*v),
            UniformUpload::Vec4(v) => MockUpload::Vec4(*v),
            UniformUpload::Mat4 { transpose, data } => MockUpload::Mat4 { transpose, data: *data },
        }
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    /// Recorded commands, in issue order
    pub commands: Vec<String>,
    /// Every uniform upload as (qualified name, value)
    pub uniform_uploads: Vec<(String, MockUpload)>,
    /// Every uniform name passed to `uniform_location`
    pub location_queries: Vec<String>,
    /// Attributes the linked program exposes (location = index)
    pub attribute_names: Vec<String>,
    /// Uniforms the linked program exposes, `None` = every name resolves
    pub uniform_names: Option<Vec<String>>,
    /// Stage whose compilation fails
    pub fail_compile: Option<ShaderStage>,
    /// Whether linking fails
    pub fail_link: bool,
    /// Whether draw calls fail
    pub fail_draw: bool,
    /// Number of upcoming draw calls that fail before draws succeed again
    pub fail_next_draws: u32,
    /// Last viewport set
    pub viewport: Option<Viewport>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            uniform_uploads: Vec::new(),
            location_queries: Vec::new(),
            attribute_names: vec!["position".to_string(), "uv".to_string(), "uvNorm".to_string()],
            uniform_names: None,
            fail_compile: None,
            fail_link: false,
            fail_draw: false,
            fail_next_draws: 0,
            viewport: None,
        }
    }

    /// Mock plus the same device as a `SharedGraphicsDevice`
    pub fn new_shared() -> (Rc<RefCell<MockGraphicsDevice>>, SharedGraphicsDevice) {
        let mock = Rc::new(RefCell::new(MockGraphicsDevice::new()));
        let shared: SharedGraphicsDevice = mock.clone();
        (mock, shared)
    }

    /// Commands starting with `prefix`
    pub fn commands_with(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| c.as_str())
            .collect()
    }

    /// Last value uploaded to `name`
    pub fn last_upload(&self, name: &str) -> Option<&MockUpload> {
        self.uniform_uploads
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.uniform_uploads.clear();
        self.location_queries.clear();
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn mock_buffer(buffer: &dyn Buffer) -> Result<&MockBuffer> {
    match buffer.as_any().downcast_ref::<MockBuffer>() {
        Some(b) => Ok(b),
        None => engine_bail!("wavefield::MockGraphicsDevice", "Buffer is not a MockBuffer"),
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Rc<dyn Buffer>> {
        self.commands.push(format!("create_buffer:{}", desc.label));
        Ok(Rc::new(MockBuffer::new(desc.usage, desc.label)))
    }

    fn upload_buffer(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()> {
        let buffer = mock_buffer(buffer)?;
        if data.len() as u64 > buffer.capacity.get() {
            buffer.capacity.set(data.len() as u64);
            buffer.reallocations.set(buffer.reallocations.get() + 1);
        }
        *buffer.data.borrow_mut() = data.to_vec();
        buffer.upload_count.set(buffer.upload_count.get() + 1);
        self.commands.push(format!("upload_buffer:{}", buffer.label));
        Ok(())
    }

    fn bind_buffer(&mut self, buffer: &dyn Buffer) -> Result<()> {
        let buffer = mock_buffer(buffer)?;
        self.commands.push(format!("bind_buffer:{}", buffer.label));
        Ok(())
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Rc<dyn Shader>> {
        let compiled = self.fail_compile != Some(desc.stage);
        let log = if compiled {
            String::new()
        } else {
            format!("ERROR: 0:1: mock {} compile failure", desc.stage.name())
        };
        self.commands.push(format!("create_shader:{}", desc.stage.name()));
        Ok(Rc::new(MockShader {
            stage: desc.stage,
            source: desc.source.to_string(),
            compiled,
            log,
        }))
    }

    fn create_program(
        &mut self,
        vertex: &dyn Shader,
        fragment: &dyn Shader,
    ) -> Result<Rc<dyn Program>> {
        let source_of = |shader: &dyn Shader| {
            shader
                .as_any()
                .downcast_ref::<MockShader>()
                .map(|s| s.source.clone())
                .unwrap_or_default()
        };
        let linked = !self.fail_link && vertex.is_compiled() && fragment.is_compiled();
        let log = if linked { String::new() } else { "mock link failure".to_string() };
        self.commands.push("create_program".to_string());
        Ok(Rc::new(MockProgram {
            vertex_source: source_of(vertex),
            fragment_source: source_of(fragment),
            linked,
            log,
        }))
    }

    fn use_program(&mut self, _program: &dyn Program) -> Result<()> {
        self.commands.push("use_program".to_string());
        Ok(())
    }

    fn attribute_location(&mut self, _program: &dyn Program, name: &str) -> Option<u32> {
        self.attribute_names
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32)
    }

    fn uniform_location(
        &mut self,
        _program: &dyn Program,
        name: &str,
    ) -> Option<Rc<dyn UniformLocation>> {
        self.location_queries.push(name.to_string());
        let known = match &self.uniform_names {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        };
        if known {
            Some(Rc::new(MockUniformLocation { name: name.to_string() }))
        } else {
            None
        }
    }

    fn enable_vertex_attribute(&mut self, location: u32, pointer: VertexPointer) -> Result<()> {
        self.commands.push(format!(
            "enable_vertex_attribute:{}:{}",
            location, pointer.component_count
        ));
        Ok(())
    }

    fn set_uniform(&mut self, location: &dyn UniformLocation, value: UniformUpload<'_>) -> Result<()> {
        self.commands.push(format!("set_uniform:{}", location.name()));
        self.uniform_uploads
            .push((location.name().to_string(), MockUpload::from(value)));
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(format!("set_viewport:{}x{}", viewport.width, viewport.height));
        self.viewport = Some(viewport);
        Ok(())
    }

    fn clear(&mut self, _desc: ClearDesc) -> Result<()> {
        self.commands.push("clear".to_string());
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: IndexType,
    ) -> Result<()> {
        if self.fail_draw {
            engine_bail!("wavefield::MockGraphicsDevice", "Mock draw failure");
        }
        if self.fail_next_draws > 0 {
            self.fail_next_draws -= 1;
            engine_bail!("wavefield::MockGraphicsDevice", "Mock draw failure");
        }
        self.commands.push(format!(
            "draw_indexed:{:?}:{}:{:?}",
            topology, index_count, index_type
        ));
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;

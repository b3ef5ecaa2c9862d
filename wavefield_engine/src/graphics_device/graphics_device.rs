/// GraphicsDevice trait - the capability surface the engine draws through

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, Shader, ShaderDesc, Program, UniformLocation, UniformUpload,
    Viewport, ClearDesc, PrimitiveTopology, IndexType, VertexPointer,
};

/// Device shared by every resource that issues GPU commands
///
/// A graphics context is bound to one thread, so sharing is `Rc<RefCell<..>>`.
pub type SharedGraphicsDevice = Rc<RefCell<dyn GraphicsDevice>>;

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Immediate-mode graphics device
///
/// Implemented by backend-specific devices (e.g., WebGlGraphicsDevice) and by
/// the mock device used in tests. Attribute pointers, uniform uploads and draws
/// always refer to the most recently bound buffer or used program, mirroring
/// the underlying state machine.
pub trait GraphicsDevice {
    // ===== BUFFERS =====

    /// Create an empty buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Rc<dyn Buffer>>;

    /// Upload `data` to `buffer`
    ///
    /// Data is replaced in place when it fits in the current storage,
    /// otherwise the storage is reallocated to `data.len()`.
    fn upload_buffer(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()>;

    /// Bind `buffer` to its usage target
    fn bind_buffer(&mut self, buffer: &dyn Buffer) -> Result<()>;

    // ===== SHADERS & PROGRAMS =====

    /// Compile a shader (compile failures are reported by `Shader::is_compiled`)
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Rc<dyn Shader>>;

    /// Link two shaders (link failures are reported by `Program::is_linked`)
    fn create_program(
        &mut self,
        vertex: &dyn Shader,
        fragment: &dyn Shader,
    ) -> Result<Rc<dyn Program>>;

    /// Make `program` current
    fn use_program(&mut self, program: &dyn Program) -> Result<()>;

    /// Location of a vertex attribute, `None` when the program does not use it
    fn attribute_location(&mut self, program: &dyn Program, name: &str) -> Option<u32>;

    /// Location of a leaf uniform, `None` when the program does not use it
    fn uniform_location(
        &mut self,
        program: &dyn Program,
        name: &str,
    ) -> Option<Rc<dyn UniformLocation>>;

    // ===== STATE =====

    /// Enable attribute `location` and point it at the bound vertex buffer
    fn enable_vertex_attribute(&mut self, location: u32, pointer: VertexPointer) -> Result<()>;

    /// Push a value to a uniform of the current program
    fn set_uniform(&mut self, location: &dyn UniformLocation, value: UniformUpload<'_>) -> Result<()>;

    /// Set the viewport rectangle
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    // ===== COMMANDS =====

    /// Clear the selected attachments
    fn clear(&mut self, desc: ClearDesc) -> Result<()>;

    /// Draw `index_count` indices from the bound index buffer
    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: IndexType,
    ) -> Result<()>;
}

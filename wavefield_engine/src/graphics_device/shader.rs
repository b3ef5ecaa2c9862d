/// Shader and program traits

use std::any::Any;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Descriptor for creating a shader from GLSL text
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Full shader source
    pub source: &'a str,
    /// Shader stage
    pub stage: ShaderStage,
}

/// Compiled shader object
///
/// Compilation failure is not an error at creation time: the object exists
/// and reports `is_compiled() == false` together with the driver log.
pub trait Shader {
    fn stage(&self) -> ShaderStage;

    /// Whether compilation succeeded
    fn is_compiled(&self) -> bool;

    /// Driver diagnostics (empty when there is nothing to report)
    fn info_log(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Linked shader program
pub trait Program {
    /// Whether linking succeeded
    fn is_linked(&self) -> bool;

    /// Driver diagnostics (empty when there is nothing to report)
    fn info_log(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Buffer trait and buffer descriptor

use std::any::Any;

/// Buffer usage (bind target)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Per-vertex attribute data (ARRAY_BUFFER)
    Vertex,
    /// Index data (ELEMENT_ARRAY_BUFFER)
    Index,
}

/// Numeric element type of buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// 32-bit float
    Float32,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
}

/// Descriptor for creating a buffer
///
/// Buffers start empty; storage is allocated by the first upload.
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Buffer usage
    pub usage: BufferUsage,
    /// Debug label
    pub label: String,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types. Data is written through
/// `GraphicsDevice::upload_buffer`; the buffer is released when dropped.
pub trait Buffer {
    /// Bind target of this buffer
    fn usage(&self) -> BufferUsage;

    /// Currently allocated storage in bytes
    fn capacity(&self) -> u64;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}

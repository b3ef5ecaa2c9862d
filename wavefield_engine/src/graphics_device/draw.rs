/// Draw-state types: viewport, clears, topology, vertex pointers

use bitflags::bitflags;
use crate::graphics_device::ElementType;

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

bitflags! {
    /// Attachments affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Clear command parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearDesc {
    pub mask: ClearMask,
    pub color: [f32; 4],
    pub depth: f32,
}

impl Default for ClearDesc {
    fn default() -> Self {
        Self {
            mask: ClearMask::COLOR | ClearMask::DEPTH,
            color: [0.0, 0.0, 0.0, 0.0],
            depth: 1.0,
        }
    }
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Filled triangles
    TriangleList,
    /// Wireframe lines
    LineList,
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices (max 65536 vertices)
    U16,
    /// 32-bit indices
    U32,
}

/// Vertex attribute pointer configuration
///
/// Attributes are tightly packed in their own buffer, so stride and offset
/// are zero for everything this engine draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexPointer {
    pub component_count: u32,
    pub element_type: ElementType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
}

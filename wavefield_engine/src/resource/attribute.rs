//! Vertex and index attributes.
//!
//! An `Attribute` exclusively owns one GPU buffer and the CPU-side values
//! that feed it. The buffer is created once and re-uploaded in place; it is
//! never recreated for the lifetime of the attribute.

use std::rc::Rc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, BufferUsage, ElementType, Program, SharedGraphicsDevice, VertexPointer,
};

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

/// Typed CPU-side attribute data
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    Float32(Vec<f32>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
}

impl AttributeValues {
    /// Number of scalar elements
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Float32(v) => v.len(),
            AttributeValues::Uint16(v) => v.len(),
            AttributeValues::Uint32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            AttributeValues::Float32(_) => ElementType::Float32,
            AttributeValues::Uint16(_) => ElementType::Uint16,
            AttributeValues::Uint32(_) => ElementType::Uint32,
        }
    }

    /// Raw bytes as uploaded to the device
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AttributeValues::Float32(v) => bytemuck::cast_slice(v),
            AttributeValues::Uint16(v) => bytemuck::cast_slice(v),
            AttributeValues::Uint32(v) => bytemuck::cast_slice(v),
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            AttributeValues::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32_mut(&mut self) -> Option<&mut Vec<f32>> {
        match self {
            AttributeValues::Float32(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// ATTRIBUTE
// ============================================================================

/// Attribute creation parameters
#[derive(Debug, Clone)]
pub struct AttributeDesc {
    /// Debug label of the owned buffer
    pub label: String,
    pub usage: BufferUsage,
    /// Components per vertex (ignored for index data)
    pub component_count: u32,
    pub normalized: bool,
    /// Initial values, uploaded at creation when present
    pub values: Option<AttributeValues>,
}

pub struct Attribute {
    device: SharedGraphicsDevice,
    buffer: Rc<dyn Buffer>,
    usage: BufferUsage,
    component_count: u32,
    normalized: bool,
    values: Option<AttributeValues>,
}

impl Attribute {
    /// Create the attribute and its buffer
    pub fn new(device: SharedGraphicsDevice, desc: AttributeDesc) -> Result<Self> {
        let buffer = device.borrow_mut().create_buffer(BufferDesc {
            usage: desc.usage,
            label: desc.label,
        })?;
        let attribute = Self {
            device,
            buffer,
            usage: desc.usage,
            component_count: desc.component_count,
            normalized: desc.normalized,
            values: desc.values,
        };
        attribute.update()?;
        Ok(attribute)
    }

    // ===== ACCESSORS =====

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub fn component_count(&self) -> u32 {
        self.component_count
    }

    pub fn buffer(&self) -> &Rc<dyn Buffer> {
        &self.buffer
    }

    pub fn values(&self) -> Option<&AttributeValues> {
        self.values.as_ref()
    }

    /// In-place access to the values; call `update` afterwards
    pub fn values_mut(&mut self) -> Option<&mut AttributeValues> {
        self.values.as_mut()
    }

    /// Number of scalar elements currently held
    pub fn element_count(&self) -> u32 {
        self.values.as_ref().map_or(0, |v| v.len() as u32)
    }

    /// Pointer configuration for vertex data
    pub fn vertex_pointer(&self) -> VertexPointer {
        VertexPointer {
            component_count: self.component_count,
            element_type: self
                .values
                .as_ref()
                .map_or(ElementType::Float32, |v| v.element_type()),
            normalized: self.normalized,
            stride: 0,
            offset: 0,
        }
    }

    // ===== UPLOAD =====

    /// Re-upload the values (no-op when there are none)
    pub fn update(&self) -> Result<()> {
        if let Some(values) = &self.values {
            let mut device = self.device.borrow_mut();
            device.bind_buffer(self.buffer.as_ref())?;
            device.upload_buffer(self.buffer.as_ref(), values.as_bytes())?;
        }
        Ok(())
    }

    /// Replace the values and upload them
    pub fn set_values(&mut self, values: AttributeValues) -> Result<()> {
        self.values = Some(values);
        self.update()
    }

    // ===== BINDING =====

    /// Resolve the shader location of `name` in `program`
    ///
    /// For vertex data the pointer is also configured at the resolved
    /// location. Index data has no location.
    pub fn attach(&self, name: &str, program: &dyn Program) -> Result<Option<u32>> {
        if self.usage == BufferUsage::Index {
            return Ok(None);
        }
        let mut device = self.device.borrow_mut();
        let location = device.attribute_location(program, name);
        if let Some(location) = location {
            device.bind_buffer(self.buffer.as_ref())?;
            device.enable_vertex_attribute(location, self.vertex_pointer())?;
        }
        Ok(location)
    }

    /// Rebind the buffer for drawing
    ///
    /// Vertex data re-enables its pointer at `location`, since another mesh
    /// may have used the same attribute slot since the last draw.
    pub fn bind(&self, location: Option<u32>) -> Result<()> {
        let mut device = self.device.borrow_mut();
        device.bind_buffer(self.buffer.as_ref())?;
        if let (BufferUsage::Vertex, Some(location)) = (self.usage, location) {
            device.enable_vertex_attribute(location, self.vertex_pointer())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;

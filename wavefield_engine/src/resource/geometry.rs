//! Planar grid geometry.
//!
//! A `PlaneGeometry` owns the four attributes of a subdivided rectangle:
//!
//! - **position**: 3 floats per vertex, in the plane selected by `AxisOrder`
//! - **uv**: 2 floats per vertex in `[0, 1]`, v pointing up
//! - **uvNorm**: 2 floats per vertex in `[-1, 1]`
//! - **index**: 2 triangles per grid cell
//!
//! # Layout
//!
//! ```text
//! row 0   0 ── 1 ── 2        i = row * (x_segments + 1) + col
//!         │ ╲  │ ╲  │
//! row 1   3 ── 4 ── 5        cell (col, row):
//!         │ ╲  │ ╲  │          {i, i + 1 + x, i + 1}
//! row 2   6 ── 7 ── 8          {i + 1, i + 1 + x, i + 2 + x}
//! ```
//!
//! Resizing never recreates buffers: `set_topology` rewrites uv, uvNorm and
//! index, `set_size` rewrites position in place when the vertex count is
//! unchanged.

use std::fmt;
use std::str::FromStr;
use crate::error::{Error, Result};
use crate::graphics_device::{BufferUsage, IndexType, SharedGraphicsDevice};
use crate::resource::attribute::{Attribute, AttributeDesc, AttributeValues};
use crate::engine_error;

/// Largest vertex count addressable with 16-bit indices
const MAX_U16_VERTICES: u32 = 65536;

// ============================================================================
// AXIS ORDER
// ============================================================================

/// Pair of axes the plane's columns and rows are written to
///
/// Parsed from a 2-letter selector such as `"xz"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOrder {
    /// Component receiving the column coordinate (0 = x, 1 = y, 2 = z)
    pub first: usize,
    /// Component receiving the negated row coordinate
    pub second: usize,
}

impl AxisOrder {
    pub const XY: AxisOrder = AxisOrder { first: 0, second: 1 };
    pub const XZ: AxisOrder = AxisOrder { first: 0, second: 2 };

    /// Component left at zero
    pub fn third(&self) -> usize {
        3 - self.first - self.second
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        AxisOrder::XZ
    }
}

impl FromStr for AxisOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let axis = |c: char| match c {
            'x' | 'X' => Some(0),
            'y' | 'Y' => Some(1),
            'z' | 'Z' => Some(2),
            _ => None,
        };
        let mut chars = s.chars();
        match (chars.next().and_then(axis), chars.next().and_then(axis), chars.next()) {
            (Some(first), Some(second), None) if first != second => Ok(AxisOrder { first, second }),
            _ => Err(Error::InvalidResource(format!("invalid axis selector '{}'", s))),
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [char; 3] = ['x', 'y', 'z'];
        write!(f, "{}{}", NAMES[self.first], NAMES[self.second])
    }
}

// ============================================================================
// GEOMETRY ATTRIBUTE
// ============================================================================

/// The four attributes of a plane, in binding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryAttribute {
    Position,
    Uv,
    UvNorm,
    Index,
}

impl GeometryAttribute {
    pub const ALL: [GeometryAttribute; 4] = [
        GeometryAttribute::Position,
        GeometryAttribute::Uv,
        GeometryAttribute::UvNorm,
        GeometryAttribute::Index,
    ];

    /// Shader attribute name
    pub fn name(&self) -> &'static str {
        match self {
            GeometryAttribute::Position => "position",
            GeometryAttribute::Uv => "uv",
            GeometryAttribute::UvNorm => "uvNorm",
            GeometryAttribute::Index => "index",
        }
    }
}

// ============================================================================
// PLANE GEOMETRY
// ============================================================================

pub struct PlaneGeometry {
    x_segments: u32,
    y_segments: u32,
    width: f32,
    height: f32,
    axis_order: AxisOrder,
    index_type: IndexType,
    position: Attribute,
    uv: Attribute,
    uv_norm: Attribute,
    index: Attribute,
}

impl PlaneGeometry {
    /// Create a `width` x `height` plane with the given subdivision
    pub fn new(
        device: SharedGraphicsDevice,
        width: f32,
        height: f32,
        x_segments: u32,
        y_segments: u32,
        axis_order: AxisOrder,
    ) -> Result<Self> {
        let vertex = |label: &str, component_count: u32| AttributeDesc {
            label: label.to_string(),
            usage: BufferUsage::Vertex,
            component_count,
            normalized: false,
            values: None,
        };

        let mut geometry = Self {
            x_segments: 0,
            y_segments: 0,
            width,
            height,
            axis_order,
            index_type: IndexType::U16,
            position: Attribute::new(device.clone(), vertex("position", 3))?,
            uv: Attribute::new(device.clone(), vertex("uv", 2))?,
            uv_norm: Attribute::new(device.clone(), vertex("uvNorm", 2))?,
            index: Attribute::new(
                device,
                AttributeDesc {
                    label: "index".to_string(),
                    usage: BufferUsage::Index,
                    component_count: 1,
                    normalized: false,
                    values: None,
                },
            )?,
        };
        geometry.set_topology(x_segments, y_segments)?;
        geometry.set_size(width, height, axis_order)?;
        Ok(geometry)
    }

    // ===== ACCESSORS =====

    pub fn x_segments(&self) -> u32 {
        self.x_segments
    }

    pub fn y_segments(&self) -> u32 {
        self.y_segments
    }

    /// `(x + 1) * (y + 1)`
    pub fn vertex_count(&self) -> u32 {
        (self.x_segments + 1) * (self.y_segments + 1)
    }

    /// Number of triangles, `2 * x * y`
    pub fn quad_count(&self) -> u32 {
        2 * self.x_segments * self.y_segments
    }

    /// Number of indices, three per triangle
    pub fn index_count(&self) -> u32 {
        self.index.element_count()
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn attribute(&self, which: GeometryAttribute) -> &Attribute {
        match which {
            GeometryAttribute::Position => &self.position,
            GeometryAttribute::Uv => &self.uv,
            GeometryAttribute::UvNorm => &self.uv_norm,
            GeometryAttribute::Index => &self.index,
        }
    }

    // ===== TOPOLOGY =====

    /// Regenerate uv, uvNorm and index for an `x_segments` x `y_segments` grid
    pub fn set_topology(&mut self, x_segments: u32, y_segments: u32) -> Result<()> {
        if x_segments == 0 || y_segments == 0 {
            engine_error!(
                "wavefield::PlaneGeometry",
                "Segment counts must be positive (got {}x{})",
                x_segments, y_segments
            );
            return Err(Error::InvalidResource(format!(
                "segment counts must be positive, got {}x{}",
                x_segments, y_segments
            )));
        }

        self.x_segments = x_segments;
        self.y_segments = y_segments;

        let vertex_count = self.vertex_count() as usize;
        let xs = x_segments as f32;
        let ys = y_segments as f32;

        let mut uv = vec![0.0f32; 2 * vertex_count];
        let mut uv_norm = vec![0.0f32; 2 * vertex_count];
        let mut indices: Vec<u32> = Vec::with_capacity(3 * self.quad_count() as usize);

        for row in 0..=y_segments {
            for col in 0..=x_segments {
                let i = row * (x_segments + 1) + col;
                let v = 2 * i as usize;
                uv[v] = col as f32 / xs;
                uv[v + 1] = 1.0 - row as f32 / ys;
                uv_norm[v] = 2.0 * col as f32 / xs - 1.0;
                uv_norm[v + 1] = 1.0 - 2.0 * row as f32 / ys;

                if col < x_segments && row < y_segments {
                    indices.extend_from_slice(&[
                        i,
                        i + 1 + x_segments,
                        i + 1,
                        i + 1,
                        i + 1 + x_segments,
                        i + 2 + x_segments,
                    ]);
                }
            }
        }

        self.index_type = if self.vertex_count() > MAX_U16_VERTICES {
            IndexType::U32
        } else {
            IndexType::U16
        };
        let index_values = match self.index_type {
            IndexType::U16 => AttributeValues::Uint16(indices.into_iter().map(|i| i as u16).collect()),
            IndexType::U32 => AttributeValues::Uint32(indices),
        };

        self.uv.set_values(AttributeValues::Float32(uv))?;
        self.uv_norm.set_values(AttributeValues::Float32(uv_norm))?;
        self.index.set_values(index_values)?;
        Ok(())
    }

    // ===== SIZE =====

    /// Recompute vertex positions for a `width` x `height` plane centred on
    /// the origin
    ///
    /// Columns map to `axis_order.first`, rows to the negated
    /// `axis_order.second`, and the remaining component is zero. The
    /// position storage is reused when the vertex count is unchanged.
    pub fn set_size(&mut self, width: f32, height: f32, axis_order: AxisOrder) -> Result<()> {
        self.width = width;
        self.height = height;
        self.axis_order = axis_order;

        let len = 3 * self.vertex_count() as usize;
        let x_segments = self.x_segments;
        let y_segments = self.y_segments;

        let reuse = matches!(
            self.position.values(),
            Some(AttributeValues::Float32(values)) if values.len() == len
        );
        if reuse {
            if let Some(position) = self.position.values_mut().and_then(|v| v.as_f32_mut()) {
                fill_positions(position, x_segments, y_segments, width, height, axis_order);
            }
            self.position.update()
        } else {
            let mut position = vec![0.0f32; len];
            fill_positions(&mut position, x_segments, y_segments, width, height, axis_order);
            self.position.set_values(AttributeValues::Float32(position))
        }
    }
}

fn fill_positions(
    position: &mut [f32],
    x_segments: u32,
    y_segments: u32,
    width: f32,
    height: f32,
    axis_order: AxisOrder,
) {
    let origin_x = width / -2.0;
    let origin_y = height / -2.0;
    let spacing_x = width / x_segments as f32;
    let spacing_y = height / y_segments as f32;

    for row in 0..=y_segments {
        let y = origin_y + row as f32 * spacing_y;
        for col in 0..=x_segments {
            let x = origin_x + col as f32 * spacing_x;
            let base = 3 * (row * (x_segments + 1) + col) as usize;
            position[base + axis_order.first] = x;
            position[base + axis_order.second] = -y;
            position[base + axis_order.third()] = 0.0;
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;

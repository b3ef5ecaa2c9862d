//! Resource module
//!
//! GPU-backed building blocks of a drawable: attributes, the planar
//! geometry, shader materials and meshes.

pub mod attribute;
pub mod geometry;
pub mod material;
pub mod mesh;

pub use attribute::{Attribute, AttributeDesc, AttributeValues};
pub use geometry::{AxisOrder, GeometryAttribute, PlaneGeometry};
pub use material::{
    Material, UniformBinding, UniformScope,
    PRECISION_PREFIX, VERTEX_ATTRIBUTES,
};
pub use mesh::Mesh;

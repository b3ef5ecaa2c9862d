//! Drawable mesh.
//!
//! A `Mesh` pairs one `PlaneGeometry` with one `Material`. Attribute
//! locations are resolved once at construction; every `draw` then follows
//! the same sequence:
//!
//! 1. activate the material's program
//! 2. push every bound uniform (the per-frame sync point)
//! 3. rebind position, uv, uvNorm and index
//! 4. issue one indexed draw of the whole index buffer

use crate::error::Result;
use crate::graphics_device::{PrimitiveTopology, SharedGraphicsDevice};
use crate::resource::geometry::{GeometryAttribute, PlaneGeometry};
use crate::resource::material::Material;
use crate::engine_trace;

pub struct Mesh {
    device: SharedGraphicsDevice,
    geometry: PlaneGeometry,
    material: Material,
    attribute_locations: Vec<(GeometryAttribute, Option<u32>)>,
    wireframe: bool,
}

impl Mesh {
    /// Create a mesh and resolve its attribute locations
    pub fn new(device: SharedGraphicsDevice, geometry: PlaneGeometry, material: Material) -> Result<Self> {
        let mut attribute_locations = Vec::with_capacity(GeometryAttribute::ALL.len());
        for which in GeometryAttribute::ALL {
            let location = geometry
                .attribute(which)
                .attach(which.name(), material.program().as_ref())?;
            attribute_locations.push((which, location));
        }

        Ok(Self {
            device,
            geometry,
            material,
            attribute_locations,
            wireframe: false,
        })
    }

    // ===== ACCESSORS =====

    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    /// Mutable geometry, for topology and size changes
    pub fn geometry_mut(&mut self) -> &mut PlaneGeometry {
        &mut self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Location resolved for `which` (`None` for index data and unused attributes)
    pub fn attribute_location(&self, which: GeometryAttribute) -> Option<u32> {
        self.attribute_locations
            .iter()
            .find(|(w, _)| *w == which)
            .and_then(|(_, location)| *location)
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Draw as lines instead of filled triangles
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    pub fn topology(&self) -> PrimitiveTopology {
        if self.wireframe {
            PrimitiveTopology::LineList
        } else {
            PrimitiveTopology::TriangleList
        }
    }

    // ===== DRAW =====

    pub fn draw(&self) -> Result<()> {
        self.device
            .borrow_mut()
            .use_program(self.material.program().as_ref())?;

        self.material.apply_uniforms()?;

        for (which, location) in &self.attribute_locations {
            self.geometry.attribute(*which).bind(*location)?;
        }

        let index_count = self.geometry.index_count();
        engine_trace!("wavefield::Mesh", "draw {} indices", index_count);
        self.device
            .borrow_mut()
            .draw_indexed(self.topology(), index_count, self.geometry.index_type())
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;

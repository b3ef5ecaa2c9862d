/// Shader material.
///
/// A Material assembles full GLSL sources from a fixed prefix, the
/// declarations generated by the common and material uniform sets, and the
/// shader bodies. It compiles and links them, then flattens both uniform
/// sets into a binding table of (leaf uniform, resolved location) pairs.
///
/// Compile and link failures are logged and do not abort construction: the
/// material is still returned, wrapping a program that reports
/// `is_linked() == false`.

use std::rc::Rc;
use crate::error::Result;
use crate::graphics_device::{
    Program, Shader, ShaderDesc, ShaderStage, SharedGraphicsDevice, UniformLocation,
};
use crate::uniform::{SharedUniforms, Uniform, UniformPath, UniformSet};
use crate::{engine_debug, engine_error, engine_warn};

/// Precision statement opening both stages
pub const PRECISION_PREFIX: &str = "precision highp float;\n";

/// Built-in vertex attributes of every material
pub const VERTEX_ATTRIBUTES: &str =
    "attribute vec4 position;\nattribute vec2 uv;\nattribute vec2 uvNorm;\n";

// ===== BINDINGS =====

/// Uniform set a binding reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformScope {
    /// Renderer-wide uniforms (projection, resolution, ...)
    Common,
    /// The material's own uniforms
    Material,
}

/// One entry of the binding table
pub struct UniformBinding {
    scope: UniformScope,
    name: String,
    path: UniformPath,
    location: Rc<dyn UniformLocation>,
}

impl UniformBinding {
    pub fn scope(&self) -> UniformScope {
        self.scope
    }

    /// Qualified GLSL name ("u_waveLayers[2].noiseSeed")
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &UniformPath {
        &self.path
    }

    pub fn location(&self) -> &Rc<dyn UniformLocation> {
        &self.location
    }
}

// ===== MATERIAL =====

pub struct Material {
    device: SharedGraphicsDevice,
    common: SharedUniforms,
    uniforms: UniformSet,
    vertex_source: String,
    fragment_source: String,
    vertex_shader: Rc<dyn Shader>,
    fragment_shader: Rc<dyn Shader>,
    program: Rc<dyn Program>,
    bindings: Vec<UniformBinding>,
}

impl Material {
    /// Build, compile and link a material
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics device
    /// * `common` - Renderer-wide uniforms, declared and bound before `uniforms`
    /// * `vertex_body` - Vertex shader text following the declarations
    /// * `fragment_body` - Fragment shader text following the declarations
    /// * `uniforms` - The material's own uniforms
    pub fn new(
        device: SharedGraphicsDevice,
        common: SharedUniforms,
        vertex_body: &str,
        fragment_body: &str,
        uniforms: UniformSet,
    ) -> Result<Self> {
        let (vertex_source, fragment_source) =
            Self::assemble_sources(&common.borrow(), &uniforms, vertex_body, fragment_body);

        let (vertex_shader, fragment_shader, program) = {
            let mut dev = device.borrow_mut();
            let vertex_shader = dev.create_shader(ShaderDesc {
                source: &vertex_source,
                stage: ShaderStage::Vertex,
            })?;
            report_compile(vertex_shader.as_ref(), &vertex_source);
            let fragment_shader = dev.create_shader(ShaderDesc {
                source: &fragment_source,
                stage: ShaderStage::Fragment,
            })?;
            report_compile(fragment_shader.as_ref(), &fragment_source);

            let program = dev.create_program(vertex_shader.as_ref(), fragment_shader.as_ref())?;
            if !program.is_linked() {
                engine_error!("wavefield::Material", "Failed to link program: {}", program.info_log());
            }
            (vertex_shader, fragment_shader, program)
        };

        let mut material = Self {
            device,
            common,
            uniforms,
            vertex_source,
            fragment_source,
            vertex_shader,
            fragment_shader,
            program,
            bindings: Vec::new(),
        };
        material.build_bindings();
        Ok(material)
    }

    /// Full vertex and fragment sources for the given uniform sets
    pub fn assemble_sources(
        common: &UniformSet,
        own: &UniformSet,
        vertex_body: &str,
        fragment_body: &str,
    ) -> (String, String) {
        let vertex = format!(
            "{}{}{}\n{}\n{}",
            PRECISION_PREFIX,
            VERTEX_ATTRIBUTES,
            common.declarations(ShaderStage::Vertex),
            own.declarations(ShaderStage::Vertex),
            vertex_body
        );
        let fragment = format!(
            "{}{}\n{}\n{}",
            PRECISION_PREFIX,
            common.declarations(ShaderStage::Fragment),
            own.declarations(ShaderStage::Fragment),
            fragment_body
        );
        (vertex, fragment)
    }

    fn build_bindings(&mut self) {
        let mut bindings = Vec::new();
        {
            let common = self.common.borrow();
            let mut device = self.device.borrow_mut();
            let scopes = [(UniformScope::Common, &*common), (UniformScope::Material, &self.uniforms)];
            for (scope, set) in scopes {
                for leaf in set.leaves() {
                    match device.uniform_location(self.program.as_ref(), &leaf.name) {
                        Some(location) => bindings.push(UniformBinding {
                            scope,
                            name: leaf.name,
                            path: leaf.path,
                            location,
                        }),
                        None => engine_debug!(
                            "wavefield::Material",
                            "Uniform '{}' is not used by the program",
                            leaf.name
                        ),
                    }
                }
            }
        }
        self.bindings = bindings;
    }

    // ===== ACCESSORS =====

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub fn vertex_shader(&self) -> &Rc<dyn Shader> {
        &self.vertex_shader
    }

    pub fn fragment_shader(&self) -> &Rc<dyn Shader> {
        &self.fragment_shader
    }

    pub fn program(&self) -> &Rc<dyn Program> {
        &self.program
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_linked()
    }

    pub fn bindings(&self) -> &[UniformBinding] {
        &self.bindings
    }

    pub fn common_uniforms(&self) -> &SharedUniforms {
        &self.common
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    /// Mutable access to the material's own uniform values
    ///
    /// Values may change freely; adding uniforms or reshaping arrays after
    /// construction leaves them unbound.
    pub fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    pub fn uniform_mut(&mut self, name: &str) -> Option<&mut Uniform> {
        self.uniforms.get_mut(name)
    }

    // ===== DRAW =====

    /// Push every bound uniform's current value to the device
    pub fn apply_uniforms(&self) -> Result<()> {
        let common = self.common.borrow();
        let mut device = self.device.borrow_mut();
        for binding in &self.bindings {
            let set = match binding.scope {
                UniformScope::Common => &*common,
                UniformScope::Material => &self.uniforms,
            };
            match set.resolve(&binding.path) {
                Some(uniform) => uniform.update(&mut *device, binding.location.as_ref())?,
                None => engine_warn!(
                    "wavefield::Material",
                    "Binding '{}' no longer matches its uniform set",
                    binding.name
                ),
            }
        }
        Ok(())
    }
}

fn report_compile(shader: &dyn Shader, source: &str) {
    if !shader.is_compiled() {
        engine_error!(
            "wavefield::Material",
            "Failed to compile {} shader: {}",
            shader.stage().name(),
            shader.info_log()
        );
        engine_debug!("wavefield::Material", "Source:\n{}", source);
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;

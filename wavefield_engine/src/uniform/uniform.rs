/// Uniform - typed shader value, declaration emitter and device upload dispatch

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderStage, UniformLocation, UniformUpload};
use crate::{engine_error, engine_warn};

// ============================================================================
// Kind
// ============================================================================

/// Uniform kind, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    /// Homogeneous sequence of child uniforms
    Array,
    /// Named fields, each a child uniform
    Struct,
}

impl UniformKind {
    /// GLSL type keyword
    pub fn glsl_name(&self) -> &'static str {
        match self {
            UniformKind::Float => "float",
            UniformKind::Int => "int",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec3 => "vec3",
            UniformKind::Vec4 => "vec4",
            UniformKind::Mat4 => "mat4",
            UniformKind::Array => "array",
            UniformKind::Struct => "struct",
        }
    }

    /// Parse a GLSL type keyword
    ///
    /// Unknown names are logged and treated as `Float`.
    pub fn from_glsl_name(name: &str) -> Self {
        match name {
            "float" => UniformKind::Float,
            "int" => UniformKind::Int,
            "vec2" => UniformKind::Vec2,
            "vec3" => UniformKind::Vec3,
            "vec4" => UniformKind::Vec4,
            "mat4" => UniformKind::Mat4,
            "array" => UniformKind::Array,
            "struct" => UniformKind::Struct,
            other => {
                engine_warn!("wavefield::Uniform", "Unknown uniform kind '{}', using float", other);
                UniformKind::Float
            }
        }
    }

    /// Whether values of this kind are uploaded directly (not expanded)
    pub fn is_leaf(&self) -> bool {
        !matches!(self, UniformKind::Array | UniformKind::Struct)
    }
}

// ============================================================================
// Value
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix
    Mat4([f32; 16]),
    Array(Vec<Uniform>),
    Struct(Vec<(String, Uniform)>),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat4(_) => UniformKind::Mat4,
            UniformValue::Array(_) => UniformKind::Array,
            UniformValue::Struct(_) => UniformKind::Struct,
        }
    }
}

// ============================================================================
// Uniform
// ============================================================================

/// Named-by-its-container shader value
///
/// A uniform does not know its own name: the enclosing `UniformSet`, array
/// or struct provides it when declarations are generated or locations are
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    kind: UniformKind,
    value: Option<UniformValue>,
    transpose: bool,
    exclude_from: Option<ShaderStage>,
}

impl Uniform {
    /// Create an unset uniform of `kind`
    pub fn new(kind: UniformKind) -> Self {
        Self { kind, value: None, transpose: false, exclude_from: None }
    }

    fn with_value(value: UniformValue) -> Self {
        Self { kind: value.kind(), value: Some(value), transpose: false, exclude_from: None }
    }

    pub fn float(value: f32) -> Self {
        Self::with_value(UniformValue::Float(value))
    }

    pub fn int(value: i32) -> Self {
        Self::with_value(UniformValue::Int(value))
    }

    pub fn vec2(value: [f32; 2]) -> Self {
        Self::with_value(UniformValue::Vec2(value))
    }

    pub fn vec3(value: [f32; 3]) -> Self {
        Self::with_value(UniformValue::Vec3(value))
    }

    pub fn vec4(value: [f32; 4]) -> Self {
        Self::with_value(UniformValue::Vec4(value))
    }

    pub fn mat4(value: [f32; 16]) -> Self {
        Self::with_value(UniformValue::Mat4(value))
    }

    /// Array of children sharing one kind
    pub fn array(children: Vec<Uniform>) -> Result<Self> {
        check_homogeneous(&children)?;
        Ok(Self::with_value(UniformValue::Array(children)))
    }

    pub fn structure<S: Into<String>>(fields: Vec<(S, Uniform)>) -> Self {
        Self::with_value(UniformValue::Struct(
            fields.into_iter().map(|(name, u)| (name.into(), u)).collect(),
        ))
    }

    /// Set the transpose flag used by matrix uploads
    pub fn with_transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Leave this uniform out of `stage`'s declarations
    pub fn excluded_from(mut self, stage: ShaderStage) -> Self {
        self.exclude_from = Some(stage);
        self
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    pub fn value(&self) -> Option<&UniformValue> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn transpose(&self) -> bool {
        self.transpose
    }

    pub fn exclude_from(&self) -> Option<ShaderStage> {
        self.exclude_from
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            Some(UniformValue::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match self.value {
            Some(UniformValue::Vec2(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self.value {
            Some(UniformValue::Vec3(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<[f32; 4]> {
        match self.value {
            Some(UniformValue::Vec4(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_mat4(&self) -> Option<&[f32; 16]> {
        match &self.value {
            Some(UniformValue::Mat4(v)) => Some(v),
            _ => None,
        }
    }

    // ===== MUTATION =====

    /// Replace the value, keeping the kind
    pub fn set_value(&mut self, value: UniformValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(Error::InvalidUniform(format!(
                "cannot assign a {} value to a {} uniform",
                value.kind().glsl_name(),
                self.kind.glsl_name()
            )));
        }
        if let UniformValue::Array(children) = &value {
            check_homogeneous(children)?;
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn clear_value(&mut self) {
        self.value = None;
    }

    pub fn set_float(&mut self, value: f32) -> Result<()> {
        self.set_value(UniformValue::Float(value))
    }

    pub fn set_int(&mut self, value: i32) -> Result<()> {
        self.set_value(UniformValue::Int(value))
    }

    pub fn set_vec2(&mut self, value: [f32; 2]) -> Result<()> {
        self.set_value(UniformValue::Vec2(value))
    }

    pub fn set_vec3(&mut self, value: [f32; 3]) -> Result<()> {
        self.set_value(UniformValue::Vec3(value))
    }

    pub fn set_vec4(&mut self, value: [f32; 4]) -> Result<()> {
        self.set_value(UniformValue::Vec4(value))
    }

    pub fn set_mat4(&mut self, value: [f32; 16]) -> Result<()> {
        self.set_value(UniformValue::Mat4(value))
    }

    // ===== CHILDREN =====

    /// Array child at `index`
    pub fn element(&self, index: usize) -> Option<&Uniform> {
        match &self.value {
            Some(UniformValue::Array(children)) => children.get(index),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Uniform> {
        match &mut self.value {
            Some(UniformValue::Array(children)) => children.get_mut(index),
            _ => None,
        }
    }

    /// Number of array children (0 for every other kind)
    pub fn len(&self) -> usize {
        match &self.value {
            Some(UniformValue::Array(children)) => children.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Struct field called `name`
    pub fn field(&self, name: &str) -> Option<&Uniform> {
        match &self.value {
            Some(UniformValue::Struct(fields)) => {
                fields.iter().find(|(n, _)| n == name).map(|(_, u)| u)
            }
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Uniform> {
        match &mut self.value {
            Some(UniformValue::Struct(fields)) => {
                fields.iter_mut().find(|(n, _)| n == name).map(|(_, u)| u)
            }
            _ => None,
        }
    }

    // ===== DEVICE =====

    /// Push the value to `location`
    ///
    /// No-op when the value is unset. Composite uniforms are never bound to
    /// a location directly; their leaves are.
    pub fn update(&self, device: &mut dyn GraphicsDevice, location: &dyn UniformLocation) -> Result<()> {
        let upload = match &self.value {
            None => return Ok(()),
            Some(UniformValue::Float(v)) => UniformUpload::Float(*v),
            Some(UniformValue::Int(v)) => UniformUpload::Int(*v),
            Some(UniformValue::Vec2(v)) => UniformUpload::Vec2(v),
            Some(UniformValue::Vec3(v)) => UniformUpload::Vec3(v),
            Some(UniformValue::Vec4(v)) => UniformUpload::Vec4(v),
            Some(UniformValue::Mat4(v)) => UniformUpload::Mat4 { transpose: self.transpose, data: v },
            Some(UniformValue::Array(_)) | Some(UniformValue::Struct(_)) => {
                engine_warn!(
                    "wavefield::Uniform",
                    "Composite uniform bound directly to '{}', skipped",
                    location.name()
                );
                return Ok(());
            }
        };
        device.set_uniform(location, upload)
    }

    // ===== DECLARATIONS =====

    /// GLSL declaration of this uniform under `name` for `stage`
    ///
    /// `array_length > 0` adds a `[n]` suffix. Returns an empty string when
    /// the uniform is excluded from `stage`, and for composites without
    /// children (logged as an error).
    pub fn declaration(&self, name: &str, stage: ShaderStage, array_length: usize) -> String {
        if self.exclude_from == Some(stage) {
            return String::new();
        }

        let suffix = if array_length > 0 { format!("[{}]", array_length) } else { String::new() };

        match (&self.kind, &self.value) {
            (UniformKind::Array, Some(UniformValue::Array(children))) if !children.is_empty() => {
                format!(
                    "{}\nconst int {}_length = {};",
                    children[0].declaration(name, stage, children.len()),
                    name,
                    children.len()
                )
            }
            (UniformKind::Struct, Some(UniformValue::Struct(fields))) => {
                let body: String = fields
                    .iter()
                    .map(|(field, u)| {
                        let decl = u.declaration(field, stage, 0);
                        match decl.strip_prefix("uniform") {
                            Some(rest) => rest.to_string(),
                            None => decl,
                        }
                    })
                    .collect();
                format!(
                    "uniform struct {} {{\n{}\n}} {}{};",
                    struct_type_name(name),
                    body,
                    name,
                    suffix
                )
            }
            (UniformKind::Array, _) | (UniformKind::Struct, _) => {
                engine_error!(
                    "wavefield::Uniform",
                    "Uniform '{}' has no {} contents to declare",
                    name,
                    self.kind.glsl_name()
                );
                String::new()
            }
            (kind, _) => format!("uniform {} {}{};", kind.glsl_name(), name, suffix),
        }
    }
}

/// GLSL struct type name for a uniform name: "u_vertDeform" -> "VertDeform"
pub fn struct_type_name(name: &str) -> String {
    let base = name.strip_prefix("u_").unwrap_or(name);
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_homogeneous(children: &[Uniform]) -> Result<()> {
    if let Some(first) = children.first() {
        if let Some(other) = children.iter().find(|c| c.kind != first.kind) {
            return Err(Error::InvalidUniform(format!(
                "array mixes {} and {} elements",
                first.kind.glsl_name(),
                other.kind.glsl_name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;

/// Conversions from engine enums to WebGL enums

use wavefield_engine::wavefield::device::{
    BufferUsage, ClearMask, ElementType, IndexType, PrimitiveTopology, ShaderStage,
};
use web_sys::WebGlRenderingContext as Gl;

pub(crate) fn buffer_target(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Vertex => Gl::ARRAY_BUFFER,
        BufferUsage::Index => Gl::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => Gl::VERTEX_SHADER,
        ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
    }
}

pub(crate) fn primitive_mode(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::TriangleList => Gl::TRIANGLES,
        PrimitiveTopology::LineList => Gl::LINES,
    }
}

pub(crate) fn index_type(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U16 => Gl::UNSIGNED_SHORT,
        IndexType::U32 => Gl::UNSIGNED_INT,
    }
}

pub(crate) fn element_type(element_type: ElementType) -> u32 {
    match element_type {
        ElementType::Float32 => Gl::FLOAT,
        ElementType::Uint16 => Gl::UNSIGNED_SHORT,
        ElementType::Uint32 => Gl::UNSIGNED_INT,
    }
}

pub(crate) fn clear_bits(mask: ClearMask) -> u32 {
    let mut bits = 0;
    if mask.contains(ClearMask::COLOR) {
        bits |= Gl::COLOR_BUFFER_BIT;
    }
    if mask.contains(ClearMask::DEPTH) {
        bits |= Gl::DEPTH_BUFFER_BIT;
    }
    bits
}

/// WebGL 1 rejects `transpose = true`; transpose on the CPU instead
pub(crate) fn upload_matrix(transpose: bool, data: &[f32; 16]) -> [f32; 16] {
    if !transpose {
        return *data;
    }
    let mut out = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = data[row * 4 + col];
        }
    }
    out
}

#[cfg(test)]
#[path = "webgl_format_tests.rs"]
mod tests;

/// Gradient material - uniform layout and shader text of the animated plane
///
/// The vertex stage displaces the plane with simplex noise and mixes one
/// noise-driven colour layer per palette entry after the first; the fragment
/// stage writes the interpolated colour, optionally shading the top edge.

use crate::animation::{ACTIVE_COLORS_UNIFORM, GLOBAL_UNIFORM, SHADOW_POWER_UNIFORM, TIME_UNIFORM};
use crate::error::{Error, Result};
use crate::gradient::palette::normalize_color;
use crate::gradient::GradientConfig;
use crate::graphics_device::ShaderStage;
use crate::uniform::{Uniform, UniformSet};

pub const DARKEN_TOP_UNIFORM: &str = "u_darken_top";
pub const VERT_DEFORM_UNIFORM: &str = "u_vertDeform";
pub const BASE_COLOR_UNIFORM: &str = "u_baseColor";
pub const WAVE_LAYERS_UNIFORM: &str = "u_waveLayers";

/// Largest supported palette: base colour plus one layer per remaining
/// `u_active_colors` component
pub const MAX_PALETTE_LEN: usize = 4;

pub const NOISE_GLSL: &str = include_str!("shaders/noise.glsl");
pub const BLEND_GLSL: &str = include_str!("shaders/blend.glsl");
pub const VERTEX_GLSL: &str = include_str!("shaders/vertex.glsl");
pub const FRAGMENT_GLSL: &str = include_str!("shaders/fragment.glsl");

/// Vertex body: noise and blend helpers followed by `main`
pub fn vertex_body() -> String {
    [NOISE_GLSL, BLEND_GLSL, VERTEX_GLSL].join("\n")
}

pub fn fragment_body() -> &'static str {
    FRAGMENT_GLSL
}

/// Own uniforms of the gradient material
///
/// `shadow_power` is the initial `u_shadow_power`; the controller rewrites
/// it on every resize.
pub fn gradient_uniforms(config: &GradientConfig, shadow_power: f32) -> Result<UniformSet> {
    let palette = &config.palette;
    if palette.is_empty() || palette.len() > MAX_PALETTE_LEN {
        return Err(Error::InvalidResource(format!(
            "gradient palette needs 1 to {} colours, got {}",
            MAX_PALETTE_LEN,
            palette.len()
        )));
    }

    let mut uniforms = UniformSet::new();
    uniforms.insert(TIME_UNIFORM, Uniform::float(0.0));
    uniforms.insert(SHADOW_POWER_UNIFORM, Uniform::float(shadow_power));
    uniforms.insert(DARKEN_TOP_UNIFORM, Uniform::float(if config.darken_top { 1.0 } else { 0.0 }));
    uniforms.insert(ACTIVE_COLORS_UNIFORM, Uniform::vec4(active_colors_for(palette.len())));
    uniforms.insert(
        GLOBAL_UNIFORM,
        Uniform::structure(vec![
            ("noiseFreq", Uniform::vec2(config.frequency)),
            ("noiseSpeed", Uniform::float(5e-6)),
        ]),
    );
    uniforms.insert(
        VERT_DEFORM_UNIFORM,
        Uniform::structure(vec![
            ("incline", Uniform::float(config.angle.sin() / config.angle.cos())),
            ("offsetTop", Uniform::float(-0.5)),
            ("offsetBottom", Uniform::float(-0.5)),
            ("noiseFreq", Uniform::vec2([3.0, 4.0])),
            ("noiseAmp", Uniform::float(config.amplitude)),
            ("noiseSpeed", Uniform::float(10.0)),
            ("noiseFlow", Uniform::float(3.0)),
            ("noiseSeed", Uniform::float(config.seed)),
        ])
        .excluded_from(ShaderStage::Fragment),
    );
    uniforms.insert(
        BASE_COLOR_UNIFORM,
        Uniform::vec3(normalize_color(palette[0])).excluded_from(ShaderStage::Fragment),
    );

    let count = palette.len() as f32;
    let layers = palette
        .iter()
        .enumerate()
        .skip(1)
        .map(|(e, &color)| wave_layer(e as f32, count, color, config.seed))
        .collect::<Vec<_>>();
    let layers = if layers.is_empty() {
        // The shader loops over `u_waveLayers_length`; a single-colour
        // palette keeps one layer, masked off by `u_active_colors`.
        vec![wave_layer(1.0, count, palette[0], config.seed)]
    } else {
        layers
    };
    uniforms.insert(
        WAVE_LAYERS_UNIFORM,
        Uniform::array(layers)?.excluded_from(ShaderStage::Fragment),
    );

    Ok(uniforms)
}

/// Active-colours mask for a palette of `len` colours
pub fn active_colors_for(len: usize) -> [f32; 4] {
    let mut mask = [0.0; 4];
    for slot in mask.iter_mut().take(len.max(1)) {
        *slot = 1.0;
    }
    mask
}

fn wave_layer(e: f32, count: f32, color: u32, seed: f32) -> Uniform {
    Uniform::structure(vec![
        ("color", Uniform::vec3(normalize_color(color))),
        ("noiseFreq", Uniform::vec2([2.0 + e / count, 3.0 + e / count])),
        ("noiseSpeed", Uniform::float(11.0 + 0.3 * e)),
        ("noiseFlow", Uniform::float(6.5 + 0.3 * e)),
        ("noiseSeed", Uniform::float(seed + 10.0 * e)),
        ("noiseFloor", Uniform::float(0.1)),
        ("noiseCeil", Uniform::float(0.63 + 0.07 * e)),
    ])
}

#[cfg(test)]
#[path = "gradient_material_tests.rs"]
mod tests;

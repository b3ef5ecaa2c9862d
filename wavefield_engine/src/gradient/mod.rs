//! Gradient module - the animated multi-colour gradient built on the engine
//!
//! A single plane mesh whose vertex shader deforms it with simplex noise and
//! blends one noise-driven colour layer per palette entry.

pub mod config;
pub mod gradient;
pub mod gradient_material;
pub mod palette;

pub use config::GradientConfig;
pub use gradient::{create_gradient, step_frequency};
pub use gradient_material::{
    gradient_uniforms, vertex_body, fragment_body, active_colors_for,
    DARKEN_TOP_UNIFORM, VERT_DEFORM_UNIFORM, BASE_COLOR_UNIFORM, WAVE_LAYERS_UNIFORM,
    MAX_PALETTE_LEN,
};
pub use palette::{normalize_color, parse_color, parse_palette, DEFAULT_PALETTE};

/// Gradient configuration

use crate::animation::AnimationConfig;
use crate::gradient::palette::DEFAULT_PALETTE;

/// Look and motion of the animated gradient
#[derive(Debug, Clone, PartialEq)]
pub struct GradientConfig {
    /// Base colour followed by one colour per wave layer (1 to 4 entries)
    pub palette: Vec<u32>,
    /// Offset added to every noise seed
    pub seed: f32,
    /// Height of the vertex deformation in pixels
    pub amplitude: f32,
    /// Global noise frequency along x and y
    pub frequency: [f32; 2],
    /// Frequency change applied by one `step_frequency` step
    pub frequency_delta: f32,
    /// Plane incline in radians
    pub angle: f32,
    /// Shade the top of the surface
    pub darken_top: bool,
    pub animation: AnimationConfig,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            seed: 5.0,
            amplitude: 320.0,
            frequency: [14e-5, 29e-5],
            frequency_delta: 1e-5,
            angle: 0.0,
            darken_top: false,
            animation: AnimationConfig::default(),
        }
    }
}

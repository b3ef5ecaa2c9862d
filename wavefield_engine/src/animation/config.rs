/// Animation configuration

use crate::camera::CameraDesc;
use crate::resource::AxisOrder;

/// Controller configuration
///
/// Times are in milliseconds of simulation time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Segments per pixel along x and y
    pub density: [f32; 2],
    /// Largest time step fed into the accumulator by one frame
    pub max_step_ms: f64,
    /// Simulation time at start
    pub initial_time_ms: f64,
    /// Extra time per frame while the pointer scrubs (sign flips with the modifier key)
    pub scrub_step_ms: f64,
    /// Simulation time after which the controller freezes for good (`None` = never)
    pub static_after_ms: Option<f64>,
    /// Render a single frame, then freeze
    pub reduced_motion: bool,
    /// Narrowest surface width that shows the interactive legend
    pub legend_min_width: u32,
    /// Surfaces narrower than this use `shadow_power_narrow`
    pub shadow_power_breakpoint: u32,
    pub shadow_power_narrow: f32,
    pub shadow_power_wide: f32,
    /// Plane the mesh is laid out in
    pub axis_order: AxisOrder,
    /// Camera applied on every resize
    pub camera: CameraDesc,
    /// Draw the mesh as lines
    pub wireframe: bool,
    /// Emit verbose controller traces
    pub trace: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            density: [0.06, 0.16],
            max_step_ms: 1000.0 / 15.0,
            initial_time_ms: 1_253_106.0,
            scrub_step_ms: 160.0,
            static_after_ms: Some(5_000_000.0),
            reduced_motion: false,
            legend_min_width: 1111,
            shadow_power_breakpoint: 600,
            shadow_power_narrow: 5.0,
            shadow_power_wide: 6.0,
            axis_order: AxisOrder::XZ,
            camera: CameraDesc::default(),
            wireframe: false,
            trace: false,
        }
    }
}

impl AnimationConfig {
    /// Grid subdivision for a `width` x `height` surface (at least 1 x 1)
    pub fn segments_for(&self, width: u32, height: u32) -> (u32, u32) {
        let x = (width as f64 * self.density[0] as f64).ceil().max(1.0) as u32;
        let y = (height as f64 * self.density[1] as f64).ceil().max(1.0) as u32;
        (x, y)
    }

    /// Shadow intensity for a surface `width` pixels wide
    pub fn shadow_power_for(&self, width: u32) -> f32 {
        if width < self.shadow_power_breakpoint {
            self.shadow_power_narrow
        } else {
            self.shadow_power_wide
        }
    }
}

/// AnimationController - simulation clock and play/pause state of one mesh
///
/// States: `Idle -> Playing <-> Paused`, with the orthogonal `scrolling` flag
/// (suppresses playing) and the terminal `Static` flag (no frame is ever
/// requested again). Host signals only mutate state and request frames;
/// drawing happens exclusively in `tick`.

use crate::animation::{AnimationConfig, FrameScheduler};
use crate::error::{Error, Result};
use crate::log::DebugTrace;
use crate::renderer::{MeshKey, Renderer};
use crate::resource::Mesh;
use crate::uniform::UniformSet;
use crate::engine_error;

/// Material uniform receiving the simulation time
pub const TIME_UNIFORM: &str = "u_time";
/// Material uniform receiving the shadow intensity
pub const SHADOW_POWER_UNIFORM: &str = "u_shadow_power";
/// Material struct uniform holding `noiseFreq`
pub const GLOBAL_UNIFORM: &str = "u_global";
/// Material vec4 uniform masking the palette colours
pub const ACTIVE_COLORS_UNIFORM: &str = "u_active_colors";

/// Observable controller flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub playing: bool,
    pub scrolling: bool,
    pub intersecting: bool,
    pub mouse_down: bool,
    pub meta_key: bool,
    pub legend_visible: bool,
    pub frame_pending: bool,
    pub is_static: bool,
}

pub struct AnimationController {
    renderer: Renderer,
    mesh: MeshKey,
    scheduler: Box<dyn FrameScheduler>,
    config: AnimationConfig,
    state: AnimationState,
    time: f64,
    last_timestamp: f64,
    frame_delta: f64,
    trace: DebugTrace,
}

impl AnimationController {
    /// Create a controller driving `mesh` of `renderer`
    ///
    /// The controller starts idle; call `resize` then `play`.
    pub fn new(
        mut renderer: Renderer,
        mesh: MeshKey,
        scheduler: Box<dyn FrameScheduler>,
        config: AnimationConfig,
    ) -> Result<Self> {
        match renderer.mesh_mut(mesh) {
            Some(m) => m.set_wireframe(config.wireframe),
            None => {
                return Err(Error::InvalidResource(
                    "animated mesh is not owned by the renderer".to_string(),
                ))
            }
        }

        let mut controller = Self {
            renderer,
            mesh,
            scheduler,
            time: config.initial_time_ms,
            trace: DebugTrace::new("wavefield::AnimationController", config.trace),
            config,
            state: AnimationState { intersecting: true, ..AnimationState::default() },
            last_timestamp: 0.0,
            frame_delta: 0.0,
        };
        controller.push_time();
        Ok(controller)
    }

    // ===== ACCESSORS =====

    /// Accumulated simulation time in milliseconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn is_static(&self) -> bool {
        self.state.is_static
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn mesh_key(&self) -> MeshKey {
        self.mesh
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.renderer.mesh(self.mesh)
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.renderer.mesh_mut(self.mesh)
    }

    /// Clamped wall-clock delta applied by the last tick (ms)
    pub fn frame_delta(&self) -> f64 {
        self.frame_delta
    }

    // ===== PLAYBACK =====

    /// Start playing; ignored while scrolling or once static
    pub fn play(&mut self) {
        if self.state.is_static || self.state.scrolling {
            return;
        }
        self.trace.trace("playing");
        self.state.playing = true;
        self.ensure_frame();
    }

    /// Stop after the frame already requested, if any
    pub fn pause(&mut self) {
        self.trace.trace("paused");
        self.state.playing = false;
    }

    /// Freeze for good
    pub fn disconnect(&mut self) {
        self.trace.trace("disconnected");
        self.state.playing = false;
        self.state.is_static = true;
    }

    // ===== HOST SIGNALS =====

    pub fn scroll_start(&mut self) {
        self.hide_legend();
        if self.state.playing {
            self.pause();
            self.state.scrolling = true;
        }
    }

    /// Quiet interval after the last scroll event elapsed
    pub fn scroll_end(&mut self) {
        self.state.scrolling = false;
        if self.state.intersecting {
            self.play();
        }
    }

    pub fn visibility_changed(&mut self, intersecting: bool) {
        self.state.intersecting = intersecting;
        if intersecting && self.state.playing {
            self.ensure_frame();
        }
    }

    /// Pointer pressed on the legend; `meta` reverses the scrub direction
    pub fn pointer_down(&mut self, meta: bool) {
        if self.state.is_static || !self.state.legend_visible {
            return;
        }
        self.state.mouse_down = true;
        self.state.meta_key = meta;
        if !self.state.playing {
            self.ensure_frame();
        }
    }

    pub fn pointer_up(&mut self) {
        self.state.mouse_down = false;
    }

    /// Show the legend when the surface is wide enough; returns whether it is shown
    pub fn show_legend(&mut self) -> bool {
        if self.renderer.width() > self.config.legend_min_width {
            self.state.legend_visible = true;
        }
        self.state.legend_visible
    }

    pub fn hide_legend(&mut self) {
        self.state.legend_visible = false;
        self.state.mouse_down = false;
    }

    // ===== FRAME =====

    /// Advance and draw one frame at host time `timestamp` (ms)
    ///
    /// Returns whether the host should schedule another frame. Render
    /// failures are logged; they never stop the loop.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        if self.state.is_static {
            return false;
        }
        self.state.frame_pending = false;

        let delta = (timestamp - self.last_timestamp).clamp(0.0, self.config.max_step_ms);
        self.time += delta;
        self.frame_delta = delta;
        self.last_timestamp = timestamp;
        if self.state.mouse_down {
            let step = self.config.scrub_step_ms;
            self.time += if self.state.meta_key { -step } else { step };
        }

        self.push_time();
        self.render_frame();

        let frozen = self.config.static_after_ms.map_or(false, |limit| self.time > limit);
        if self.config.reduced_motion || frozen {
            self.render_frame();
            self.trace.trace("static");
            self.state.playing = false;
            self.state.is_static = true;
            return false;
        }

        let keep_going = self.state.playing || self.state.mouse_down;
        self.state.frame_pending = keep_going;
        keep_going
    }

    /// Regenerate topology and camera for a new surface size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.renderer.resize(width, height)?;
        self.renderer.set_orthographic_camera(self.config.camera)?;

        let (x_segments, y_segments) = self.config.segments_for(width, height);
        let axis_order = self.config.axis_order;
        let shadow_power = self.config.shadow_power_for(width);
        let mesh = self.mesh_or_err()?;
        mesh.geometry_mut().set_topology(x_segments, y_segments)?;
        mesh.geometry_mut().set_size(width as f32, height as f32, axis_order)?;
        if let Some(u) = mesh.material_mut().uniform_mut(SHADOW_POWER_UNIFORM) {
            u.set_float(shadow_power)?;
        }

        if width <= self.config.legend_min_width {
            self.hide_legend();
        }
        self.trace.trace(&format!("resize {}x{}", width, height));
        Ok(())
    }

    // ===== UNIFORM CONTROLS =====

    /// Add `delta` to both components of the global noise frequency
    pub fn update_frequency(&mut self, delta: f32) -> Result<()> {
        let freq = self
            .own_uniforms_mut()?
            .get_mut(GLOBAL_UNIFORM)
            .and_then(|u| u.field_mut("noiseFreq"));
        match freq {
            Some(u) => {
                let [x, y] = u.as_vec2().unwrap_or([0.0, 0.0]);
                u.set_vec2([x + delta, y + delta])
            }
            None => Err(Error::InvalidUniform(format!("{}.noiseFreq is not defined", GLOBAL_UNIFORM))),
        }
    }

    /// Flip palette colour `index` on or off
    pub fn toggle_color(&mut self, index: usize) -> Result<()> {
        let active = self.own_uniforms_mut()?.get_mut(ACTIVE_COLORS_UNIFORM);
        match (active, index) {
            (Some(u), 0..=3) => {
                let mut mask = u.as_vec4().unwrap_or([1.0; 4]);
                mask[index] = if mask[index] > 0.5 { 0.0 } else { 1.0 };
                u.set_vec4(mask)
            }
            (Some(_), _) => Err(Error::InvalidUniform(format!("colour index {} out of range", index))),
            (None, _) => Err(Error::InvalidUniform(format!("{} is not defined", ACTIVE_COLORS_UNIFORM))),
        }
    }

    // ===== INTERNALS =====

    fn ensure_frame(&mut self) {
        if !self.state.is_static && !self.state.frame_pending {
            self.state.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    fn mesh_or_err(&mut self) -> Result<&mut Mesh> {
        self.renderer
            .mesh_mut(self.mesh)
            .ok_or_else(|| Error::InvalidResource("animated mesh was removed".to_string()))
    }

    fn own_uniforms_mut(&mut self) -> Result<&mut UniformSet> {
        Ok(self.mesh_or_err()?.material_mut().uniforms_mut())
    }

    fn push_time(&mut self) {
        let time = self.time as f32;
        if let Some(u) = self
            .mesh_mut()
            .and_then(|m| m.material_mut().uniform_mut(TIME_UNIFORM))
        {
            if let Err(e) = u.set_float(time) {
                engine_error!("wavefield::AnimationController", "Cannot set {}: {}", TIME_UNIFORM, e);
            }
        }
    }

    fn render_frame(&mut self) {
        if let Err(e) = self.renderer.render() {
            engine_error!("wavefield::AnimationController", "Render failed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "animation_controller_tests.rs"]
mod tests;

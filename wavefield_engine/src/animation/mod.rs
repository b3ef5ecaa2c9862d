//! Animation module - frame-driven controller of one animated mesh.

mod config;
mod frame_scheduler;
mod animation_controller;

pub use config::AnimationConfig;
pub use frame_scheduler::FrameScheduler;
pub use animation_controller::{
    AnimationController, AnimationState,
    TIME_UNIFORM, SHADOW_POWER_UNIFORM, GLOBAL_UNIFORM, ACTIVE_COLORS_UNIFORM,
};

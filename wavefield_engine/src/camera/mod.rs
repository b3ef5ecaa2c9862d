//! Camera module - orthographic camera description and projection.
//!
//! The surface is flat and full-viewport, so the only projection the engine
//! builds is an orthographic one with no perspective divide.

mod camera;

pub use camera::{CameraDesc, orthographic_projection};

/// Renderer module - engine root

pub mod renderer;

pub use renderer::*;

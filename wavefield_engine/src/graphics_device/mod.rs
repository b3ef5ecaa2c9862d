/// Graphics device module - device capability trait and GPU handle types

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod shader;
pub mod uniform_location;
pub mod draw;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use shader::*;
pub use uniform_location::*;
pub use draw::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;

/*!
# Wavefield Engine

Minimal WebGL-style rendering engine and the animated gradient built on it.

The crate is platform-agnostic: every GPU call goes through the
[`GraphicsDevice`](graphics_device::GraphicsDevice) trait, implemented by a
backend crate (WebGL) or by the test mock.

## Architecture

- **Uniform**: typed shader value, GLSL declaration emitter, upload dispatch
- **Attribute**: typed vertex/index array mirrored into one device buffer
- **PlaneGeometry**: subdivided plane (position, uv, uvNorm, index)
- **Material**: shader program assembled from uniform declarations and bodies
- **Mesh**: geometry + material, drawn as triangles or lines
- **Renderer**: surface size, common uniforms, camera, ordered mesh list
- **AnimationController**: simulation clock and play/pause state machine
- **Gradient**: uniform layout and shaders of the animated gradient
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod uniform;
pub mod camera;
pub mod resource;
pub mod renderer;
pub mod animation;
pub mod gradient;

// Main wavefield namespace module
pub mod wavefield {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, DebugTrace};
    }

    // Device capability
    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod uniform {
        pub use crate::uniform::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod render {
        pub use crate::renderer::*;
        pub use crate::camera::*;
    }

    pub mod animation {
        pub use crate::animation::*;
    }

    pub mod gradient {
        pub use crate::gradient::*;
    }
}

// Re-export math library at crate root
pub use glam;

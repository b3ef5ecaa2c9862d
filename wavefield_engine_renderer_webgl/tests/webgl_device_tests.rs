//! Tests for WebGlGraphicsDevice backend
//!
//! These tests verify that WebGlGraphicsDevice correctly implements the GraphicsDevice trait.
//! All tests require a browser WebGL context and are marked with #[ignore].
//!
//! Run with: cargo test --test webgl_device_tests -- --ignored

use wasm_bindgen::JsCast;
use wavefield_engine::wavefield::device::{
    Buffer, BufferDesc, BufferUsage, ClearDesc, ClearMask, GraphicsDevice, IndexType, Program,
    PrimitiveTopology, Shader, ShaderDesc, ShaderStage, UniformUpload,
};
use wavefield_engine::wavefield::gradient::GradientConfig;
use wavefield_engine_renderer_webgl::wavefield::{mount_gradient, WebGlGraphicsDevice};
use web_sys::HtmlCanvasElement;

/// Helper to create a detached test canvas
fn create_test_canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

fn create_test_device() -> WebGlGraphicsDevice {
    WebGlGraphicsDevice::from_canvas(&create_test_canvas(320, 240)).unwrap()
}

const VERTEX: &str = "attribute vec4 position;\nvoid main() { gl_Position = position; }";
const FRAGMENT: &str = "precision highp float;\nuniform vec3 u_tint;\nvoid main() { gl_FragColor = vec4(u_tint, 1.0); }";

// ============================================================================
// BUFFER TESTS
// ============================================================================

#[test]
#[ignore] // Requires browser WebGL
fn test_webgl_buffer_grows_on_larger_upload() {
    let mut device = create_test_device();
    let buffer = device
        .create_buffer(BufferDesc { usage: BufferUsage::Vertex, label: "position".to_string() })
        .unwrap();
    assert_eq!(buffer.capacity(), 0);

    device.upload_buffer(buffer.as_ref(), &[0u8; 48]).unwrap();
    assert_eq!(buffer.capacity(), 48);

    device.upload_buffer(buffer.as_ref(), &[0u8; 24]).unwrap();
    assert_eq!(buffer.capacity(), 48);
}

// ============================================================================
// SHADER TESTS
// ============================================================================

#[test]
#[ignore] // Requires browser WebGL
fn test_webgl_compile_and_link() {
    let mut device = create_test_device();
    let vertex = device.create_shader(ShaderDesc { source: VERTEX, stage: ShaderStage::Vertex }).unwrap();
    let fragment = device.create_shader(ShaderDesc { source: FRAGMENT, stage: ShaderStage::Fragment }).unwrap();
    assert!(vertex.is_compiled());
    assert!(fragment.is_compiled());

    let program = device.create_program(vertex.as_ref(), fragment.as_ref()).unwrap();
    assert!(program.is_linked());
    assert_eq!(device.attribute_location(program.as_ref(), "position"), Some(0));

    device.use_program(program.as_ref()).unwrap();
    let tint = device.uniform_location(program.as_ref(), "u_tint").unwrap();
    device.set_uniform(tint.as_ref(), UniformUpload::Vec3(&[1.0, 0.0, 0.0])).unwrap();
    assert!(device.uniform_location(program.as_ref(), "u_missing").is_none());
}

#[test]
#[ignore] // Requires browser WebGL
fn test_webgl_compile_failure_reports_log() {
    let mut device = create_test_device();
    let shader = device
        .create_shader(ShaderDesc { source: "void main() { nope }", stage: ShaderStage::Fragment })
        .unwrap();

    assert!(!shader.is_compiled());
    assert!(!shader.info_log().is_empty());
}

// ============================================================================
// DRAW TESTS
// ============================================================================

#[test]
#[ignore] // Requires browser WebGL
fn test_webgl_clear_and_draw() {
    let mut device = create_test_device();
    device
        .clear(ClearDesc { color: [0.0, 0.0, 0.0, 1.0], depth: 1.0, mask: ClearMask::COLOR | ClearMask::DEPTH })
        .unwrap();

    let index = device
        .create_buffer(BufferDesc { usage: BufferUsage::Index, label: "index".to_string() })
        .unwrap();
    device.upload_buffer(index.as_ref(), bytemuck::cast_slice(&[0u16, 1, 2])).unwrap();
    device.draw_indexed(PrimitiveTopology::TriangleList, 3, IndexType::U16).unwrap();

    if !device.supports_u32_indices() {
        assert!(device.draw_indexed(PrimitiveTopology::TriangleList, 3, IndexType::U32).is_err());
    }
}

// ============================================================================
// GRADIENT TESTS
// ============================================================================

#[test]
#[ignore] // Requires browser WebGL
fn test_webgl_mount_gradient() {
    let canvas = create_test_canvas(1280, 720);
    let (controller, frame_loop) = mount_gradient(&canvas, 1280, 720, &GradientConfig::default()).unwrap();

    assert!(frame_loop.is_attached());
    let mut controller = controller.borrow_mut();
    assert!(controller.mesh().unwrap().material().is_linked());
    controller.play();
    assert!(controller.tick(16.0));
}

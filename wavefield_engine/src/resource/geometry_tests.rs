//! Tests for PlaneGeometry and AxisOrder

use std::rc::Rc;
use crate::error::Error;
use crate::graphics_device::{Buffer, IndexType};
use crate::graphics_device::mock_graphics_device::{MockBuffer, MockGraphicsDevice};
use crate::resource::attribute::AttributeValues;
use crate::resource::geometry::*;

// ============================================================================
// Helpers
// ============================================================================

fn plane(width: f32, height: f32, x: u32, y: u32) -> PlaneGeometry {
    let (_mock, device) = MockGraphicsDevice::new_shared();
    PlaneGeometry::new(device, width, height, x, y, AxisOrder::XZ).unwrap()
}

fn floats(geometry: &PlaneGeometry, which: GeometryAttribute) -> Vec<f32> {
    geometry.attribute(which).values().and_then(|v| v.as_f32()).unwrap().to_vec()
}

fn indices(geometry: &PlaneGeometry) -> Vec<u32> {
    match geometry.attribute(GeometryAttribute::Index).values().unwrap() {
        AttributeValues::Uint16(v) => v.iter().map(|&i| i as u32).collect(),
        AttributeValues::Uint32(v) => v.clone(),
        AttributeValues::Float32(_) => panic!("float index data"),
    }
}

fn mock_buffer(geometry: &PlaneGeometry, which: GeometryAttribute) -> &MockBuffer {
    geometry
        .attribute(which)
        .buffer()
        .as_any()
        .downcast_ref::<MockBuffer>()
        .unwrap()
}

// ============================================================================
// AxisOrder
// ============================================================================

#[test]
fn test_axis_order_parse() {
    assert_eq!("xz".parse::<AxisOrder>().unwrap(), AxisOrder::XZ);
    assert_eq!("XY".parse::<AxisOrder>().unwrap(), AxisOrder::XY);
    assert_eq!("zy".parse::<AxisOrder>().unwrap(), AxisOrder { first: 2, second: 1 });
    assert_eq!(AxisOrder { first: 2, second: 1 }.third(), 0);
    assert_eq!(AxisOrder::XZ.to_string(), "xz");
}

#[test]
fn test_axis_order_rejects_bad_selectors() {
    for bad in ["", "x", "xx", "xyz", "ab"] {
        assert!(
            matches!(bad.parse::<AxisOrder>(), Err(Error::InvalidResource(_))),
            "accepted '{}'",
            bad
        );
    }
}

// ============================================================================
// Topology
// ============================================================================

#[test]
fn test_counts_for_several_grids() {
    for (x, y) in [(1, 1), (2, 3), (7, 4), (48, 96)] {
        let g = plane(10.0, 10.0, x, y);
        assert_eq!(g.vertex_count(), (x + 1) * (y + 1));
        assert_eq!(g.quad_count(), 2 * x * y);
        assert_eq!(g.index_count(), 6 * x * y);
        assert_eq!(floats(&g, GeometryAttribute::Position).len() as u32, 3 * g.vertex_count());
        assert_eq!(floats(&g, GeometryAttribute::Uv).len() as u32, 2 * g.vertex_count());
    }
}

#[test]
fn test_two_by_two_grid() {
    let g = plane(2.0, 2.0, 2, 2);

    assert_eq!(g.vertex_count(), 9);
    assert_eq!(g.quad_count(), 8);
    assert_eq!(g.index_count(), 24);

    let uv = floats(&g, GeometryAttribute::Uv);
    assert_eq!((uv[8], uv[9]), (0.5, 0.5));

    let idx = indices(&g);
    assert_eq!(&idx[0..6], &[0, 3, 1, 1, 3, 4]);
    assert_eq!(&idx[18..24], &[4, 7, 5, 5, 7, 8]);
    assert!(idx.iter().all(|&i| i < 9));
}

#[test]
fn test_corner_uv_norm() {
    let g = plane(100.0, 50.0, 3, 5);
    let uv_norm = floats(&g, GeometryAttribute::UvNorm);
    let at = |i: u32| (uv_norm[2 * i as usize], uv_norm[2 * i as usize + 1]);

    assert_eq!(at(0), (-1.0, 1.0));
    assert_eq!(at(3), (1.0, 1.0));
    assert_eq!(at(20), (-1.0, -1.0));
    assert_eq!(at(23), (1.0, -1.0));
}

#[test]
fn test_zero_segments_rejected() {
    let (_mock, device) = MockGraphicsDevice::new_shared();
    assert!(matches!(
        PlaneGeometry::new(device, 1.0, 1.0, 0, 4, AxisOrder::XZ),
        Err(Error::InvalidResource(_))
    ));

    let mut g = plane(1.0, 1.0, 2, 2);
    assert!(g.set_topology(3, 0).is_err());
    assert_eq!((g.x_segments(), g.y_segments()), (2, 2));
}

#[test]
fn test_index_width_follows_vertex_count() {
    let mut g = plane(1.0, 1.0, 255, 255);
    assert_eq!(g.vertex_count(), 65536);
    assert_eq!(g.index_type(), IndexType::U16);

    g.set_topology(256, 256).unwrap();
    assert_eq!(g.index_type(), IndexType::U32);
    assert_eq!(*indices(&g).last().unwrap(), g.vertex_count() - 1);
}

// ============================================================================
// Size
// ============================================================================

#[test]
fn test_positions_centered_with_negated_rows() {
    let g = plane(800.0, 600.0, 2, 2);
    let p = floats(&g, GeometryAttribute::Position);

    assert_eq!(&p[0..3], &[-400.0, 0.0, 300.0]);
    assert_eq!(&p[12..15], &[0.0, 0.0, 0.0]);
    assert_eq!(&p[24..27], &[400.0, 0.0, -300.0]);
}

#[test]
fn test_axis_order_selects_components() {
    let mut g = plane(2.0, 4.0, 1, 1);
    g.set_size(2.0, 4.0, AxisOrder::XY).unwrap();
    let p = floats(&g, GeometryAttribute::Position);

    assert_eq!(&p[0..3], &[-1.0, 2.0, 0.0]);
    assert_eq!(&p[9..12], &[1.0, -2.0, 0.0]);
    assert_eq!(g.axis_order(), AxisOrder::XY);
}

#[test]
fn test_resize_reuses_position_buffer() {
    let mut g = plane(800.0, 600.0, 48, 96);
    let before = g.attribute(GeometryAttribute::Position).buffer().clone();
    let capacity = mock_buffer(&g, GeometryAttribute::Position).capacity();
    let uploads = mock_buffer(&g, GeometryAttribute::Position).upload_count();

    g.set_size(400.0, 300.0, AxisOrder::XZ).unwrap();

    let after = mock_buffer(&g, GeometryAttribute::Position);
    assert!(Rc::ptr_eq(&before, g.attribute(GeometryAttribute::Position).buffer()));
    assert_eq!(after.capacity(), capacity);
    assert_eq!(after.reallocations(), 1);
    assert_eq!(after.upload_count(), uploads + 1);
    assert_eq!(floats(&g, GeometryAttribute::Position)[0], -200.0);
    assert_eq!((g.width(), g.height()), (400.0, 300.0));
}

#[test]
fn test_retopology_then_resize_grows_position() {
    let mut g = plane(10.0, 10.0, 2, 2);

    g.set_topology(4, 4).unwrap();
    g.set_size(10.0, 10.0, AxisOrder::XZ).unwrap();

    assert_eq!(floats(&g, GeometryAttribute::Position).len(), 75);
    assert_eq!(mock_buffer(&g, GeometryAttribute::Position).reallocations(), 2);
}

use super::*;
use approx::assert_abs_diff_eq;

const DOT: Primitive = Primitive::DiscCylinder {
    sides: 10,
    height: 1.0,
};

#[test]
fn test_single_add_places_rim_and_centers() {
    let (radius, x, y, height) = (0.4, 3.0, -2.0, 2.5);
    let dot = Primitive::DiscCylinder { sides: 8, height };
    let mut batch = InstanceBatch::new(1, dot).unwrap();
    batch.add(radius, x, y, 0.0).unwrap();

    let vertices = batch.finalized_vertices();
    assert_eq!(vertices.len(), batch.v_len());

    for v in &vertices[..16] {
        let d = (v.truncate() - glam::DVec2::new(x, y)).length();
        assert_abs_diff_eq!(d, radius, epsilon = 1e-12);
    }
    assert_eq!(vertices[16], DVec3::new(x, y, 0.0));
    assert_eq!(vertices[17], DVec3::new(x, y, height));
}

#[test]
fn test_zero_radius_is_noop() {
    let mut batch = InstanceBatch::new(4, DOT).unwrap();
    for i in 0..10 {
        batch.add(0.0, i as f64, 0.0, 0.0).unwrap();
    }
    assert_eq!(batch.v_off(), 0);
    assert_eq!(batch.f_off(), 0);
    assert!(batch.finalized_vertices().is_empty());
    assert!(batch.finalized_faces().is_empty());
}

#[test]
fn test_zero_radius_does_not_consume_capacity() {
    let mut batch = InstanceBatch::new(1, DOT).unwrap();
    batch.add(0.0, 0.0, 0.0, 0.0).unwrap();
    batch.add(0.5, 0.0, 0.0, 0.0).unwrap();
    batch.add(0.0, 1.0, 0.0, 0.0).unwrap();
    assert_eq!(batch.instances(), 1);
}

#[test]
fn test_face_indices_offset_per_instance() {
    let mut batch = InstanceBatch::new(3, DOT).unwrap();
    batch.add(0.5, 0.0, 0.0, 0.0).unwrap();
    batch.add(0.5, 2.0, 0.0, 0.0).unwrap();
    batch.add(0.5, 4.0, 0.0, 0.0).unwrap();

    let (v_len, f_len) = (batch.v_len(), batch.f_len());
    let faces = batch.finalized_faces();
    assert_eq!(faces.len(), 3 * f_len);

    for (k, chunk) in faces.chunks(f_len).enumerate() {
        let lo = (k * v_len) as u32;
        let hi = ((k + 1) * v_len) as u32;
        assert!(chunk.iter().flatten().all(|&i| i >= lo && i < hi));
    }
}

#[test]
fn test_capacity_overflow_is_detected() {
    let capacity = 3;
    let mut batch = InstanceBatch::new(capacity, DOT).unwrap();
    for i in 0..capacity {
        batch.add(0.5, i as f64, 0.0, 0.0).unwrap();
    }
    let before = batch.finalized_vertices().to_vec();

    let err = batch.add(0.5, 99.0, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, MeshError::CapacityExceeded { capacity: 3 }));
    assert_eq!(batch.instances(), capacity);
    assert_eq!(batch.finalized_vertices(), before.as_slice());
}

#[test]
fn test_zero_capacity_rejects_first_stamp() {
    let mut batch = InstanceBatch::new(0, DOT).unwrap();
    batch.add(0.0, 0.0, 0.0, 0.0).unwrap();
    assert!(batch.add(0.1, 0.0, 0.0, 0.0).is_err());
}

#[test]
fn test_negative_or_nan_radius_rejected() {
    let mut batch = InstanceBatch::new(2, DOT).unwrap();
    assert!(batch.add(-0.5, 0.0, 0.0, 0.0).is_err());
    assert!(batch.add(f64::NAN, 0.0, 0.0, 0.0).is_err());
    assert!(batch.add(0.5, f64::INFINITY, 0.0, 0.0).is_err());
    assert_eq!(batch.instances(), 0);
}

#[test]
fn test_batch_mesh_is_closed() {
    let mut batch = InstanceBatch::new(4, DOT).unwrap();
    for i in 0..4 {
        batch.add(0.3 + 0.1 * i as f64, i as f64, 0.0, 0.0).unwrap();
    }
    let mesh = batch.into_mesh().unwrap();
    assert!(crate::validate::check(&mesh).is_closed());
}

#[test]
fn test_into_mesh_keeps_prefix_only() {
    let mut batch = InstanceBatch::new(5, DOT).unwrap();
    batch.add(0.5, 0.0, 0.0, 0.0).unwrap();
    batch.add(0.5, 1.0, 0.0, 0.0).unwrap();
    let v_len = batch.v_len();
    let mesh = batch.into_mesh().unwrap();
    assert_eq!(mesh.vertex_count(), 2 * v_len);
}

#[test]
fn test_capacity_too_large_for_indices() {
    let result = InstanceBatch::new(usize::MAX / 4, DOT);
    assert!(matches!(result, Err(MeshError::TooManyVertices { .. })));
}

#[test]
fn test_huge_side_count_rejected_before_allocation() {
    let wide = Primitive::DiscCylinder {
        sides: 1 << 31,
        height: 1.0,
    };
    assert!(matches!(
        InstanceBatch::new(0, wide),
        Err(MeshError::TooManyVertices { .. })
    ));
    assert!(matches!(
        InstanceBatch::new(1, wide),
        Err(MeshError::TooManyVertices { .. })
    ));

    let wide = Primitive::DiscCylinder {
        sides: u32::MAX / 8,
        height: 1.0,
    };
    assert!(InstanceBatch::new(0, wide).is_err());
}

#[test]
fn test_parallel_matches_sequential() {
    let placements: Vec<Placement> = (0..200)
        .map(|i| {
            let radius = if i % 7 == 0 { 0.0 } else { (i % 5) as f64 * 0.1 };
            Placement::new(radius, (i % 20) as f64, (i / 20) as f64, 0.0)
        })
        .collect();

    let mut sequential = InstanceBatch::new(placements.len(), DOT).unwrap();
    for p in &placements {
        sequential.add_placement(*p).unwrap();
    }

    let mut parallel = InstanceBatch::new(placements.len(), DOT).unwrap();
    let written = parallel.extend_parallel(&placements).unwrap();

    assert_eq!(written, sequential.instances());
    assert_eq!(parallel.finalized_vertices(), sequential.finalized_vertices());
    assert_eq!(parallel.finalized_faces(), sequential.finalized_faces());
}

#[test]
fn test_parallel_appends_after_sequential() {
    let mut batch = InstanceBatch::new(3, DOT).unwrap();
    batch.add(0.5, 0.0, 0.0, 0.0).unwrap();
    batch
        .extend_parallel(&[Placement::new(0.5, 1.0, 0.0, 0.0), Placement::new(0.5, 2.0, 0.0, 0.0)])
        .unwrap();
    assert_eq!(batch.instances(), 3);
    assert!(crate::validate::check(&batch.into_mesh().unwrap()).is_closed());
}

#[test]
fn test_parallel_overflow_writes_nothing() {
    let mut batch = InstanceBatch::new(2, DOT).unwrap();
    let placements = vec![Placement::new(0.5, 0.0, 0.0, 0.0); 3];
    assert!(matches!(
        batch.extend_parallel(&placements),
        Err(MeshError::CapacityExceeded { capacity: 2 })
    ));
    assert_eq!(batch.instances(), 0);
}

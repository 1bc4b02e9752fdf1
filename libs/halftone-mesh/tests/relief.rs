use halftone_mesh::transform::rotate_z;
use halftone_mesh::{
    build_relief, stl, HalftoneBuilder, HalftoneParams, InstanceBatch, IntensityField, MeshError,
    Primitive, ReliefParams, ScreenAngle, SubstrateBuilder,
};

#[test]
fn uniform_full_field_stamps_every_pixel() {
    let field = IntensityField::filled(2, 2, 1.0).unwrap();
    let builder = HalftoneBuilder::new(HalftoneParams {
        dot_height: 1.0,
        sides: 10,
        ..HalftoneParams::default()
    });
    let batch = builder.stamp(&field).unwrap();
    assert_eq!(batch.v_off(), 4 * batch.v_len());

    let mesh = builder.build(&field).unwrap();
    assert_eq!(mesh.vertex_count(), 4 * builder.primitive().vertex_len());
    assert!(mesh.ensure_closed("halftone").is_ok());
}

#[test]
fn blank_field_stamps_nothing() {
    let field = IntensityField::filled(2, 2, 0.0).unwrap();
    let batch = HalftoneBuilder::default().stamp(&field).unwrap();
    assert_eq!(batch.v_off(), 0);
}

#[test]
fn substrate_square_from_half_extents() {
    let plate = SubstrateBuilder::new(1.0).build(3.0, 5.0).unwrap();
    let bounds = plate.bounds().unwrap();
    assert_eq!(bounds.extent.x, 10.0);
    assert_eq!(bounds.extent.y, 10.0);
}

#[test]
fn overflow_is_an_error_not_a_write() {
    let mut batch = InstanceBatch::new(2, Primitive::Cuboid { height: 1.0 }).unwrap();
    batch.add(1.0, 0.0, 0.0, 0.0).unwrap();
    batch.add(1.0, 3.0, 0.0, 0.0).unwrap();
    let err = batch.add(1.0, 6.0, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, MeshError::CapacityExceeded { capacity: 2 }));
    assert_eq!(batch.finalized_vertices().len(), 16);
}

#[test]
fn screen_rotation_is_undone() {
    // A dot stamped at a pre-rotated position comes back to where the
    // unrotated pixel would have been.
    let screen = ScreenAngle::default();
    let mut pixel = [glam::DVec3::new(4.0, 7.0, 0.0)];
    let original = pixel;
    rotate_z(&mut pixel, screen.image_rotation());
    rotate_z(&mut pixel, screen.mesh_compensation());
    assert!((pixel[0] - original[0]).length() < 1e-12);
}

#[test]
fn relief_encodes_both_files() {
    let data: Vec<f64> = (0..30).map(|i| (i % 3) as f64 / 2.0).collect();
    let field = IntensityField::new(5, 6, data).unwrap();
    let relief = build_relief(&field, &ReliefParams::default()).unwrap();
    let files = relief.encode("relief").unwrap();

    let expected = |tris: usize| 84 + 50 * tris;
    assert_eq!(files.mask.len(), expected(relief.halftone.triangle_count()));
    assert_eq!(files.substrate.len(), expected(12));
    assert_eq!(
        stl::encode_binary(&relief.substrate, "relief-subs").unwrap(),
        files.substrate
    );
}

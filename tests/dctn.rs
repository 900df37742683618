use ndct::dct::{dct, dctn, idctn, DctError, DctPlanner, DctType, Norm};
use ndct::nd::NdArray;

fn sample(shape: &[usize]) -> NdArray<f64> {
    let len: usize = shape.iter().product();
    let data: Vec<f64> = (0..len)
        .map(|i| ((i * 7 % 13) as f64 - 6.0) * 0.5 + (i as f64 * 0.3).sin())
        .collect();
    NdArray::from_vec(data, shape)
}

fn assert_close(a: &NdArray<f64>, b: &NdArray<f64>, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        assert!((x - y).abs() < tol, "{} vs {}", x, y);
    }
}

#[test]
fn fast_path_matches_sequential_1d_sweeps() {
    let mut planner = DctPlanner::<f64>::new();
    for shape in [[4usize, 4], [3, 5], [8, 2], [1, 6]] {
        let x = sample(&shape);
        let joint = dctn(&mut planner, &x, DctType::II, None, Some(&[0, 1]), None).unwrap();
        let a0 = dct(&mut planner, &x, DctType::II, None, 0, None).unwrap();
        let sweep = dct(&mut planner, &a0, DctType::II, None, 1, None).unwrap();
        assert_close(&joint, &sweep, 1e-8);
        // axis order must not matter either
        let a1 = dct(&mut planner, &x, DctType::II, None, 1, None).unwrap();
        let sweep_rev = dct(&mut planner, &a1, DctType::II, None, 0, None).unwrap();
        assert_close(&joint, &sweep_rev, 1e-8);
    }
}

#[test]
fn fast_path_matches_sequential_with_ortho() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[5, 4]);
    let norm = Some(Norm::Ortho);
    let joint = dctn(&mut planner, &x, DctType::II, None, Some(&[0, 1]), norm).unwrap();
    let a0 = dct(&mut planner, &x, DctType::II, None, 0, norm).unwrap();
    let sweep = dct(&mut planner, &a0, DctType::II, None, 1, norm).unwrap();
    assert_close(&joint, &sweep, 1e-9);
}

#[test]
fn default_axes_cover_every_dimension() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[3, 4]);
    let implicit = dctn(&mut planner, &x, DctType::II, None, None, None).unwrap();
    let explicit = dctn(&mut planner, &x, DctType::II, None, Some(&[0, 1]), None).unwrap();
    assert_close(&implicit, &explicit, 1e-12);
}

#[test]
fn three_axes_decompose_into_pair_and_single() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[3, 4, 5]);
    let joint = dctn(&mut planner, &x, DctType::II, None, None, None).unwrap();
    let mut sweep = x.clone();
    for axis in 0..3 {
        sweep = dct(&mut planner, &sweep, DctType::II, None, axis as isize, None).unwrap();
    }
    assert_close(&joint, &sweep, 1e-7);
}

#[test]
fn single_axis_list_delegates_to_1d() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 6]);
    let via_n = dctn(&mut planner, &x, DctType::II, None, Some(&[1]), None).unwrap();
    let direct = dct(&mut planner, &x, DctType::II, None, 1, None).unwrap();
    assert_close(&via_n, &direct, 1e-12);
}

#[test]
fn negative_axes_are_canonicalized() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 3]);
    let neg = dctn(&mut planner, &x, DctType::II, None, Some(&[-2, -1]), None).unwrap();
    let pos = dctn(&mut planner, &x, DctType::II, None, Some(&[0, 1]), None).unwrap();
    assert_close(&neg, &pos, 1e-12);
}

#[test]
fn output_lengths_resize_all_axes_before_transforming() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[3, 5]);
    let via_s = dctn(
        &mut planner,
        &x,
        DctType::II,
        Some(&[5, 3]),
        Some(&[0, 1]),
        None,
    )
    .unwrap();
    assert_eq!(via_s.shape(), &[5, 3]);
    let resized = x.resize_axes(&[(0, 5), (1, 3)], 0.0);
    let explicit = dctn(&mut planner, &resized, DctType::II, None, Some(&[0, 1]), None).unwrap();
    assert_close(&via_s, &explicit, 1e-9);
}

#[test]
fn roundtrip_2d_both_norms() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 6]);
    for norm in [None, Some(Norm::Ortho)] {
        let y = dctn(&mut planner, &x, DctType::II, None, None, norm).unwrap();
        let z = idctn(&mut planner, &y, DctType::II, None, None, norm).unwrap();
        assert_close(&x, &z, 1e-8);
    }
}

#[test]
fn roundtrip_3d() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[2, 3, 4]);
    let y = dctn(&mut planner, &x, DctType::II, None, None, None).unwrap();
    let z = idctn(&mut planner, &y, DctType::II, None, None, None).unwrap();
    assert_close(&x, &z, 1e-8);
}

#[test]
fn roundtrip_axis_subset() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[3, 4, 2]);
    let axes: &[isize] = &[2, 0];
    let y = dctn(&mut planner, &x, DctType::II, None, Some(axes), None).unwrap();
    let z = idctn(&mut planner, &y, DctType::II, None, Some(axes), None).unwrap();
    assert_close(&x, &z, 1e-8);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 4]);
    assert_eq!(
        dctn(
            &mut planner,
            &x,
            DctType::II,
            Some(&[4]),
            Some(&[0, 1]),
            None
        ),
        Err(DctError::AxisCountMismatch)
    );
    assert_eq!(
        idctn(
            &mut planner,
            &x,
            DctType::II,
            Some(&[4, 4, 4]),
            Some(&[0, 1]),
            None
        ),
        Err(DctError::AxisCountMismatch)
    );
}

#[test]
fn duplicate_axes_are_rejected() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 4]);
    assert_eq!(
        dctn(&mut planner, &x, DctType::II, None, Some(&[0, 0]), None),
        Err(DctError::InvalidAxis)
    );
    // -1 and 1 name the same axis on a rank-2 array
    assert_eq!(
        dctn(&mut planner, &x, DctType::II, None, Some(&[-1, 1]), None),
        Err(DctError::InvalidAxis)
    );
    assert_eq!(
        idctn(&mut planner, &x, DctType::II, None, Some(&[1, 1]), None),
        Err(DctError::InvalidAxis)
    );
}

#[test]
fn more_axes_than_dimensions_is_rejected() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 4]);
    assert_eq!(
        dctn(&mut planner, &x, DctType::II, None, Some(&[0, 1, 0]), None),
        Err(DctError::AxisCountMismatch)
    );
}

#[test]
fn zero_output_length_is_rejected() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 4]);
    assert_eq!(
        dctn(
            &mut planner,
            &x,
            DctType::II,
            Some(&[4, 0]),
            Some(&[0, 1]),
            None
        ),
        Err(DctError::ZeroLength)
    );
}

#[test]
fn unsupported_type_is_rejected_before_work() {
    let mut planner = DctPlanner::<f64>::new();
    let x = sample(&[4, 4]);
    assert_eq!(
        dctn(&mut planner, &x, DctType::IV, None, None, None),
        Err(DctError::UnsupportedType)
    );
    assert_eq!(
        idctn(&mut planner, &x, DctType::IV, None, None, None),
        Err(DctError::UnsupportedType)
    );
}

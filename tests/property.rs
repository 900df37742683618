use ndct::dct::{dct, dct_1d, dctn, idct_1d, DctPlanner, DctType, Norm};
use ndct::nd::NdArray;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_roundtrip_recovers_input(
        signal in proptest::collection::vec(-100.0f64..100.0, 1..24),
        ortho in any::<bool>(),
    ) {
        let norm = if ortho { Some(Norm::Ortho) } else { None };
        let mut planner = DctPlanner::<f64>::new();
        let y = dct_1d(&mut planner, &signal, norm).unwrap();
        let z = idct_1d(&mut planner, &y, norm).unwrap();
        for (a, b) in signal.iter().zip(z.iter()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_2d_fast_path_equals_sequential(
        rows in 1usize..7,
        cols in 1usize..7,
        signal in proptest::collection::vec(-100.0f64..100.0, 49),
    ) {
        let data: Vec<f64> = signal.iter().take(rows * cols).cloned().collect();
        let x = NdArray::from_vec(data, &[rows, cols]);
        let mut planner = DctPlanner::<f64>::new();
        let joint = dctn(&mut planner, &x, DctType::II, None, None, None).unwrap();
        let a0 = dct(&mut planner, &x, DctType::II, None, 0, None).unwrap();
        let sweep = dct(&mut planner, &a0, DctType::II, None, 1, None).unwrap();
        for (a, b) in joint.as_slice().iter().zip(sweep.as_slice()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_padding_appends_silence(
        signal in proptest::collection::vec(-100.0f64..100.0, 2..16),
        extra in 1usize..5,
    ) {
        let mut planner = DctPlanner::<f64>::new();
        let x = NdArray::from_vec(signal.clone(), &[signal.len()]);
        let n = signal.len() + extra;
        let via_n = dct(&mut planner, &x, DctType::II, Some(n), 0, None).unwrap();
        let mut padded = signal.clone();
        padded.resize(n, 0.0);
        let explicit = dct_1d(&mut planner, &padded, None).unwrap();
        for (a, b) in via_n.as_slice().iter().zip(explicit.iter()) {
            prop_assert!((a - b).abs() < 1e-7, "{} vs {}", a, b);
        }
    }
}

use ndct::dct::{deinterleave, interleave};
use ndct::nd::NdArray;

/// Interleave followed by de-interleave is the identity, exactly. Pure
/// index reordering, so bitwise equality is required.
#[test]
fn inverse_law_1d() {
    for len in 1usize..16 {
        let x = NdArray::from_vec((0..len as u32).collect(), &[len]);
        assert_eq!(deinterleave(&interleave(&x, 0), 0), x, "len={}", len);
        assert_eq!(interleave(&deinterleave(&x, 0), 0), x, "len={}", len);
    }
}

#[test]
fn inverse_law_every_axis_of_3d() {
    let shape = [3usize, 4, 5];
    let len: usize = shape.iter().product();
    let x = NdArray::from_vec((0..len as u32).collect(), &shape);
    for axis in 0..3 {
        let v = interleave(&x, axis);
        assert_eq!(deinterleave(&v, axis), x, "axis={}", axis);
    }
}

#[test]
fn interleave_only_permutes_along_the_chosen_axis() {
    let x = NdArray::from_vec((0..6u32).collect(), &[2, 3]);
    let v = interleave(&x, 1);
    // rows permute independently: [0 1 2] -> [0 2 1], [3 4 5] -> [3 5 4]
    assert_eq!(v.as_slice(), &[0, 2, 1, 3, 5, 4]);
    let w = interleave(&x, 0);
    // length-2 axis: evens then reversed odds is the identity
    assert_eq!(w.as_slice(), x.as_slice());
}

#[test]
fn interleave_is_exact_on_floats() {
    let vals = vec![0.1f64, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7];
    let x = NdArray::from_vec(vals.clone(), &[7]);
    let back = deinterleave(&interleave(&x, 0), 0);
    // exact bit equality, no arithmetic happened
    assert_eq!(back.as_slice(), vals.as_slice());
}

//! FFT-based Discrete Cosine Transform (type II) and its inverse.
//!
//! The forward transform reduces the DCT to a complex FFT through the
//! even/odd interleaving of Makhoul, "A Fast Cosine Transform in One and
//! Two Dimensions" (1980): interleave the samples, run an FFT along the
//! axis, rotate the spectrum by `exp(-iπk / 2N)` and keep twice the real
//! part. The inverse runs the same algebra backwards. `dctn`/`idctn`
//! compose the 1-D engine across axes, with a joint 2-D fast path for
//! axis pairs.
//! no_std + alloc compatible (non-power-of-two lengths need `std`).

extern crate alloc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::fft::{FftError, ScalarFftImpl};
use crate::nd::{canonicalize_axis, fft_axis, ifft_axis, NdArray};
use crate::num::{Complex, Float};

/// Transform type selector. Only [`DctType::II`] is implemented; every
/// other variant fails with [`DctError::UnsupportedType`] before any
/// computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DctType {
    I,
    II,
    III,
    IV,
}

/// Normalization mode. `Option<Norm>` stands in for the usual
/// string-valued `norm` argument; unrecognized values are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    /// Per-axis orthonormal scaling: element 0 divided by `sqrt(4N)`,
    /// the rest by `sqrt(2N)`.
    Ortho,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DctError {
    /// Requested transform type other than DCT-II.
    UnsupportedType,
    /// Axis outside `[-rank, rank - 1]`, or the same axis listed twice.
    InvalidAxis,
    /// `s` does not pair up with `axes`, or more axes than dimensions.
    AxisCountMismatch,
    /// A transform axis would have length zero when the kernel runs.
    ZeroLength,
    /// Transform length not exactly representable in the element type.
    LengthTooLarge,
    /// Propagated failure from the FFT collaborator.
    Fft(FftError),
}

impl From<FftError> for DctError {
    fn from(e: FftError) -> Self {
        Self::Fft(e)
    }
}

/// Caches the per-length phase-correction tables and owns the FFT used by
/// every transform call.
pub struct DctPlanner<T: Float> {
    fft: ScalarFftImpl<T>,
    /// `exp(-iπk / 2N)` for `k = 0..N`, keyed by `N`.
    twiddle_cache: HashMap<usize, Arc<[Complex<T>]>>,
}

impl<T: Float> Default for DctPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DctPlanner<T> {
    pub fn new() -> Self {
        Self {
            fft: ScalarFftImpl::default(),
            twiddle_cache: HashMap::new(),
        }
    }

    fn w4(&mut self, n: usize) -> Result<Arc<[Complex<T>]>, DctError> {
        if !self.twiddle_cache.contains_key(&n) {
            verbose!("planning dct twiddle table for n={}", n);
            let n_t = T::from_usize(n).ok_or(DctError::LengthTooLarge)?;
            let denom = T::from_f32(2.0) * n_t;
            let mut table: Vec<Complex<T>> = Vec::with_capacity(n);
            for k in 0..n {
                let k_t = T::from_usize(k).ok_or(DctError::LengthTooLarge)?;
                table.push(Complex::expi(-(T::pi() * k_t) / denom));
            }
            self.twiddle_cache.insert(n, Arc::from(table));
        }
        Ok(Arc::clone(self.twiddle_cache.get(&n).unwrap()))
    }
}

fn ensure_type_ii(ty: DctType) -> Result<(), DctError> {
    if ty == DctType::II {
        Ok(())
    } else {
        Err(DctError::UnsupportedType)
    }
}

/// Even/odd interleaving along one axis: even-indexed elements in order,
/// followed by the odd-indexed elements in reverse. This reordering turns
/// a DCT-II into a phase-corrected FFT.
pub fn interleave<E: Copy>(x: &NdArray<E>, axis: usize) -> NdArray<E> {
    x.rearrange_axis(axis, |len, k| {
        let half = len.div_ceil(2);
        if k < half {
            2 * k
        } else {
            let odd_count = len / 2;
            2 * (odd_count - (k - half)) - 1
        }
    })
}

/// Structural inverse of [`interleave`]: splits at the ceiling midpoint,
/// scatters the head into even positions and the reversed tail into odd
/// positions. `deinterleave(interleave(x)) == x` exactly.
pub fn deinterleave<E: Copy>(x: &NdArray<E>, axis: usize) -> NdArray<E> {
    x.rearrange_axis(
        axis,
        |len, k| {
            if k % 2 == 0 {
                k / 2
            } else {
                len - 1 - (k - 1) / 2
            }
        },
    )
}

/// Divide element `k` along `axis` by `sqrt(4N)` for `k = 0` and by
/// `sqrt(2N)` for `k >= 1`, making the transform matrix orthonormal.
fn ortho_norm<T: Float>(x: &mut NdArray<T>, axis: usize) -> Result<(), DctError> {
    let n = x.shape()[axis];
    let n_t = T::from_usize(n).ok_or(DctError::LengthTooLarge)?;
    let mut factors: Vec<T> = Vec::with_capacity(n);
    factors.push((T::from_f32(4.0) * n_t).sqrt());
    for _ in 1..n {
        factors.push((T::from_f32(2.0) * n_t).sqrt());
    }
    x.div_axis_factors(axis, &factors);
    Ok(())
}

/// Pad (trailing zeros) or truncate (trailing drop) one axis to the
/// requested length. Returns `None` when the array already fits.
fn adapt_axis<T: Float>(
    x: &NdArray<T>,
    axis: usize,
    n: Option<usize>,
) -> Result<Option<NdArray<T>>, DctError> {
    match n {
        Some(0) => Err(DctError::ZeroLength),
        Some(len) if len != x.shape()[axis] => {
            Ok(Some(x.resize_axes(&[(axis, len)], T::zero())))
        }
        _ => Ok(None),
    }
}

/// DCT-II of `x` along `axis`.
///
/// `n` pads or truncates the axis before the transform; `axis` may be
/// negative (counted from the last dimension). With `Norm::Ortho` the
/// output is orthonormally scaled, otherwise it is the unnormalized
/// transform `X_k = 2 Σ x_m cos(πk(2m+1) / 2N)`.
pub fn dct<T: Float>(
    planner: &mut DctPlanner<T>,
    x: &NdArray<T>,
    ty: DctType,
    n: Option<usize>,
    axis: isize,
    norm: Option<Norm>,
) -> Result<NdArray<T>, DctError> {
    ensure_type_ii(ty)?;
    let axis = canonicalize_axis(axis, x.rank()).ok_or(DctError::InvalidAxis)?;
    let adapted = adapt_axis(x, axis, n)?;
    let x = adapted.as_ref().unwrap_or(x);
    let n_len = x.shape()[axis];
    if n_len == 0 {
        return Err(DctError::ZeroLength);
    }
    verbose!("dct-ii: axis={} n={}", axis, n_len);

    let v = interleave(x, axis);
    let mut spectrum = v.map(|r| Complex::new(r, T::zero()));
    fft_axis(&mut spectrum, axis, &planner.fft)?;
    let w = planner.w4(n_len)?;
    spectrum.mul_axis_factors(axis, &w);

    let two = T::from_f32(2.0);
    let mut out = spectrum.map(|c| c.re * two);
    if norm == Some(Norm::Ortho) {
        ortho_norm(&mut out, axis)?;
    }
    Ok(out)
}

/// Inverse of [`dct`] along `axis`.
///
/// Reverses the forward algebra: de-scale, de-rotate the spectrum by exact
/// complex division with the same twiddle factors, inverse FFT, and
/// de-interleave back to natural sample order.
pub fn idct<T: Float>(
    planner: &mut DctPlanner<T>,
    x: &NdArray<T>,
    ty: DctType,
    n: Option<usize>,
    axis: isize,
    norm: Option<Norm>,
) -> Result<NdArray<T>, DctError> {
    ensure_type_ii(ty)?;
    let axis = canonicalize_axis(axis, x.rank()).ok_or(DctError::InvalidAxis)?;
    let adapted = adapt_axis(x, axis, n)?;
    let mut y = match adapted {
        Some(resized) => resized,
        None => x.clone(),
    };
    let n_len = y.shape()[axis];
    if n_len == 0 {
        return Err(DctError::ZeroLength);
    }
    verbose!("idct-ii: axis={} n={}", axis, n_len);

    // One de-scaling pass always runs; the unnormalized path takes a
    // second. Combined with the 2N factor below this is the type-III
    // inverse of the forward scaling for both norm settings.
    if norm.is_none() {
        ortho_norm(&mut y, axis)?;
    }
    ortho_norm(&mut y, axis)?;

    let w = planner.w4(n_len)?;
    let mut spectrum = y.map(|r| Complex::new(r, T::zero()));
    spectrum.div_axis_factors(axis, &w);
    let scale = T::from_f32(2.0) * T::from_usize(n_len).ok_or(DctError::LengthTooLarge)?;
    for c in spectrum.as_mut_slice() {
        *c = c.scale(scale);
    }
    ifft_axis(&mut spectrum, axis, &planner.fft)?;

    let re = spectrum.map(|c| c.re);
    Ok(deinterleave(&re, axis))
}

/// Joint DCT-II over a pair of axes via a single 2-D FFT.
///
/// The spectrum term for `(k1, k2)` couples with its mirror at
/// `(k1, N2 - k2)`, reached by a flip-and-roll along the second axis, so
/// one joint pass replaces two sequential 1-D sweeps.
fn dct2_pair<T: Float>(
    planner: &mut DctPlanner<T>,
    x: &NdArray<T>,
    axis1: usize,
    axis2: usize,
    norm: Option<Norm>,
) -> Result<NdArray<T>, DctError> {
    let n1 = x.shape()[axis1];
    let n2 = x.shape()[axis2];
    if n1 == 0 || n2 == 0 {
        return Err(DctError::ZeroLength);
    }
    verbose!(
        "dct-ii 2-d fast path: axes=({},{}) n=({},{})",
        axis1,
        axis2,
        n1,
        n2
    );

    let v = interleave(&interleave(x, axis1), axis2);
    let mut spectrum = v.map(|r| Complex::new(r, T::zero()));
    fft_axis(&mut spectrum, axis1, &planner.fft)?;
    fft_axis(&mut spectrum, axis2, &planner.fft)?;

    let w1 = planner.w4(n1)?;
    let w2 = planner.w4(n2)?;
    let w2_neg: Vec<Complex<T>> = w2.iter().map(|w| w.conj()).collect();

    let mut mirror = spectrum.flip_axis(axis2).roll_axis(axis2, 1);
    mirror.mul_axis_factors(axis2, &w2_neg);
    spectrum.mul_axis_factors(axis2, &w2);
    let mut joint = spectrum.zip_map(&mirror, |a, b| a.add(b));
    joint.mul_axis_factors(axis1, &w1);

    let two = T::from_f32(2.0);
    let mut out = joint.map(|c| c.re * two);
    if norm == Some(Norm::Ortho) {
        ortho_norm(&mut out, axis1)?;
        ortho_norm(&mut out, axis2)?;
    }
    Ok(out)
}

fn resolve_axes(
    axes: Option<&[isize]>,
    rank: usize,
) -> Result<Vec<usize>, DctError> {
    match axes {
        None => Ok((0..rank).collect()),
        Some(list) => {
            if list.len() > rank {
                return Err(DctError::AxisCountMismatch);
            }
            let mut out = Vec::with_capacity(list.len());
            for &a in list {
                let axis = canonicalize_axis(a, rank).ok_or(DctError::InvalidAxis)?;
                // duplicates would transform the same axis twice
                if out.contains(&axis) {
                    return Err(DctError::InvalidAxis);
                }
                out.push(axis);
            }
            Ok(out)
        }
    }
}

fn check_lengths(s: Option<&[usize]>, axes: &[usize]) -> Result<(), DctError> {
    if let Some(s) = s {
        if s.len() != axes.len() {
            return Err(DctError::AxisCountMismatch);
        }
        if s.iter().any(|&l| l == 0) {
            return Err(DctError::ZeroLength);
        }
    }
    Ok(())
}

/// Multidimensional DCT-II over `axes` (all axes when omitted).
///
/// `s` gives the per-axis output lengths, applied as one combined
/// pad/truncate before any transform runs. Axis pairs go through the 2-D
/// fast path; longer axis lists decompose into consecutive pairs with an
/// odd trailing axis handled as a single 1-D call.
pub fn dctn<T: Float>(
    planner: &mut DctPlanner<T>,
    x: &NdArray<T>,
    ty: DctType,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Option<Norm>,
) -> Result<NdArray<T>, DctError> {
    ensure_type_ii(ty)?;
    let axes = resolve_axes(axes, x.rank())?;
    check_lengths(s, &axes)?;
    if axes.is_empty() {
        return Ok(x.clone());
    }
    if axes.len() == 1 {
        return dct(planner, x, ty, s.map(|s| s[0]), axes[0] as isize, norm);
    }

    let adapted;
    let x = match s {
        Some(s) => {
            let targets: Vec<(usize, usize)> =
                axes.iter().copied().zip(s.iter().copied()).collect();
            adapted = x.resize_axes(&targets, T::zero());
            &adapted
        }
        None => x,
    };

    if axes.len() == 2 {
        return dct2_pair(planner, x, axes[0], axes[1], norm);
    }

    // Compose higher-rank transforms from 2-D and 1-D blocks; the DCT is
    // separable across independent axes so pairing order is immaterial.
    let mut out = x.clone();
    for block in axes.chunks(2) {
        out = if block.len() == 2 {
            dct2_pair(planner, &out, block[0], block[1], norm)?
        } else {
            dct(planner, &out, DctType::II, None, block[0] as isize, norm)?
        };
    }
    Ok(out)
}

/// Multidimensional inverse DCT over `axes` (all axes when omitted).
///
/// Composes sequential independent 1-D inverse transforms per axis after
/// the combined pad/truncate.
pub fn idctn<T: Float>(
    planner: &mut DctPlanner<T>,
    x: &NdArray<T>,
    ty: DctType,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Option<Norm>,
) -> Result<NdArray<T>, DctError> {
    ensure_type_ii(ty)?;
    let axes = resolve_axes(axes, x.rank())?;
    check_lengths(s, &axes)?;
    if axes.is_empty() {
        return Ok(x.clone());
    }
    if axes.len() == 1 {
        return idct(planner, x, ty, s.map(|s| s[0]), axes[0] as isize, norm);
    }

    let adapted;
    let x = match s {
        Some(s) => {
            let targets: Vec<(usize, usize)> =
                axes.iter().copied().zip(s.iter().copied()).collect();
            adapted = x.resize_axes(&targets, T::zero());
            &adapted
        }
        None => x,
    };

    let mut out = idct(planner, x, DctType::II, None, axes[0] as isize, norm)?;
    for &axis in &axes[1..] {
        out = idct(planner, &out, DctType::II, None, axis as isize, norm)?;
    }
    Ok(out)
}

/// Convenience DCT-II over a 1-D slice.
pub fn dct_1d<T: Float>(
    planner: &mut DctPlanner<T>,
    input: &[T],
    norm: Option<Norm>,
) -> Result<Vec<T>, DctError> {
    let x = NdArray::from_vec(input.to_vec(), &[input.len()]);
    Ok(dct(planner, &x, DctType::II, None, -1, norm)?.into_data())
}

/// Convenience inverse DCT over a 1-D slice.
pub fn idct_1d<T: Float>(
    planner: &mut DctPlanner<T>,
    input: &[T],
    norm: Option<Norm>,
) -> Result<Vec<T>, DctError> {
    let x = NdArray::from_vec(input.to_vec(), &[input.len()]);
    Ok(idct(planner, &x, DctType::II, None, -1, norm)?.into_data())
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_interleave_even_length() {
        let x = NdArray::from_vec(vec![0, 1, 2, 3, 4, 5], &[6]);
        let v = interleave(&x, 0);
        assert_eq!(v.as_slice(), &[0, 2, 4, 5, 3, 1]);
    }

    #[test]
    fn test_interleave_odd_length() {
        let x = NdArray::from_vec(vec![0, 1, 2, 3, 4], &[5]);
        let v = interleave(&x, 0);
        assert_eq!(v.as_slice(), &[0, 2, 4, 3, 1]);
    }

    #[test]
    fn test_deinterleave_restores_order() {
        for len in 1usize..10 {
            let x = NdArray::from_vec((0..len as i64).collect(), &[len]);
            let v = interleave(&x, 0);
            assert_eq!(deinterleave(&v, 0), x, "len={}", len);
            assert_eq!(interleave(&deinterleave(&x, 0), 0), x, "len={}", len);
        }
    }

    #[test]
    fn test_w4_table_values() {
        let mut planner = DctPlanner::<f64>::new();
        let w = planner.w4(4).unwrap();
        assert_eq!(w.len(), 4);
        assert!((w[0].re - 1.0).abs() < 1e-12);
        assert!(w[0].im.abs() < 1e-12);
        // k = 2, N = 4: exp(-iπ/4)
        let expect = Complex::expi(-core::f64::consts::PI / 4.0);
        assert!((w[2].re - expect.re).abs() < 1e-12);
        assert!((w[2].im - expect.im).abs() < 1e-12);
    }

    #[test]
    fn test_dct_length_one_axis() {
        let mut planner = DctPlanner::<f64>::new();
        let x = NdArray::from_vec(vec![3.0], &[1]);
        let y = dct(&mut planner, &x, DctType::II, None, 0, None).unwrap();
        assert!((y.as_slice()[0] - 6.0).abs() < 1e-12);
        let o = dct(&mut planner, &x, DctType::II, None, 0, Some(Norm::Ortho)).unwrap();
        assert!((o.as_slice()[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_type_reported_first() {
        let mut planner = DctPlanner::<f64>::new();
        let x = NdArray::from_vec(vec![1.0, 2.0], &[2]);
        for ty in [DctType::I, DctType::III, DctType::IV] {
            assert_eq!(
                dct(&mut planner, &x, ty, None, 0, None),
                Err(DctError::UnsupportedType)
            );
            assert_eq!(
                idct(&mut planner, &x, ty, None, 0, None),
                Err(DctError::UnsupportedType)
            );
        }
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_dct_idct_recovers_signal(
            signal in proptest::collection::vec(-50.0f64..50.0, 1..20),
        ) {
            let mut planner = DctPlanner::<f64>::new();
            let x = NdArray::from_vec(signal.clone(), &[signal.len()]);
            let y = dct(&mut planner, &x, DctType::II, None, 0, None).unwrap();
            let z = idct(&mut planner, &y, DctType::II, None, 0, None).unwrap();
            for (a, b) in signal.iter().zip(z.as_slice()) {
                prop_assert!((a - b).abs() < 1e-7, "{} vs {}", a, b);
            }
        }
    }
}

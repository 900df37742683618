//! N-dimensional array support for the transform kernels.
//!
//! `NdArray` is an owned contiguous row-major buffer plus shape metadata.
//! Axis-aligned operations (flip, roll, pad/truncate, per-axis factor
//! multiply, FFT along an axis) gather each lane through explicit stride
//! arithmetic, so no implicit broadcasting is involved.
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{FftError, FftImpl};
use crate::num::{Complex, Float};

/// Convert a possibly-negative axis index into its non-negative
/// equivalent for an array of the given rank.
pub fn canonicalize_axis(axis: isize, rank: usize) -> Option<usize> {
    let rank_i = rank as isize;
    if axis >= -rank_i && axis < rank_i {
        if axis < 0 {
            Some((rank_i + axis) as usize)
        } else {
            Some(axis as usize)
        }
    } else {
        None
    }
}

/// Owned row-major N-dimensional array.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray<E> {
    pub(crate) data: Vec<E>,
    shape: Vec<usize>,
}

impl<E: Copy> NdArray<E> {
    /// Wrap a flat buffer in row-major order. The buffer length must equal
    /// the product of the shape entries.
    pub fn from_vec(data: Vec<E>, shape: &[usize]) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(data.len(), expected, "data length does not match shape");
        Self {
            data,
            shape: shape.to_vec(),
        }
    }

    pub fn from_elem(shape: &[usize], value: E) -> Self {
        let len: usize = shape.iter().product();
        Self {
            data: vec![value; len],
            shape: shape.to_vec(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<E> {
        self.data
    }

    pub fn map<E2: Copy, F: FnMut(E) -> E2>(&self, mut f: F) -> NdArray<E2> {
        NdArray {
            data: self.data.iter().map(|&e| f(e)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Elementwise combination of two same-shaped arrays.
    pub fn zip_map<F: FnMut(E, E) -> E>(&self, other: &Self, mut f: F) -> Self {
        assert_eq!(self.shape, other.shape, "shape mismatch");
        Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        }
    }

    /// Decompose the flat index space around `axis`: every element lives at
    /// `(outer * len + k) * inner + i` with `k` the position along the axis.
    pub(crate) fn lane_dims(&self, axis: usize) -> (usize, usize, usize) {
        let len = self.shape[axis];
        let inner: usize = self.shape[axis + 1..].iter().product();
        let outer: usize = self.shape[..axis].iter().product();
        (outer, len, inner)
    }

    /// Pure index permutation along one axis: output position `k` takes the
    /// input element at `src_index(len, k)`.
    pub(crate) fn rearrange_axis<F: Fn(usize, usize) -> usize>(
        &self,
        axis: usize,
        src_index: F,
    ) -> Self {
        let (outer, len, inner) = self.lane_dims(axis);
        let mut out = self.clone();
        for o in 0..outer {
            for k in 0..len {
                let src = src_index(len, k);
                let src_base = (o * len + src) * inner;
                let dst_base = (o * len + k) * inner;
                out.data[dst_base..dst_base + inner]
                    .copy_from_slice(&self.data[src_base..src_base + inner]);
            }
        }
        out
    }

    /// Reverse element order along one axis.
    pub fn flip_axis(&self, axis: usize) -> Self {
        self.rearrange_axis(axis, |len, k| len - 1 - k)
    }

    /// Circularly shift elements along one axis; positive shifts move
    /// elements toward higher indices.
    pub fn roll_axis(&self, axis: usize, shift: isize) -> Self {
        let len = self.shape[axis];
        if len == 0 {
            return self.clone();
        }
        let len_i = len as isize;
        let s = ((shift % len_i) + len_i) % len_i;
        let s = s as usize;
        self.rearrange_axis(axis, |len, k| (k + len - s) % len)
    }

    /// Resize the listed axes to their target lengths in one pass. Growth
    /// appends trailing `fill` elements, shrinkage drops trailing elements;
    /// all other axes keep their lengths.
    pub fn resize_axes(&self, targets: &[(usize, usize)], fill: E) -> Self {
        let mut new_shape = self.shape.clone();
        for &(axis, len) in targets {
            new_shape[axis] = len;
        }
        if new_shape == self.shape {
            return self.clone();
        }
        let mut out = NdArray::from_elem(&new_shape, fill);
        let rank = self.rank();
        let copy_shape: Vec<usize> = (0..rank)
            .map(|d| core::cmp::min(self.shape[d], new_shape[d]))
            .collect();
        if copy_shape.iter().any(|&d| d == 0) {
            return out;
        }
        // Copy the overlapping region row by row (innermost dimension).
        let row = copy_shape[rank - 1];
        let mut idx = vec![0usize; rank - 1];
        loop {
            let mut src = 0usize;
            let mut dst = 0usize;
            for d in 0..rank - 1 {
                src = src * self.shape[d] + idx[d];
                dst = dst * new_shape[d] + idx[d];
            }
            src *= self.shape[rank - 1];
            dst *= new_shape[rank - 1];
            out.data[dst..dst + row].copy_from_slice(&self.data[src..src + row]);
            let mut d = rank - 1;
            loop {
                if d == 0 {
                    return out;
                }
                d -= 1;
                idx[d] += 1;
                if idx[d] < copy_shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
    }
}

impl<E: Copy + core::ops::Mul<Output = E>> NdArray<E> {
    /// Multiply every element by the factor matching its position along
    /// `axis`. `factors` must have the axis length.
    pub fn mul_axis_factors(&mut self, axis: usize, factors: &[E]) {
        let (outer, len, inner) = self.lane_dims(axis);
        assert_eq!(factors.len(), len, "factor length does not match axis");
        for o in 0..outer {
            for (k, &w) in factors.iter().enumerate() {
                let base = (o * len + k) * inner;
                for e in &mut self.data[base..base + inner] {
                    *e = *e * w;
                }
            }
        }
    }
}

impl<E: Copy + core::ops::Div<Output = E>> NdArray<E> {
    /// Divide every element by the factor matching its position along
    /// `axis`. `factors` must have the axis length.
    pub fn div_axis_factors(&mut self, axis: usize, factors: &[E]) {
        let (outer, len, inner) = self.lane_dims(axis);
        assert_eq!(factors.len(), len, "factor length does not match axis");
        for o in 0..outer {
            for (k, &w) in factors.iter().enumerate() {
                let base = (o * len + k) * inner;
                for e in &mut self.data[base..base + inner] {
                    *e = *e / w;
                }
            }
        }
    }
}

/// Forward complex FFT along one axis, lane by lane.
pub fn fft_axis<T: Float, F: FftImpl<T> + ?Sized>(
    x: &mut NdArray<Complex<T>>,
    axis: usize,
    fft: &F,
) -> Result<(), FftError> {
    transform_axis(x, axis, |lane| fft.fft(lane))
}

/// Inverse complex FFT along one axis, lane by lane.
pub fn ifft_axis<T: Float, F: FftImpl<T> + ?Sized>(
    x: &mut NdArray<Complex<T>>,
    axis: usize,
    fft: &F,
) -> Result<(), FftError> {
    transform_axis(x, axis, |lane| fft.ifft(lane))
}

fn transform_axis<T: Float, K: FnMut(&mut [Complex<T>]) -> Result<(), FftError>>(
    x: &mut NdArray<Complex<T>>,
    axis: usize,
    mut kernel: K,
) -> Result<(), FftError> {
    let (outer, len, inner) = x.lane_dims(axis);
    let mut lane = vec![Complex::zero(); len];
    for o in 0..outer {
        for i in 0..inner {
            for (k, l) in lane.iter_mut().enumerate() {
                *l = x.data[(o * len + k) * inner + i];
            }
            kernel(&mut lane)?;
            for (k, l) in lane.iter().enumerate() {
                x.data[(o * len + k) * inner + i] = *l;
            }
        }
    }
    Ok(())
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;
    use crate::fft::ScalarFftImpl;

    #[test]
    fn test_canonicalize_axis() {
        assert_eq!(canonicalize_axis(-1, 3), Some(2));
        assert_eq!(canonicalize_axis(0, 3), Some(0));
        assert_eq!(canonicalize_axis(2, 3), Some(2));
        assert_eq!(canonicalize_axis(3, 3), None);
        assert_eq!(canonicalize_axis(-4, 3), None);
    }

    #[test]
    fn test_flip_axis() {
        let x = NdArray::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
        let f0 = x.flip_axis(0);
        assert_eq!(f0.as_slice(), &[4, 5, 6, 1, 2, 3]);
        let f1 = x.flip_axis(1);
        assert_eq!(f1.as_slice(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_roll_axis() {
        let x = NdArray::from_vec(vec![0, 1, 2, 3], &[4]);
        assert_eq!(x.roll_axis(0, 1).as_slice(), &[3, 0, 1, 2]);
        assert_eq!(x.roll_axis(0, -1).as_slice(), &[1, 2, 3, 0]);
        assert_eq!(x.roll_axis(0, 5).as_slice(), &[3, 0, 1, 2]);
    }

    #[test]
    fn test_resize_axes_pad_and_truncate() {
        let x = NdArray::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
        let padded = x.resize_axes(&[(1, 5)], 0);
        assert_eq!(padded.shape(), &[2, 5]);
        assert_eq!(padded.as_slice(), &[1, 2, 3, 0, 0, 4, 5, 6, 0, 0]);
        let cut = x.resize_axes(&[(1, 2)], 0);
        assert_eq!(cut.shape(), &[2, 2]);
        assert_eq!(cut.as_slice(), &[1, 2, 4, 5]);
        let both = x.resize_axes(&[(0, 3), (1, 2)], 0);
        assert_eq!(both.shape(), &[3, 2]);
        assert_eq!(both.as_slice(), &[1, 2, 4, 5, 0, 0]);
    }

    #[test]
    fn test_mul_axis_factors() {
        let mut x = NdArray::from_vec(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
        x.mul_axis_factors(1, &[1.0, 10.0, 100.0]);
        assert_eq!(x.as_slice(), &[1.0, 20.0, 300.0, 4.0, 50.0, 600.0]);
    }

    #[test]
    fn test_fft_axis_rows_and_columns_agree_with_flat() {
        let fft = ScalarFftImpl::<f64>::default();
        let vals: Vec<Complex<f64>> = (0..6).map(|i| Complex::new(i as f64, 0.0)).collect();
        let mut x = NdArray::from_vec(vals.clone(), &[2, 3]);
        fft_axis(&mut x, 1, &fft).unwrap();
        let mut row0 = vals[0..3].to_vec();
        fft.fft(&mut row0).unwrap();
        for (a, b) in x.as_slice()[0..3].iter().zip(row0.iter()) {
            assert!((a.re - b.re).abs() < 1e-12);
            assert!((a.im - b.im).abs() < 1e-12);
        }
    }
}

//! Complex FFT collaborator used by the DCT engine.
//!
//! `ScalarFftImpl` runs an iterative radix-2 kernel for power-of-two
//! lengths and Bluestein's chirp-z algorithm for everything else, so the
//! DCT layer can pad or truncate an axis to any requested length.
//! no_std + alloc compatible.

extern crate alloc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;

use crate::num::{Complex, Float};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    EmptyInput,
    NonPowerOfTwoNoStd,
    MismatchedLengths,
    InvalidValue,
}

type BluesteinPair<T> = (Arc<[Complex<T>]>, Arc<[Complex<T>]>);

/// Caches per-length twiddle tables and Bluestein chirp pairs so repeated
/// transforms of the same length reuse their trigonometric setup.
pub struct FftPlanner<T: Float> {
    /// Twiddle table for length `n`: `exp(-2πi k / n)` for `k = 0..n/2`.
    cache: HashMap<usize, Arc<[Complex<T>]>>,
    bluestein_cache: HashMap<usize, BluesteinPair<T>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            bluestein_cache: HashMap::new(),
        }
    }

    /// Twiddle table for a power-of-two stage size `n`. The returned slice
    /// has `n / 2` entries holding `exp(-2πi k / n)`.
    pub fn get_twiddles(&mut self, n: usize) -> Result<Arc<[Complex<T>]>, FftError> {
        if !self.cache.contains_key(&n) {
            verbose!("planning fft twiddle table for n={}", n);
            let half = n / 2;
            let n_t = T::from_usize(n).ok_or(FftError::InvalidValue)?;
            let mut table: Vec<Complex<T>> = Vec::with_capacity(half);
            for k in 0..half {
                let k_t = T::from_usize(k).ok_or(FftError::InvalidValue)?;
                let angle = -(T::from_f32(2.0) * T::pi() * k_t) / n_t;
                table.push(Complex::expi(angle));
            }
            self.cache.insert(n, Arc::from(table));
        }
        Ok(Arc::clone(self.cache.get(&n).unwrap()))
    }

    /// Chirp and padded-chirp-spectrum pair for a Bluestein transform of
    /// length `n`. The spectrum has power-of-two length `m >= 2n - 1`.
    #[cfg(feature = "std")]
    pub fn get_bluestein(&mut self, n: usize) -> Result<BluesteinPair<T>, FftError> {
        if !self.bluestein_cache.contains_key(&n) {
            verbose!("planning bluestein chirp pair for n={}", n);
            let m = (2 * n - 1).next_power_of_two();
            let n_t = T::from_usize(n).ok_or(FftError::InvalidValue)?;
            let mut chirp: Vec<Complex<T>> = Vec::with_capacity(n);
            let mut b: Vec<Complex<T>> = Vec::with_capacity(m);
            for i in 0..n {
                // i^2 reduced mod 2n keeps the angle argument exactly
                // representable; exp(-iπ i^2 / n) has period 2n in i^2.
                let t = (i % (2 * n)) as u128;
                let r = ((t * t) % (2 * n as u128)) as usize;
                let r_t = T::from_usize(r).ok_or(FftError::InvalidValue)?;
                let angle = T::pi() * r_t / n_t;
                chirp.push(Complex::expi(-angle));
                b.push(Complex::expi(angle));
            }
            b.resize(m, Complex::zero());
            for i in 1..n {
                b[m - i] = b[i];
            }
            let twiddles = self.get_twiddles(m)?;
            radix2_in_place(&mut b, &twiddles);
            self.bluestein_cache
                .insert(n, (Arc::from(chirp), Arc::from(b)));
        }
        let pair = self.bluestein_cache.get(&n).unwrap();
        Ok((Arc::clone(&pair.0), Arc::clone(&pair.1)))
    }
}

/// Iterative radix-2 Cooley-Tukey kernel. `input.len()` must be a power of
/// two and `twiddles` the matching table from [`FftPlanner::get_twiddles`].
fn radix2_in_place<T: Float>(input: &mut [Complex<T>], twiddles: &[Complex<T>]) {
    let n = input.len();
    if n < 2 {
        return;
    }
    // bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            input.swap(i, j);
        }
    }
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = n / len;
        let mut base = 0;
        while base < n {
            for k in 0..half {
                let w = twiddles[k * step];
                let u = input[base + k];
                let v = input[base + k + half].mul(w);
                input[base + k] = u.add(v);
                input[base + k + half] = u.sub(v);
            }
            base += len;
        }
        len <<= 1;
    }
}

pub trait FftImpl<T: Float> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    fn fft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedLengths);
        }
        output.copy_from_slice(input);
        self.fft(output)
    }
    fn ifft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedLengths);
        }
        output.copy_from_slice(input);
        self.ifft(output)
    }
}

pub struct ScalarFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for ScalarFftImpl<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> ScalarFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }
}

impl<T: Float> FftImpl<T> for ScalarFftImpl<T> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if n == 1 {
            return Ok(());
        }
        if n.is_power_of_two() {
            let twiddles = self.planner.borrow_mut().get_twiddles(n)?;
            radix2_in_place(input, &twiddles);
            return Ok(());
        }
        // Bluestein's algorithm for non-power-of-two lengths
        #[cfg(not(feature = "std"))]
        {
            Err(FftError::NonPowerOfTwoNoStd)
        }
        #[cfg(feature = "std")]
        {
            let (chirp, fft_b) = self.planner.borrow_mut().get_bluestein(n)?;
            let m = fft_b.len();
            let mut a: Vec<Complex<T>> = Vec::with_capacity(m);
            for (i, &val) in input.iter().enumerate() {
                a.push(val.mul(chirp[i]));
            }
            a.resize(m, Complex::zero());
            self.fft(&mut a)?;
            for (ai, &bi) in a.iter_mut().zip(fft_b.iter()) {
                *ai = ai.mul(bi);
            }
            self.ifft(&mut a)?;
            for (i, out) in input.iter_mut().enumerate() {
                *out = a[i].mul(chirp[i]);
            }
            Ok(())
        }
    }

    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if n == 1 {
            return Ok(());
        }
        for c in input.iter_mut() {
            c.im = -c.im;
        }
        self.fft(input)?;
        let scale = T::one() / T::from_usize(n).ok_or(FftError::InvalidValue)?;
        for c in input.iter_mut() {
            c.im = -c.im;
            c.re = c.re * scale;
            c.im = c.im * scale;
        }
        Ok(())
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;
    use alloc::vec;

    fn naive_dft(input: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let n = input.len();
        let mut out = vec![Complex::zero(); n];
        for (k, o) in out.iter_mut().enumerate() {
            for (t, &x) in input.iter().enumerate() {
                let angle = -2.0 * core::f64::consts::PI * (k * t) as f64 / n as f64;
                *o = o.add(x.mul(Complex::expi(angle)));
            }
        }
        out
    }

    #[test]
    fn test_fft_matches_naive_dft_pow2() {
        let fft = ScalarFftImpl::<f64>::default();
        let mut data: Vec<Complex<f64>> = (0..8)
            .map(|i| Complex::new(i as f64 + 1.0, -(i as f64)))
            .collect();
        let expect = naive_dft(&data);
        fft.fft(&mut data).unwrap();
        for (a, b) in data.iter().zip(expect.iter()) {
            assert!((a.re - b.re).abs() < 1e-9);
            assert!((a.im - b.im).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fft_matches_naive_dft_bluestein() {
        let fft = ScalarFftImpl::<f64>::default();
        for n in [3usize, 5, 6, 7, 9, 12] {
            let mut data: Vec<Complex<f64>> = (0..n)
                .map(|i| Complex::new((i * i) as f64 * 0.25 - 1.0, 0.5 * i as f64))
                .collect();
            let expect = naive_dft(&data);
            fft.fft(&mut data).unwrap();
            for (a, b) in data.iter().zip(expect.iter()) {
                assert!((a.re - b.re).abs() < 1e-8, "n={}", n);
                assert!((a.im - b.im).abs() < 1e-8, "n={}", n);
            }
        }
    }

    #[test]
    fn test_fft_roundtrip_random_signals() {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let fft = ScalarFftImpl::<f64>::default();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for n in [4usize, 8, 11, 16, 18] {
            let orig: Vec<Complex<f64>> = (0..n)
                .map(|_| Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect();
            let mut data = orig.clone();
            fft.fft(&mut data).unwrap();
            fft.ifft(&mut data).unwrap();
            for (a, b) in data.iter().zip(orig.iter()) {
                assert!((a.re - b.re).abs() < 1e-9, "n={}", n);
                assert!((a.im - b.im).abs() < 1e-9, "n={}", n);
            }
        }
    }

    #[test]
    fn test_ifft_roundtrip_arbitrary_length() {
        let fft = ScalarFftImpl::<f64>::default();
        for n in [1usize, 2, 4, 5, 7, 16, 21] {
            let orig: Vec<Complex<f64>> = (0..n)
                .map(|i| Complex::new(i as f64 - 2.5, (n - i) as f64 * 0.125))
                .collect();
            let mut data = orig.clone();
            fft.fft(&mut data).unwrap();
            fft.ifft(&mut data).unwrap();
            for (a, b) in data.iter().zip(orig.iter()) {
                assert!((a.re - b.re).abs() < 1e-9, "n={}", n);
                assert!((a.im - b.im).abs() < 1e-9, "n={}", n);
            }
        }
    }

    #[test]
    fn test_fft_empty_input() {
        let fft = ScalarFftImpl::<f32>::default();
        let mut data: Vec<Complex<f32>> = vec![];
        assert_eq!(fft.fft(&mut data), Err(FftError::EmptyInput));
        assert_eq!(fft.ifft(&mut data), Err(FftError::EmptyInput));
    }

    #[test]
    fn test_out_of_place_length_mismatch() {
        let fft = ScalarFftImpl::<f32>::default();
        let input = vec![Complex::new(1.0f32, 0.0); 4];
        let mut output = vec![Complex::zero(); 3];
        assert_eq!(
            fft.fft_out_of_place(&input, &mut output),
            Err(FftError::MismatchedLengths)
        );
    }
}

//! # ndct - FFT-based DCT-II for N-dimensional arrays
//!
//! Computes the Discrete Cosine Transform (type II) and its inverse for
//! one- and multi-dimensional real arrays by reduction to a complex FFT:
//! even/odd sample interleaving plus a twiddle-factor phase correction
//! (Makhoul's algorithm). Optimized for correctness of the composition
//! layers rather than FFT throughput.
//!
//! ## Features
//!
//! - **1-D and N-D transforms**: `dct`/`idct` along any axis, `dctn`/`idctn`
//!   over any axis list, with a joint 2-D fast path for axis pairs
//! - **Shape adaptation**: per-axis zero-padding or truncation before the
//!   transform (`n`/`s` arguments)
//! - **Orthonormal normalization**: optional energy-preserving scaling
//! - **Arbitrary lengths**: radix-2 FFT for powers of two, Bluestein
//!   otherwise (the latter needs the `std` feature)
//! - **f32 and f64** element types through the [`Float`] trait
//!
//! ## Cargo Features
//!
//! - `std` (default): enables non-power-of-two transform lengths
//! - `verbose-logging`: `log` output from the planners
//! - `internal-tests`: property-based unit test support
//!
//! ## Example
//!
//! ```rust
//! use ndct::dct::{dct, idct, DctPlanner, DctType, Norm};
//! use ndct::nd::NdArray;
//!
//! let mut planner = DctPlanner::<f64>::new();
//! let x = NdArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]);
//! let y = dct(&mut planner, &x, DctType::II, None, -1, Some(Norm::Ortho)).unwrap();
//! let z = idct(&mut planner, &y, DctType::II, None, -1, Some(Norm::Ortho)).unwrap();
//! for (a, b) in x.as_slice().iter().zip(z.as_slice()) {
//!     assert!((a - b).abs() < 1e-9);
//! }
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license (https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;

#[cfg(feature = "verbose-logging")]
macro_rules! verbose {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "verbose-logging"))]
macro_rules! verbose {
    ($($arg:tt)*) => {{}};
}

/// Complex FFT collaborator (radix-2 and Bluestein kernels)
pub mod fft;

/// Float abstraction and complex arithmetic
pub mod num;

/// N-dimensional array container and axis primitives
pub mod nd;

/// DCT-II / inverse DCT engine and N-D composition
pub mod dct;

pub use dct::{
    dct, dct_1d, dctn, deinterleave, idct, idct_1d, idctn, interleave, DctError, DctPlanner,
    DctType, Norm,
};
pub use fft::{FftError, FftImpl, FftPlanner, ScalarFftImpl};
pub use nd::{canonicalize_axis, fft_axis, ifft_axis, NdArray};
pub use num::{Complex, Complex32, Complex64, Float};

//! Diffraction intensity
//!
//! The Fraunhofer pattern on the screen is the modulus of the 2D Fourier
//! transform of the aperture, with the zero frequency at the center.

use fft2d::slice::fft_2d;
use ndarray::{Array2, ArrayBase, Data, Ix2};
use num_complex::Complex;

use crate::Screen;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransformError {
    #[error("cannot transform an empty aperture of shape ({0},{1})")]
    Empty(usize, usize),
    #[error("aperture value at ({row},{col}) is not finite")]
    NonFinite { row: usize, col: usize },
}
type Result<T> = std::result::Result<T, TransformError>;

/// Computes the screen diffraction pattern
///
/// The transform is not normalized: the center of the screen holds the sum of
/// the aperture values.
pub fn compute_intensity<S, A>(aperture: &ArrayBase<S, Ix2>) -> Result<Screen>
where
    S: Data<Elem = A>,
    A: Copy + Into<Complex<f64>>,
{
    let (height, width) = aperture.dim();
    if height == 0 || width == 0 {
        return Err(TransformError::Empty(height, width));
    }
    let mut buffer = Vec::with_capacity(height * width);
    for ((row, col), &value) in aperture.indexed_iter() {
        let value: Complex<f64> = value.into();
        if !value.is_finite() {
            return Err(TransformError::NonFinite { row, col });
        }
        buffer.push(value);
    }
    fft_2d(width, height, &mut buffer);
    // the transform comes out transposed
    let spectrum =
        Array2::from_shape_fn((height, width), |(row, col)| buffer[col * height + row]);
    Ok(fftshift(&spectrum).mapv(|c| c.norm()))
}

/// Moves the zero frequency component to the center of the array
///
/// Each axis of length `n` is rolled by `n/2`.
pub fn fftshift<S, A>(array: &ArrayBase<S, Ix2>) -> Array2<A>
where
    S: Data<Elem = A>,
    A: Clone,
{
    let (n_row, n_col) = array.dim();
    Array2::from_shape_fn((n_row, n_col), |(i, j)| {
        array[[(i + n_row - n_row / 2) % n_row, (j + n_col - n_col / 2) % n_col]].clone()
    })
}

//! Centered crop of the screen

use ndarray::{s, Array2, ArrayBase, Data, Ix2};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CropError {
    #[error("crop fraction must be a positive number, found {0}")]
    Fraction(f64),
    #[error("crop fraction leaves an empty array of shape ({rows},{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("cannot rescale a cropped array with a maximum of zero")]
    ZeroMaximum,
    #[error("cropped array maximum is not finite: {0}")]
    NonFinite(f64),
}
type Result<T> = std::result::Result<T, CropError>;

/// Crops `screen` around its center, keeping the fraction `k` of each dimension
///
/// The cropped array is divided by its maximum.
/// The cropped region starts at `n/2 - (k n)/2` along each axis of length `n`
/// (integer divisions), and `k >= 1` keeps the whole array.
pub fn crop<S>(screen: &ArrayBase<S, Ix2>, k: f64) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    if !k.is_finite() || k <= 0f64 {
        return Err(CropError::Fraction(k));
    }
    let (n_row, n_col) = screen.dim();
    let crop_size = |n: usize| ((k * n as f64) as usize).min(n);
    let (rows, cols) = (crop_size(n_row), crop_size(n_col));
    if rows == 0 || cols == 0 {
        return Err(CropError::Empty { rows, cols });
    }
    let (start_row, start_col) = (n_row / 2 - rows / 2, n_col / 2 - cols / 2);
    let cropped = screen.slice(s![start_row..start_row + rows, start_col..start_col + cols]);

    if let Some(&nan) = cropped.iter().find(|x| x.is_nan()) {
        return Err(CropError::NonFinite(nan));
    }
    let max = cropped.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(CropError::NonFinite(max));
    }
    if max == 0f64 {
        return Err(CropError::ZeroMaximum);
    }
    Ok(cropped.mapv(|x| x / max))
}

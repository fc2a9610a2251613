//! NumPy array files
//!
//! Apertures and screens are saved to and loaded from `.npy` files of `f64`.

use ndarray::{Array2, ArrayBase, Data, Ix2, ShapeBuilder};
use npyz::{NpyFile, Order, WriterBuilder};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum NpyError {
    #[error("failed to access the array file {1:?}")]
    Io(#[source] io::Error, PathBuf),
    #[error("expected a 2D array, found shape {0:?}")]
    Shape(Vec<u64>),
}
type Result<T> = std::result::Result<T, NpyError>;

/// Writes `array` into the `.npy` file at `path`
pub fn save<S, P>(path: P, array: &ArrayBase<S, Ix2>) -> Result<()>
where
    S: Data<Elem = f64>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let io_error = |e: io::Error| NpyError::Io(e, path.to_path_buf());
    let (n_row, n_col) = array.dim();
    let file = File::create(path).map_err(io_error)?;
    let mut writer: npyz::NpyWriter<f64, _> = npyz::WriteOptions::new()
        .default_dtype()
        .shape(&[n_row as u64, n_col as u64])
        .writer(BufWriter::new(file))
        .begin_nd()
        .map_err(io_error)?;
    for value in array.iter() {
        writer.push(value).map_err(io_error)?;
    }
    writer.finish().map_err(io_error)?;
    log::debug!("saved {}x{} array to {:?}", n_row, n_col, path);
    Ok(())
}

/// Reads a 2D array of `f64` from the `.npy` file at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let io_error = |e: io::Error| NpyError::Io(e, path.to_path_buf());
    let file = File::open(path).map_err(io_error)?;
    let npy = NpyFile::new(BufReader::new(file)).map_err(io_error)?;
    let shape = npy.shape().to_vec();
    let (n_row, n_col) = match shape.as_slice() {
        &[n_row, n_col] => (n_row as usize, n_col as usize),
        _ => return Err(NpyError::Shape(shape)),
    };
    let fortran = matches!(npy.order(), Order::Fortran);
    let data: Vec<f64> = npy.into_vec().map_err(io_error)?;
    let array = if fortran {
        Array2::from_shape_vec((n_row, n_col).f(), data)
    } else {
        Array2::from_shape_vec((n_row, n_col), data)
    };
    array.map_err(|_| NpyError::Shape(shape))
}

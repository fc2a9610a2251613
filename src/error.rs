use crate::{aperture::LoaderError, crop::CropError, intensity::TransformError, npy::NpyError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `aperture` module")]
    Loader(#[from] LoaderError),
    #[error("Error in the `intensity` module")]
    Transform(#[from] TransformError),
    #[error("Error in the `crop` module")]
    Crop(#[from] CropError),
    #[error("Error in the `npy` module")]
    Npy(#[from] NpyError),
    #[cfg(feature = "plot")]
    #[error("Error in the `render` module")]
    Plot(#[from] crate::render::PlotError),
}

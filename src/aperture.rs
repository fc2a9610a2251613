//! Aperture loader
//!
//! Decodes an image of the diffracting opening into a 2D array of intensities
//! normalized to [0,1].

use image::{imageops, DynamicImage, GrayImage, ImageError, Luma};
use ndarray::Array2;
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crate::Aperture;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to decode the aperture image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}
type Result<T> = std::result::Result<T, LoaderError>;

/// Gray levels of a single bit image
const WHITE: f64 = 255f64;

/// Conversion of the grayscale image into the binary aperture mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binarization {
    /// Floyd-Steinberg error diffusion onto {0,255}
    #[default]
    Dither,
    /// Pixels strictly above the threshold are set to 255, the others to 0
    Threshold(u8),
    /// Grayscale levels are kept
    None,
}
impl Binarization {
    fn apply(self, mut image: GrayImage) -> GrayImage {
        match self {
            Binarization::Dither => {
                imageops::dither(&mut image, &imageops::BiLevel);
                image
            }
            Binarization::Threshold(level) => imageproc::contrast::threshold(&image, level),
            Binarization::None => image,
        }
    }
}

/// Aperture image loader
///
/// ```rust,no_run
/// use fraunhofer::{aperture::Binarization, ApertureLoader};
///
/// let aperture = ApertureLoader::default()
///     .binarization(Binarization::Threshold(127))
///     .load("slit.png")?;
/// # Ok::<(), fraunhofer::aperture::LoaderError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct ApertureLoader {
    binarization: Binarization,
}
impl ApertureLoader {
    pub fn binarization(self, binarization: Binarization) -> Self {
        Self { binarization }
    }
    /// Loads the image at `path` into an array of shape (height, width)
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<Aperture> {
        let path = path.as_ref();
        log::info!("Loading {:?}...", path);
        let now = Instant::now();
        let image = image::open(path).map_err(|source| LoaderError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let image = to_gray(&image);
        log::debug!("{:?}: {}x{} pixels", path, image.width(), image.height());
        let mask = self.binarization.apply(image);
        let aperture = gray_to_array(&mask);
        log::info!("... loaded in {:}ms", now.elapsed().as_millis());
        Ok(aperture)
    }
}

/// Loads the aperture image at `path` with the default binarization
pub fn image_to_array<P: AsRef<Path>>(path: P) -> Result<Aperture> {
    ApertureLoader::default().load(path)
}

/// Converts to 8 bit grayscale with the ITU-R 601-2 luma transform
///
/// L = (19595 R + 38470 G + 7471 B + 2^15) / 2^16, gray levels are unchanged
fn to_gray(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000) >> 16;
        Luma([luma as u8])
    })
}

fn gray_to_array(image: &GrayImage) -> Array2<f64> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        image.get_pixel(x as u32, y as u32).0[0] as f64 / WHITE
    })
}

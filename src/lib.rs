/*!
# Fraunhofer diffraction

Far-field diffraction patterns of binary apertures.

The aperture image is loaded into an array of values in [0,1] ([image_to_array]),
the pattern on the screen is the modulus of the centered 2D Fourier transform
of the aperture ([compute_intensity]), the screen can be cropped around its
center and rescaled ([crop]) and both arrays are drawn side by side
([render::plot], with the `plot` feature).

```rust,no_run
use fraunhofer::{compute_intensity, crop, image_to_array};

let aperture = image_to_array("circular_aperture.png")?;
let screen = compute_intensity(&aperture)?;
let screen = crop(&screen, 0.2)?;
println!("screen: {:?}", screen.dim());
# Ok::<(), fraunhofer::Error>(())
```
*/

use ndarray::Array2;

pub mod aperture;
pub mod crop;
mod error;
pub mod intensity;
pub mod npy;
#[cfg(feature = "plot")]
pub mod render;

pub use aperture::{image_to_array, ApertureLoader};
pub use crop::crop;
pub use error::Error;
pub use intensity::compute_intensity;
#[cfg(feature = "plot")]
pub use render::{plot, Colormap, Figure};

/// Aperture transmission, (height,width) array of values in [0,1]
pub type Aperture = Array2<f64>;
/// Diffraction intensity on the screen
pub type Screen = Array2<f64>;

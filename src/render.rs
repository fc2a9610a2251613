/*!
# Aperture and screen figure

Draws the aperture and its diffraction pattern as two images side by side.

The figure is drawn on a drawing area provided by the caller, so any
[plotters] backend can be used and several figures can be rendered at once.
[Figure::save] is a shortcut that writes the figure into a PNG or SVG file.

```rust,no_run
use fraunhofer::{compute_intensity, crop, image_to_array, Colormap, Figure};

let aperture = image_to_array("slit.png")?;
let screen = crop(&compute_intensity(&aperture)?, 0.25)?;
Figure::default()
    .title("Single slit")
    .colormap(Colormap::Inferno)
    .save("slit_diffraction.png", &aperture, &screen)?;
# Ok::<(), fraunhofer::Error>(())
```
*/

use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};
use plotters::{coord::Shift, prelude::*};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Pixels per inch of the rendered figure
pub const DPI: f64 = 100f64;
/// Font size of the panel titles [pt]
const CAPTION_SIZE: f64 = 12f64;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw the figure: {0}")]
    Drawing(String),
    #[error("cannot draw an empty array of shape ({0},{1})")]
    Empty(usize, usize),
}
type Result<T> = std::result::Result<T, PlotError>;

fn drawing<E>(error: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Drawing(error.to_string())
}

/// Font size conversion from points to pixels
fn points_to_pixels(size: f64) -> f64 {
    size * DPI / 72f64
}

/// Colormaps of the aperture and screen images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Inferno,
    Magma,
    Plasma,
    Cividis,
    Greys,
    Cubehelix,
}
impl Colormap {
    pub fn gradient(&self) -> colorous::Gradient {
        match self {
            Colormap::Viridis => colorous::VIRIDIS,
            Colormap::Inferno => colorous::INFERNO,
            Colormap::Magma => colorous::MAGMA,
            Colormap::Plasma => colorous::PLASMA,
            Colormap::Cividis => colorous::CIVIDIS,
            Colormap::Greys => colorous::GREYS,
            Colormap::Cubehelix => colorous::CUBEHELIX,
        }
    }
}

/// Figure layout
#[derive(Debug, Clone)]
pub struct Figure {
    figsize: (f64, f64),
    title: Option<String>,
    titlesize: f64,
    colormap: Colormap,
}
impl Default for Figure {
    fn default() -> Self {
        Self {
            figsize: (6.4, 4.8),
            title: None,
            titlesize: 14f64,
            colormap: Colormap::default(),
        }
    }
}
impl Figure {
    /// Figure (width,height) in inches
    pub fn figsize(self, figsize: (f64, f64)) -> Self {
        Self { figsize, ..self }
    }
    /// Figure title
    pub fn title<S: Into<String>>(self, title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }
    /// Figure title font size in points
    pub fn titlesize(self, titlesize: f64) -> Self {
        Self { titlesize, ..self }
    }
    pub fn colormap(self, colormap: Colormap) -> Self {
        Self { colormap, ..self }
    }
    /// Figure (width,height) in pixels
    pub fn size_in_pixels(&self) -> (u32, u32) {
        let (width, height) = self.figsize;
        ((width * DPI).round() as u32, (height * DPI).round() as u32)
    }
    /// Renders the figure into a file
    ///
    /// The file is written with the SVG backend if its extension is `svg`,
    /// otherwise with the bitmap backend.
    pub fn save<P, S1, S2>(
        &self,
        path: P,
        aperture: &ArrayBase<S1, Ix2>,
        screen: &ArrayBase<S2, Ix2>,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        let path = path.as_ref();
        log::info!("making figure: {:?}", path);
        let size = self.size_in_pixels();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            plot(&root, aperture, screen, self)?;
            root.present().map_err(drawing)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            plot(&root, aperture, screen, self)?;
            root.present().map_err(drawing)
        }
    }
}

/// Draws the aperture (left) and the screen (right) on `root`
///
/// Each array is color mapped over its own range of values.
/// No axis is drawn.
pub fn plot<DB, S1, S2>(
    root: &DrawingArea<DB, Shift>,
    aperture: &ArrayBase<S1, Ix2>,
    screen: &ArrayBase<S2, Ix2>,
    figure: &Figure,
) -> Result<()>
where
    DB: DrawingBackend,
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    root.fill(&WHITE).map_err(drawing)?;
    let area = match &figure.title {
        Some(title) => root
            .titled(title, ("sans-serif", points_to_pixels(figure.titlesize)))
            .map_err(drawing)?,
        None => root.clone(),
    };
    let panels = area.split_evenly((1, 2));
    for ((panel, array), caption) in panels
        .iter()
        .zip([aperture.view(), screen.view()])
        .zip(["Aperture", "Screen"])
    {
        draw_image(panel, array, caption, figure.colormap)?;
    }
    Ok(())
}

fn draw_image<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    array: ArrayView2<f64>,
    caption: &str,
    colormap: Colormap,
) -> Result<()> {
    let (n_row, n_col) = array.dim();
    if n_row == 0 || n_col == 0 {
        return Err(PlotError::Empty(n_row, n_col));
    }
    let panel = panel
        .titled(caption, ("sans-serif", points_to_pixels(CAPTION_SIZE)))
        .map_err(drawing)?;
    paint_cells(&panel, array, colormap)
}

/// Paints the array cells in the largest box with square cells of `area`
///
/// Row 0 is at the top of the box.
fn paint_cells<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    array: ArrayView2<f64>,
    colormap: Colormap,
) -> Result<()> {
    let (n_row, n_col) = array.dim();
    let (left, top, width, height) = letterbox(area.dim_in_pixel(), (n_row, n_col));
    let values = normalize(array);
    let gradient = colormap.gradient();
    for y in 0..height {
        let i = (y as usize * n_row) / height as usize;
        for x in 0..width {
            let j = (x as usize * n_col) / width as usize;
            let color = gradient.eval_continuous(values[[i, j]]);
            area.draw_pixel(
                ((left + x) as i32, (top + y) as i32),
                &RGBColor(color.r, color.g, color.b),
            )
            .map_err(drawing)?;
        }
    }
    Ok(())
}

/// Largest box with square cells of an array of `shape` (rows,columns) centered in `area` (width,height)
///
/// Returns the box (left,top,width,height) in pixels.
fn letterbox(area: (u32, u32), shape: (usize, usize)) -> (u32, u32, u32, u32) {
    let (area_width, area_height) = area;
    let (n_row, n_col) = shape;
    let scale = (area_width as f64 / n_col as f64).min(area_height as f64 / n_row as f64);
    let width = ((scale * n_col as f64) as u32).min(area_width);
    let height = ((scale * n_row as f64) as u32).min(area_height);
    (
        (area_width - width) / 2,
        (area_height - height) / 2,
        width,
        height,
    )
}

/// Normalize the array to the [0,1] range
///
/// A constant array maps to 0.5
fn normalize(array: ArrayView2<f64>) -> Array2<f64> {
    let max_val = array.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_val = array.iter().cloned().fold(f64::INFINITY, f64::min);
    let range = max_val - min_val;
    if range > 0f64 {
        array.mapv(|x| (x - min_val) / range)
    } else {
        Array2::from_elem(array.dim(), 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn figure_size() {
        assert_eq!(Figure::default().size_in_pixels(), (640, 480));
        assert_eq!(
            Figure::default().figsize((12., 4.5)).size_in_pixels(),
            (1200, 450)
        );
    }

    #[test]
    fn colormap_names() {
        assert_eq!(Colormap::from_str("inferno").unwrap(), Colormap::Inferno);
        assert!(Colormap::from_str("jet").is_err());
        for colormap in Colormap::iter() {
            assert_eq!(
                Colormap::from_str(&colormap.to_string()).unwrap(),
                colormap
            );
        }
    }

    #[test]
    fn normalized_values() {
        let values = normalize(array![[1f64, 2f64], [3f64, 5f64]].view());
        assert_eq!(values, array![[0f64, 0.25], [0.5, 1f64]]);
        let values = normalize(Array2::<f64>::zeros((2, 3)).view());
        assert!(values.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn square_cells() {
        // wide array in a tall panel
        assert_eq!(letterbox((300, 400), (10, 30)), (0, 150, 300, 100));
        // tall array in a wide panel
        assert_eq!(letterbox((400, 300), (30, 10)), (150, 0, 100, 300));
        assert_eq!(letterbox((200, 200), (5, 5)), (0, 0, 200, 200));
    }

    #[test]
    fn empty_array() {
        let figure = Figure::default();
        let (width, height) = figure.size_in_pixels();
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let result = plot(
            &root,
            &Array2::<f64>::zeros((0, 4)),
            &Array2::<f64>::ones((4, 4)),
            &figure,
        );
        assert!(matches!(result, Err(PlotError::Empty(0, 4))));
    }

    fn rgb_at(buffer: &[u8], width: u32, (x, y): (u32, u32)) -> [u8; 3] {
        let k = 3 * (y * width + x) as usize;
        [buffer[k], buffer[k + 1], buffer[k + 2]]
    }

    fn rgb(colormap: Colormap, value: f64) -> [u8; 3] {
        let color = colormap.gradient().eval_continuous(value);
        [color.r, color.g, color.b]
    }

    #[test]
    fn cells_layout() {
        let (width, height) = (60u32, 40u32);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            let panels = root.split_evenly((1, 2));
            // bright first row on the left, constant array on the right
            let aperture = Array2::from_shape_fn((3, 3), |(i, _)| (i == 0) as u8 as f64);
            let screen = Array2::<f64>::ones((2, 2));
            paint_cells(&panels[0], aperture.view(), Colormap::Viridis).unwrap();
            paint_cells(&panels[1], screen.view(), Colormap::Viridis).unwrap();
            root.present().unwrap();
        }
        let white = [255u8, 255, 255];
        // 30x40 panels letterbox the square arrays into 30x30 boxes starting at y=5
        for x in [0, 15, 29, 30, 45, 59] {
            assert_eq!(rgb_at(&buffer, width, (x, 2)), white);
            assert_eq!(rgb_at(&buffer, width, (x, 37)), white);
        }
        let bright = rgb(Colormap::Viridis, 1.0);
        let dark = rgb(Colormap::Viridis, 0.0);
        let middle = rgb(Colormap::Viridis, 0.5);
        for x in [0, 15, 29] {
            assert_eq!(rgb_at(&buffer, width, (x, 5)), bright);
            assert_eq!(rgb_at(&buffer, width, (x, 14)), bright);
            assert_eq!(rgb_at(&buffer, width, (x, 15)), dark);
            assert_eq!(rgb_at(&buffer, width, (x, 34)), dark);
        }
        for (x, y) in [(30, 5), (45, 20), (59, 34)] {
            assert_eq!(rgb_at(&buffer, width, (x, y)), middle);
        }
    }

    #[test]
    fn draw_to_buffer() {
        let figure = Figure::default().figsize((4., 2.)).title("slit");
        let (width, height) = figure.size_in_pixels();
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let aperture = Array2::from_shape_fn((8, 8), |(_, j)| (j == 3) as u8 as f64);
            let screen = Array2::from_shape_fn((8, 8), |(i, _)| (i == 4) as u8 as f64);
            plot(&root, &aperture, &screen, &figure).unwrap();
            root.present().unwrap();
        }
        let white = [255u8, 255, 255];
        assert_eq!(rgb_at(&buffer, width, (0, 0)), white);
        let bright = rgb(Colormap::Viridis, 1.0);
        let has_bright = |columns: std::ops::Range<u32>| {
            (0..height).any(|y| columns.clone().any(|x| rgb_at(&buffer, width, (x, y)) == bright))
        };
        assert!(has_bright(0..width / 2));
        assert!(has_bright(width / 2..width));
    }
}

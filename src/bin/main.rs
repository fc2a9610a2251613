use fraunhofer::{aperture::Binarization, compute_intensity, crop, npy, ApertureLoader, Colormap, Figure};
use ndarray::Array2;
use std::{fs::create_dir_all, path::PathBuf, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "fraunhofer", about = "Fraunhofer diffraction pattern of an aperture")]
struct Opt {
    /// Aperture image or NumPy `.npy` array file
    #[structopt(parse(from_os_str))]
    aperture: PathBuf,
    /// Keeps the fraction `k` of the screen around its center
    #[structopt(short = "k", long = "crop")]
    crop: Option<f64>,
    /// Figure file (PNG or SVG)
    #[structopt(short, long, parse(from_os_str), default_value = "diffraction.png")]
    output: PathBuf,
    /// Figure width and height in inches
    #[structopt(long, number_of_values = 2)]
    figsize: Option<Vec<f64>>,
    /// Figure title
    #[structopt(short, long)]
    title: Option<String>,
    /// Figure title font size in points
    #[structopt(long)]
    titlesize: Option<f64>,
    /// Images colormap
    #[structopt(long, default_value = "viridis")]
    colormap: Colormap,
    /// Binarizes the aperture image with a threshold instead of dithering
    #[structopt(long)]
    threshold: Option<u8>,
    /// Saves the aperture and the screen as `.npy` files in this directory
    #[structopt(long, parse(from_os_str))]
    npy: Option<PathBuf>,
}

fn summary(name: &str, array: &Array2<f64>) {
    let max_value = array.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_value = array.iter().cloned().fold(f64::INFINITY, f64::min);
    println!(
        " - {:<8}: {:>4}x{:<4} [{:>12.3e},{:>12.3e}]",
        name,
        array.nrows(),
        array.ncols(),
        min_value,
        max_value
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let now = Instant::now();
    let is_npy = opt
        .aperture
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("npy"));
    let aperture = if is_npy {
        npy::load(&opt.aperture)?
    } else {
        let mut loader = ApertureLoader::default();
        if let Some(level) = opt.threshold {
            loader = loader.binarization(Binarization::Threshold(level));
        }
        loader.load(&opt.aperture)?
    };

    let mut screen = compute_intensity(&aperture)?;
    if let Some(k) = opt.crop {
        screen = crop(&screen, k)?;
    }
    log::info!("diffraction pattern computed in {}ms", now.elapsed().as_millis());

    println!("SUMMARY:");
    summary("aperture", &aperture);
    summary("screen", &screen);

    if let Some(dir) = opt.npy {
        create_dir_all(&dir)?;
        npy::save(dir.join("aperture.npy"), &aperture)?;
        npy::save(dir.join("screen.npy"), &screen)?;
        println!("arrays saved to {:?}", dir);
    }

    let mut figure = Figure::default().colormap(opt.colormap);
    if let Some(size) = opt.figsize {
        figure = figure.figsize((size[0], size[1]));
    }
    if let Some(title) = opt.title {
        figure = figure.title(title);
    }
    if let Some(titlesize) = opt.titlesize {
        figure = figure.titlesize(titlesize);
    }
    figure.save(&opt.output, &aperture, &screen)?;
    println!("figure saved to {:?}", opt.output);

    Ok(())
}

use std::{ f64::consts::PI, fs::{ self, File }, path::PathBuf };
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use num_complex::Complex64 as C64;
use xyspace::{
    grid::{ ComplexGrid, Domain },
    spectral::SpectralGrid2D,
    utils,
};

// transform a Gaussian-enveloped plane wave to momentum space, and check that
// a forward/inverse round trip reproduces it

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 32)]
    nx: usize,

    #[arg(long, default_value_t = 32)]
    ny: usize,

    #[arg(long, default_value_t = 0.0)]
    x_mode: f64,

    #[arg(long, default_value_t = 5.0)]
    y_mode: f64,

    /// Directory to write output to.
    #[arg(long, short, default_value = "output")]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let args = Args::parse();
    let domain = Domain::new(args.nx, args.ny, (-PI, PI), (-PI, PI))?;
    let q0 = ComplexGrid::from_fn(domain.nx, domain.ny, |ix, iy| {
        let (x, y) = (domain.x(ix), domain.y(iy));
        C64::from_polar((-(x * x + y * y)).exp(), args.x_mode * x + args.y_mode * y)
    })?;
    let mut fft = SpectralGrid2D::new(domain.nx, domain.ny)?;

    let mut qk = q0.clone();
    fft.transform(&mut qk)?;
    let qk_nat = utils::fft_shift2(&qk);
    let px = fft.natural_omega_x(domain.xmin, domain.xmax);
    let py = fft.natural_omega_y(domain.ymin, domain.ymax);
    log::info!(
        "momentum window: [{:.3}, {:.3}]×[{:.3}, {:.3}]",
        px[0], px[px.len() - 1], py[0], py[py.len() - 1],
    );

    let mut qb = q0.clone();
    fft.backtransform(&mut qb)?;
    let err
        = qb.as_slice().iter().zip(q0.as_slice())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    log::info!("max round-trip error: {err:.3e}");

    let dt_bound = 1.0 / f64::max(
        fft.freq_max(domain.xmin, domain.xmax, domain.nx),
        fft.freq_max(domain.ymin, domain.ymax, domain.ny),
    );
    log::info!("sampling-limited time step: {dt_bound:.3e}");

    fs::create_dir_all(&args.outdir)?;
    let mut npz = NpzWriter::new(File::create(args.outdir.join("fft2d.npz"))?);
    npz.add_array("x", &domain.x_coords())?;
    npz.add_array("y", &domain.y_coords())?;
    npz.add_array("q", &q0.to_array())?;
    npz.add_array("px", &px)?;
    npz.add_array("py", &py)?;
    npz.add_array("qk", &qk_nat.to_array())?;
    npz.add_array("rho_k", &qk_nat.density())?;
    npz.add_array("err", &nd::array![err])?;
    npz.finish()?;
    Ok(())
}

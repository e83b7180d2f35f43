use std::{ fs::{ self, File }, path::PathBuf };
use clap::Parser;
use ndarray_npy::NpzWriter;
use xyspace::config::{ self, PropagatorConfig };

// propagate a wave packet as described by a TOML config (or the defaults: a
// displaced, moving Gaussian in the isotropic harmonic potential) and record
// frames for plotting

#[derive(Parser)]
struct Args {
    /// Path to a TOML run configuration; defaults are used if absent.
    #[arg(long, short)]
    toml: Option<PathBuf>,

    /// Directory to write output to.
    #[arg(long, short, default_value = "output")]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let args = Args::parse();
    let config: PropagatorConfig
        = match &args.toml {
            Some(path) => config::read_toml(path)?,
            None => PropagatorConfig::default(),
        };
    let mut prop = config.build()?;
    let domain = *prop.domain();
    log::info!(
        "{}×{} grid, dt = {:.3e}, {} frames of {} steps",
        domain.nx, domain.ny, prop.dt(),
        config.run.frames, config.run.steps_per_frame,
    );

    let norm0 = prop.norm();
    let e0 = prop.energy();
    let (t, q) = prop.evolve(config.run.frames, config.run.steps_per_frame);
    let norm1 = prop.norm();
    let e1 = prop.energy();
    log::info!("norm: {norm0:.9e} -> {norm1:.9e}");
    log::info!("energy: {e0:.9e} -> {e1:.9e}");

    let (px, py) = prop.momentum_axes();
    let rho_p = prop.momentum_density();

    fs::create_dir_all(&args.outdir)?;
    fs::write(args.outdir.join("harmonic.toml"), config.to_toml_string()?)?;
    let mut npz = NpzWriter::new(File::create(args.outdir.join("harmonic.npz"))?);
    npz.add_array("x", &domain.x_coords())?;
    npz.add_array("y", &domain.y_coords())?;
    npz.add_array("v", prop.potential())?;
    npz.add_array("t", &t)?;
    npz.add_array("q", &q)?;
    npz.add_array("px", &px)?;
    npz.add_array("py", &py)?;
    npz.add_array("rho_p", &rho_p)?;
    npz.finish()?;
    Ok(())
}

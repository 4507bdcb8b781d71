use std::path::PathBuf;
use clap::Parser;
use mat_tiff::config::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_Z_MAX, DEFAULT_Z_MIN};
use mat_tiff::{ConvertConfig, ConvertError, DepthRange, LogObserver};

#[derive(Parser, Debug)]
struct Args {
    /// MAT file holding the `n_rec` refractive-index volume
    #[clap(default_value = DEFAULT_INPUT)]
    mat_file: PathBuf,
    /// output multi-page tiff
    #[clap(default_value = DEFAULT_OUTPUT)]
    tiff_file: PathBuf,

    /// first depth index to convert
    #[clap(long, default_value_t = DEFAULT_Z_MIN)]
    z_min: usize,
    /// depth index one past the last page to convert
    #[clap(long, default_value_t = DEFAULT_Z_MAX)]
    z_max: usize,

    /// json job file, replaces the file and depth arguments
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// only log warnings and errors
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> Result<(), ConvertError> {

    let args = Args::parse();

    let filter = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Stderr)
        .init();

    let job = match &args.config {
        Some(path) => ConvertConfig::from_json_file(path)?,
        None => ConvertConfig {
            input_path: args.mat_file,
            output_path: args.tiff_file,
            z_range: DepthRange::new(args.z_min,args.z_max),
        },
    };

    let volume = job.run(&mut LogObserver)?;
    log::debug!("normalized volume shape {:?}",volume.dims().shape());

    Ok(())

}

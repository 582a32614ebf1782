use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::info;

/// Encodes images into QOI565, writing `<file>.qoi` next to each input.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Images to encode, in any format the `image` crate can decode.
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    for file in &args.files {
        let output = qoi565::encode_file(file)?;
        info!("{} -> {}", file.display(), output.display());
    }

    Ok(())
}

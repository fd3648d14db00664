use std::process::ExitCode;

use config::Config;
use raymarch_lib::volumetric::encode_with;

mod args;
mod config;
mod generators;

use crate::{args::get_command, generators::generate_vol};

fn run(cfg: &Config) -> raymarch_lib::Result<()> {
    let mut volume = generate_vol(cfg)?;

    if cfg.normalize {
        let range = volume.value_range();
        log::info!("Normalizing values from {range:?}");
        volume = volume.normalized();
    }

    let bytes = encode_with(&volume, cfg.payload_order)?;
    std::fs::write(&cfg.file_name, &bytes)?;

    log::info!("Wrote {} bytes to {:?}", bytes.len(), cfg.file_name);
    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::debug!("{cfg:?}");

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Headless volume viewer
//!
//! Renders one frame and saves it as PNG, for example:
//! `cargo run --release --bin vol_render -- --volumes-dir volumes -v brain -m tumor --show-mask`

use std::process::ExitCode;

mod args;
mod config;
mod defaults;
mod error;
mod state;

use crate::{args::get_command, config::Config, error::AppError, state::State};

fn run(cfg: &Config) -> Result<(), AppError> {
    let state = State::new(cfg)?;
    state.load(cfg);
    state.apply_parameters(cfg);

    let buffer = state.render();

    let width = u32::from(cfg.render_options.resolution.x);
    let height = u32::from(cfg.render_options.resolution.y);
    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or(AppError::BufferSize { width, height })?;
    image.save(&cfg.output_file)?;

    log::info!("Frame saved to {:?}", cfg.output_file);
    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let result = Config::from_args(args)
        .map_err(AppError::Config)
        .and_then(|cfg| {
            log::debug!("{cfg:?}");
            run(&cfg)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

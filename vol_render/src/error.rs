use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Volume(#[from] raymarch_lib::VolumeError),
    #[error("cannot write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("rendered buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

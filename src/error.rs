use thiserror::Error;

use crate::extract::Area;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette size must be at least 1, got {n}")]
    InvalidArgument { n: usize },

    #[error("area {area:?} does not fit inside a {width}x{height} image")]
    AreaOutOfBounds { area: Area, width: u32, height: u32 },

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PaletteError>;

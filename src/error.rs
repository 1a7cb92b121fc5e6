use thiserror::Error;

/// A declarative attribute that could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("attribute `{key}`: invalid dimension `{value}`")]
    InvalidDimension { key: String, value: String },
    #[error("attribute `{key}`: invalid color `{value}`")]
    InvalidColor { key: String, value: String },
    #[error("attribute `{key}`: invalid boolean `{value}`")]
    InvalidBoolean { key: String, value: String },
    #[error("malformed attribute declaration `{0}`")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("bitmap of {width}x{height} exceeds the {max_bytes} byte limit")]
    BitmapTooLarge {
        width: u32,
        height: u32,
        max_bytes: u64,
    },
    #[error("cannot allocate a {width}x{height} bitmap")]
    EmptyBitmap { width: u32, height: u32 },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

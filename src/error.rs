/// Everything that can go wrong while turning PNG bytes into pixels.
///
/// Any of these aborts the image being decoded; no partial pixel data is
/// handed out alongside an error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("input doesn't start with the PNG signature")]
    Signature,

    #[error("chunk at offset {offset} runs past the end of the input")]
    Truncated { offset: usize },

    #[error("malformed chunk: {0}")]
    Chunk(String),

    #[error("CRC mismatch in {chunk_type} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        chunk_type: String,
        stored: u32,
        computed: u32,
    },

    #[error("{0} chunk is cut off before its CRC")]
    MissingCrc(String),

    #[error("no IHDR chunk was found")]
    MissingHeader,

    #[error("color type {0} is not supported")]
    UnsupportedColorType(u8),

    #[error("bit depth {bit_depth} is not supported for color type {color_type}")]
    UnsupportedBitDepth { color_type: u8, bit_depth: u8 },

    #[error("interlaced images are not supported")]
    Interlaced,

    #[error("failed to inflate image data: {0}")]
    Inflate(String),

    #[error("image data holds {actual} bytes, {expected} are needed")]
    MissingImageData { expected: usize, actual: usize },

    #[error("unknown filter type {0}")]
    UnknownFilter(u8),

    #[error("palette index {index} is out of range for a palette of {len} entries")]
    PaletteIndex { index: u8, len: usize },
}

pub type Result<T> = std::result::Result<T, FormatError>;

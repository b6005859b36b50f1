//! Decodes a practical subset of PNG (8-bit RGB/RGBA and 1/2/4/8-bit
//! indexed, non-interlaced) and draws the result in a truecolor terminal
//! with half-block characters.
//!
//! ```no_run
//! let bytes = std::fs::read("sprite.png")?;
//! let png = halfblock_png::PNG::decode(&bytes)?;
//! print!("{}", png.half_blocks().margin(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunks;
mod decoder;
mod error;
mod filters;
mod image_data;
mod pixel;
mod png;
mod render;
mod scanlines;

pub use chunks::ihdr::{ColorType, ImageHeader};
pub use decoder::DecodeOptions;
pub use error::{FormatError, Result};
pub use pixel::Pixel;
pub use png::PNG;
pub use render::{render_halfblocks, HalfBlocks};

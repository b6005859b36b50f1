use log::info;

use crate::{
    chunks::ihdr::ImageHeader,
    decoder::{DecodeOptions, PNGDecoder},
    error::{FormatError, Result},
    image_data::decompress_data,
    pixel::{resolve_pixels, Pixel},
    render::HalfBlocks,
    scanlines::reconstruct_scanlines,
};

/// A fully decoded image: its header and one RGBA pixel per image pixel,
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PNG {
    header: ImageHeader,
    pixels: Vec<Pixel>,
}

impl PNG {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    /// Runs every decoding stage in order. Either the whole image decodes or
    /// the first error is returned.
    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self> {
        let stream = PNGDecoder::new(bytes, options)?.read_chunks()?;
        let header = ImageHeader::try_from(&stream.header.ok_or(FormatError::MissingHeader)?)?;
        let data = decompress_data(&stream.image_data)?;
        let rows = reconstruct_scanlines(&data, &header)?;
        let pixels = resolve_pixels(&rows, &header, &stream.palette, &stream.transparency)?;
        info!(
            "decoded {}x{} {:?} image, {} bit",
            header.width, header.height, header.color_type, header.bit_depth
        );
        Ok(PNG { header, pixels })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn half_blocks(&self) -> HalfBlocks<'_> {
        HalfBlocks::new(self.width(), self.height(), &self.pixels)
    }
}

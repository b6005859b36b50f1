use crate::{
    chunks::{
        ihdr::{ColorType, ImageHeader},
        plte::PLTEChunk,
        trns::tRNSChunk,
    },
    error::{FormatError, Result},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}
impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Alpha of 128 and up counts as opaque when rendering.
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 128
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct IndexedPixel(pub u8);
impl IndexedPixel {
    pub(crate) fn to_pixel(self, palette: &PLTEChunk, transparency: &tRNSChunk) -> Result<Pixel> {
        let color = palette
            .get_color(self.0)
            .ok_or(FormatError::PaletteIndex {
                index: self.0,
                len: palette.len(),
            })?;
        Ok(Pixel::new(
            color.0,
            color.1,
            color.2,
            transparency.as_palette(self.0),
        ))
    }
}

/// Palette indices of the first `width` pixels in `row`, leftmost pixel in
/// the most significant bits of each byte.
pub(crate) fn unpack_indices(
    row: &[u8],
    bit_depth: u8,
    width: usize,
) -> impl Iterator<Item = IndexedPixel> + '_ {
    let per_byte = 8 / bit_depth as usize;
    let mask = (u16::MAX >> (16 - bit_depth)) as u8;
    (0..width).map(move |x| {
        let shift = bit_depth as usize * (per_byte - 1 - x % per_byte);
        IndexedPixel((row[x / per_byte] >> shift) & mask)
    })
}

/// Turns reconstructed scanlines into one RGBA pixel per image pixel,
/// row-major.
pub(crate) fn resolve_pixels(
    rows: &[Vec<u8>],
    header: &ImageHeader,
    palette: &PLTEChunk,
    transparency: &tRNSChunk,
) -> Result<Vec<Pixel>> {
    let width = header.width as usize;
    let mut pixels = Vec::with_capacity(width * rows.len());
    for row in rows {
        match header.color_type {
            ColorType::TruecolorWithAlpha => pixels.extend(
                row.chunks_exact(4)
                    .take(width)
                    .map(|p| Pixel::new(p[0], p[1], p[2], p[3])),
            ),
            ColorType::Truecolor => pixels.extend(
                row.chunks_exact(3)
                    .take(width)
                    .map(|p| Pixel::new(p[0], p[1], p[2], u8::MAX)),
            ),
            ColorType::IndexedColor => {
                for index in unpack_indices(row, header.bit_depth, width) {
                    pixels.push(index.to_pixel(palette, transparency)?);
                }
            }
        }
    }
    Ok(pixels)
}

use log::warn;
use nom::{
    number::complete::{be_u32, be_u8},
    sequence::tuple,
    IResult,
};

use super::ParseableChunk;
use crate::error::{FormatError, Result};

/// The IHDR fields exactly as stored. Nothing is checked here, see
/// [`ImageHeader`] for the validated form.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct IHDRChunk {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: u8,
    pub(crate) compression_method: u8,
    pub(crate) filter_method: u8,
    pub(crate) interlace_method: u8,
}
impl<'a> ParseableChunk<'a> for IHDRChunk {
    const HEADER: &'static [u8; 4] = b"IHDR";

    /// Only the first ten bytes are required; missing method bytes read as 0.
    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, bit_depth, color_type)) =
            tuple((be_u32, be_u32, be_u8, be_u8))(chunk_data)?;
        let method = |i: usize| rest.get(i).copied().unwrap_or(0);
        let chunk = IHDRChunk {
            width,
            height,
            bit_depth,
            color_type,
            compression_method: method(0),
            filter_method: method(1),
            interlace_method: method(2),
        };
        Ok((&rest[rest.len().min(3)..], chunk))
    }
}

/// Image dimensions and sample layout of a decodable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
}
impl ImageHeader {
    /// Distance in bytes between a byte and its "left" neighbour when
    /// filtering. Sub-byte indexed images still filter on whole bytes.
    pub(crate) fn filter_width(&self) -> usize {
        self.color_type.channel_count() * usize::max(self.bit_depth as usize / 8, 1)
    }

    pub(crate) fn pixel_width(&self) -> usize {
        self.color_type.channel_count() * self.bit_depth as usize
    }

    /// Bytes per scanline including the leading filter-type byte.
    pub(crate) fn scanline_size(&self) -> usize {
        (self.width as usize * self.pixel_width()).div_ceil(8) + 1
    }
}
impl TryFrom<&IHDRChunk> for ImageHeader {
    type Error = FormatError;
    fn try_from(chunk: &IHDRChunk) -> Result<Self> {
        let color_type = ColorType::try_from(chunk.color_type)?;
        let supported = match color_type {
            ColorType::IndexedColor => matches!(chunk.bit_depth, 1 | 2 | 4 | 8),
            ColorType::Truecolor | ColorType::TruecolorWithAlpha => chunk.bit_depth == 8,
        };
        if !supported {
            return Err(FormatError::UnsupportedBitDepth {
                color_type: chunk.color_type,
                bit_depth: chunk.bit_depth,
            });
        }
        if chunk.interlace_method != 0 {
            return Err(FormatError::Interlaced);
        }
        if chunk.compression_method != 0 || chunk.filter_method != 0 {
            warn!(
                "unexpected compression method {} / filter method {}, decoding as 0/0",
                chunk.compression_method, chunk.filter_method
            );
        }
        Ok(ImageHeader {
            width: chunk.width,
            height: chunk.height,
            bit_depth: chunk.bit_depth,
            color_type,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Truecolor = 2,
    IndexedColor = 3,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = FormatError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(FormatError::UnsupportedColorType(i)),
        }
    }
}
impl ColorType {
    pub(crate) fn channel_count(&self) -> usize {
        match self {
            Self::IndexedColor => 1,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

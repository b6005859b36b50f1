use log::{debug, trace, warn};
use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{ihdr::IHDRChunk, iter_chunks, plte::PLTEChunk, trns::tRNSChunk, Chunk},
    error::{FormatError, Result},
};

/// Knobs for how strictly the chunk stream is read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Check every chunk's CRC-32. Off by default: corrupt CRCs on otherwise
    /// readable files are accepted.
    pub verify_crc: bool,
}

pub(crate) struct PNGDecoder<'a> {
    data: &'a [u8],
    options: DecodeOptions,
}

/// Everything collected from the chunk stream that later stages need.
#[derive(Debug, Default)]
pub(crate) struct ImageStream<'a> {
    pub(crate) header: Option<IHDRChunk>,
    pub(crate) palette: PLTEChunk,
    pub(crate) transparency: tRNSChunk<'a>,
    pub(crate) image_data: Vec<u8>,
}

impl<'a> PNGDecoder<'a> {
    pub(crate) fn new(data: &'a [u8], options: DecodeOptions) -> Result<Self> {
        let (rest, _) = parse_signature(data).map_err(|_| FormatError::Signature)?;
        Ok(Self {
            data: rest,
            options,
        })
    }

    /// Reads chunks until `IEND` or the end of the input. A later chunk of a
    /// kind already seen replaces the earlier one, except `IDAT` which
    /// accumulates.
    pub(crate) fn read_chunks(self) -> Result<ImageStream<'a>> {
        let mut stream = ImageStream::default();
        let mut saw_end = false;
        let mut chunks = iter_chunks(self.data, self.options.verify_crc);
        for chunk in chunks.by_ref() {
            match chunk? {
                Chunk::IHDR(ihdr) => stream.header = Some(ihdr),
                Chunk::PLTE(plte) => stream.palette = plte,
                Chunk::tRNS(trns) => stream.transparency = trns,
                Chunk::IDAT(idat) => stream.image_data.extend_from_slice(idat.data),
                Chunk::IEND => saw_end = true,
                Chunk::Unknown(raw) => trace!("skipping {} chunk", raw.type_name()),
            }
        }
        if !saw_end {
            warn!("no IEND chunk before the end of the input");
        } else if !chunks.remaining().is_empty() {
            debug!("ignoring {} bytes after IEND", chunks.remaining().len());
        }
        Ok(stream)
    }
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(b"\x89PNG\x0d\x0a\x1a\x0a")(input)
}

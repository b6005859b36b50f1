use log::debug;
use nom::{
    combinator::{map, opt},
    multi::length_data,
    number::complete::{be_u32, be_u8},
    sequence::tuple,
    IResult,
};

use crate::error::{FormatError, Result};

mod crc;
pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;
pub(crate) mod plte;
pub(crate) mod trns;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    PLTE(plte::PLTEChunk),
    tRNS(trns::tRNSChunk<'a>),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

/// Walks the chunks following the signature until `IEND`, the end of the
/// input, or the first error.
pub(crate) fn iter_chunks(source: &[u8], verify_crc: bool) -> ChunkIter<'_> {
    ChunkIter {
        source,
        offset: 0,
        verify_crc,
        finished: false,
    }
}

pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    offset: usize,
    verify_crc: bool,
    finished: bool,
}

impl<'a> ChunkIter<'a> {
    /// Bytes left over once iteration stopped.
    pub(crate) fn remaining(&self) -> &'a [u8] {
        self.source
    }

    fn check_crc(&self, raw: &RawChunk<'_>) -> Result<()> {
        if !self.verify_crc {
            return Ok(());
        }
        let Some(stored) = raw.crc else {
            return Err(FormatError::MissingCrc(raw.type_name()));
        };
        let computed = crc::chunk_crc(&raw.chunk_type, raw.data);
        if computed != stored {
            return Err(FormatError::CrcMismatch {
                chunk_type: raw.type_name(),
                stored,
                computed,
            });
        }
        Ok(())
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        let chunk_start = self.offset;
        let chunk = match raw_chunk(self.source) {
            Ok((rest, raw)) => {
                self.offset += self.source.len() - rest.len();
                self.source = rest;
                debug!(
                    "{} chunk at offset {chunk_start}, {} bytes",
                    raw.type_name(),
                    raw.data.len()
                );
                self.check_crc(&raw).and_then(|()| parse_chunk(raw))
            }
            Err(_) => Err(FormatError::Truncated {
                offset: chunk_start,
            }),
        };
        if matches!(chunk, Ok(Chunk::IEND) | Err(_)) {
            self.finished = true;
        }
        Some(chunk)
    }
}

fn parse_chunk(raw: RawChunk<'_>) -> Result<Chunk<'_>> {
    let chunk_type = raw.chunk_type;
    Ok(match &chunk_type {
        ihdr::IHDRChunk::HEADER => Chunk::IHDR(parse_data(&raw)?),
        plte::PLTEChunk::HEADER => Chunk::PLTE(parse_data(&raw)?),
        trns::tRNSChunk::HEADER => Chunk::tRNS(parse_data(&raw)?),
        idat::IDATChunk::HEADER => Chunk::IDAT(parse_data(&raw)?),
        iend::IENDChunk::HEADER => Chunk::IEND,
        _ => Chunk::Unknown(raw),
    })
}

fn parse_data<'a, C: ParseableChunk<'a>>(raw: &RawChunk<'a>) -> Result<C> {
    C::from_bytes(raw.data)
        .map(|(_, chunk)| chunk)
        .map_err(|e| {
            let reason = match &e {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.code.description(),
                nom::Err::Incomplete(_) => "incomplete",
            };
            FormatError::Chunk(format!("{}: {reason}", raw.type_name()))
        })
}

#[derive(Debug)]
pub(crate) struct RawChunk<'a> {
    chunk_type: [u8; 4],
    data: &'a [u8],
    /// `None` when the input ends before the CRC does.
    crc: Option<u32>,
}
impl RawChunk<'_> {
    pub(crate) fn type_name(&self) -> String {
        String::from_utf8_lossy(&self.chunk_type).into_owned()
    }
}

fn chunk_type(input: &[u8]) -> IResult<&[u8], [u8; 4]> {
    map(tuple((be_u8, be_u8, be_u8, be_u8)), |(a, b, c, d)| {
        [a, b, c, d]
    })(input)
}

/// Frames one chunk. The type and payload must be complete; a CRC cut off by
/// the end of the input is tolerated and swallows the leftover bytes.
fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let header_length = 4usize;
    let (input, chunk_data) =
        length_data(map(be_u32, |v: u32| v as usize + header_length))(input)?;
    let (data, chunk_type) = chunk_type(chunk_data)?;
    let (input, crc) = opt(be_u32)(input)?;
    let input = match crc {
        Some(_) => input,
        None => &input[input.len()..],
    };
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

pub(crate) trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
}

/// Frames `data` as a complete chunk, CRC included.
#[cfg(test)]
pub(crate) fn write_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(crc::chunk_crc(chunk_type, data).to_be_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &[u8], verify_crc: bool) -> Vec<Result<Chunk<'_>>> {
        iter_chunks(source, verify_crc).collect()
    }

    #[test]
    fn reads_chunks_up_to_iend() {
        let mut source = write_chunk(b"IDAT", &[1, 2, 3]);
        source.extend(write_chunk(b"IEND", &[]));
        source.extend(write_chunk(b"IDAT", &[4]));
        let chunks = collect(&source, false);
        assert_eq!(chunks.len(), 2);
        assert!(matches!(&chunks[0], Ok(Chunk::IDAT(idat)) if idat.data == [1, 2, 3]));
        assert!(matches!(chunks[1], Ok(Chunk::IEND)));
    }

    #[test]
    fn stops_quietly_at_end_of_input() {
        let source = write_chunk(b"IDAT", &[9]);
        let chunks = collect(&source, false);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_ok());
    }

    #[test]
    fn unknown_chunks_are_passed_through() {
        let mut source = write_chunk(b"gAMA", &[0, 0, 0xb1, 0x8f]);
        source.extend(write_chunk(b"IEND", &[]));
        let chunks = collect(&source, false);
        assert!(matches!(&chunks[0], Ok(Chunk::Unknown(raw)) if raw.type_name() == "gAMA"));
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let mut source = write_chunk(b"IDAT", &[1, 2, 3]);
        let whole = source.len();
        source.extend(write_chunk(b"IDAT", &[4, 5, 6, 7]));
        source.truncate(source.len() - 6);
        let chunks = collect(&source, false);
        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[1].as_ref().unwrap_err(),
            &FormatError::Truncated { offset: whole }
        );
    }

    #[test]
    fn truncated_length_field_is_an_error() {
        let chunks = collect(&[0, 0], false);
        assert_eq!(
            chunks[0].as_ref().unwrap_err(),
            &FormatError::Truncated { offset: 0 }
        );
    }

    #[test]
    fn cut_off_crc_ends_the_stream_quietly() {
        let mut source = write_chunk(b"IDAT", &[1, 2, 3]);
        source.extend(write_chunk(b"IEND", &[]));
        source.truncate(source.len() - 2);
        let chunks = collect(&source, false);
        assert_eq!(chunks.len(), 2);
        assert!(matches!(chunks[1], Ok(Chunk::IEND)));

        let chunks = collect(&source, true);
        assert_eq!(
            chunks[1].as_ref().unwrap_err(),
            &FormatError::MissingCrc("IEND".to_owned())
        );
    }

    #[test]
    fn cut_off_crc_is_the_last_chunk_read() {
        let mut source = write_chunk(b"IDAT", &[1, 2, 3]);
        source.truncate(source.len() - 1);
        let mut chunks = iter_chunks(&source, false);
        assert!(matches!(chunks.next(), Some(Ok(Chunk::IDAT(_)))));
        assert!(chunks.next().is_none());
        assert!(chunks.remaining().is_empty());
    }

    #[test]
    fn crc_is_ignored_unless_asked_for() {
        let mut source = write_chunk(b"IDAT", &[1, 2, 3]);
        let last = source.len() - 1;
        source[last] ^= 0xff;
        assert!(collect(&source, false)[0].is_ok());
        assert!(matches!(
            collect(&source, true)[0],
            Err(FormatError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn short_ihdr_is_a_chunk_error() {
        let source = write_chunk(b"IHDR", &[0, 0, 0, 1, 0, 0]);
        assert!(matches!(
            collect(&source, false)[0],
            Err(FormatError::Chunk(_))
        ));
    }
}

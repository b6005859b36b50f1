use super::ParseableChunk;
use nom::IResult;

/// Alpha values by palette index. Indices past the end are opaque.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct tRNSChunk<'a> {
    inner: &'a [u8],
}
impl<'a> tRNSChunk<'a> {
    pub(crate) fn as_palette(&self, index: u8) -> u8 {
        *self.inner.get(index as usize).unwrap_or(&255)
    }
}
impl<'a> ParseableChunk<'a> for tRNSChunk<'a> {
    const HEADER: &'static [u8; 4] = b"tRNS";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[0..0], tRNSChunk { inner: chunk_data }))
    }
}

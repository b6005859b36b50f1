use super::ParseableChunk;
use log::warn;
use nom::{bytes::complete::take, combinator::map, multi::count, IResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry(pub u8, pub u8, pub u8);

#[derive(Debug, Default)]
pub(crate) struct PLTEChunk {
    colors: Vec<Entry>,
}
impl PLTEChunk {
    pub(crate) fn get_color(&self, index: u8) -> Option<Entry> {
        self.colors.get(index as usize).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.colors.len()
    }
}
impl<'a> ParseableChunk<'a> for PLTEChunk {
    const HEADER: &'static [u8; 4] = b"PLTE";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let entry_count = chunk_data.len() / 3;
        if chunk_data.len() % 3 != 0 {
            warn!(
                "PLTE length {} is not a multiple of 3, ignoring the trailing bytes",
                chunk_data.len()
            );
        }
        let (rest, entries) = count(
            map(take(3usize), |i: &[u8]| Entry(i[0], i[1], i[2])),
            entry_count,
        )(chunk_data)?;
        Ok((rest, PLTEChunk { colors: entries }))
    }
}

#[cfg(test)]
impl From<Vec<Entry>> for PLTEChunk {
    fn from(colors: Vec<Entry>) -> Self {
        Self { colors }
    }
}

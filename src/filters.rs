use crate::error::FormatError;

/// The five PNG filter types. `a`, `b` and `c` are the bytes to the left,
/// above, and above-left of `x`, zero where they fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}
impl Filter {
    #[cfg(test)]
    pub(crate) fn filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_sub(self.predict(a, b, c))
    }

    pub(crate) fn reconstruct(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_add(self.predict(a, b, c))
    }

    fn predict(&self, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => 0,
            Filter::Sub => a,
            Filter::Up => b,
            Filter::Average => ((a as u16 + b as u16) / 2) as u8,
            Filter::Paeth => paeth_predictor(a, b, c),
        }
    }

    /// Undoes this filter on `row` in place. `previous` is the already
    /// reconstructed row above, all zeroes for the first row.
    pub(crate) fn reconstruct_row(&self, row: &mut [u8], previous: &[u8], filter_width: usize) {
        if *self == Filter::None {
            return;
        }
        for i in 0..row.len() {
            let (a, c) = if i >= filter_width {
                (row[i - filter_width], previous[i - filter_width])
            } else {
                (0, 0)
            };
            row[i] = self.reconstruct(row[i], a, previous[i], c);
        }
    }

    /// Inverse of [`Filter::reconstruct_row`], producing a filtered copy.
    #[cfg(test)]
    pub(crate) fn filter_row(&self, row: &[u8], previous: &[u8], filter_width: usize) -> Vec<u8> {
        (0..row.len())
            .map(|i| {
                let (a, c) = if i >= filter_width {
                    (row[i - filter_width], previous[i - filter_width])
                } else {
                    (0, 0)
                };
                self.filter(row[i], a, previous[i], c)
            })
            .collect()
    }
}
impl TryFrom<u8> for Filter {
    type Error = FormatError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(FormatError::UnknownFilter(i)),
        }
    }
}

fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let (a_, b_, c_) = (a as i16, b as i16, c as i16);
    let p = a_ + b_ - c_;
    let (pa, pb, pc) = ((p - a_).abs(), (p - b_).abs(), (p - c_).abs());
    // Ties go to a, then b. The order of these tests is part of the format.
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

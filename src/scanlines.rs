use log::{trace, warn};

use crate::{
    chunks::ihdr::ImageHeader,
    error::{FormatError, Result},
    filters::Filter,
};

/// Splits the inflated stream into `height` scanlines and undoes each row's
/// filter, top to bottom. Every row is predicted from the finished row above
/// it, so rows can't be reconstructed out of order.
pub(crate) fn reconstruct_scanlines(data: &[u8], header: &ImageHeader) -> Result<Vec<Vec<u8>>> {
    let scanline_size = header.scanline_size();
    let height = header.height as usize;
    let expected = scanline_size.saturating_mul(height);
    if data.len() < expected {
        return Err(FormatError::MissingImageData {
            expected,
            actual: data.len(),
        });
    }
    if data.len() > expected {
        warn!(
            "ignoring {} bytes of image data past the last scanline",
            data.len() - expected
        );
    }

    let filter_width = header.filter_width();
    let first_previous = vec![0; scanline_size - 1];
    let mut rows: Vec<Vec<u8>> = Vec::with_capacity(height);
    for (y, scanline) in data.chunks_exact(scanline_size).take(height).enumerate() {
        let filter = Filter::try_from(scanline[0])?;
        trace!("row {y}: {filter:?}");
        let mut row = scanline[1..].to_vec();
        let previous = rows.last().unwrap_or(&first_previous);
        filter.reconstruct_row(&mut row, previous, filter_width);
        rows.push(row);
    }
    Ok(rows)
}

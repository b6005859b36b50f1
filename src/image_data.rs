use log::debug;
use miniz_oxide::inflate::decompress_to_vec_zlib;

use crate::error::{FormatError, Result};

/// Inflates the concatenated IDAT payloads into the filtered scanline stream.
pub(crate) fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>> {
    let data = decompress_to_vec_zlib(compressed_data)
        .map_err(|e| FormatError::Inflate(format!("{:?}", e.status)))?;
    debug!(
        "inflated {} bytes of image data into {}",
        compressed_data.len(),
        data.len()
    );
    Ok(data)
}

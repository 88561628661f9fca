//! MAT level-5 data element handling.
//!
//! After the 128-byte header a MAT file is a sequence of data elements, each
//! with an 8-byte tag (4 bytes data type + 4 bytes length) followed by the
//! body padded to an 8-byte boundary. Bodies of at most 4 bytes may use the
//! small format, packing a 2-byte type and 2-byte length into one word.
//!
//! `miCOMPRESSED` elements hold a zlib stream of further elements; they are
//! inflated in place so callers only ever see uncompressed elements.

pub mod parser;
pub mod types;

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{MatError, MatResult};
use parser::{read_u32, slice, Endian};
use types::MI_COMPRESSED;

/// A single data element with its body.
#[derive(Debug)]
pub struct DataElement {
    /// Data type (e.g. `types::MI_MATRIX`).
    pub data_type: u32,
    /// Element body, without padding.
    pub data: Vec<u8>,
    /// Byte offset of the element's tag (inside the inflated stream for
    /// compressed elements), for diagnostics.
    pub offset: usize,
}

/// Read one element tag and borrow its body, advancing past any padding.
pub fn read_element<'a>(
    data: &'a [u8],
    offset: &mut usize,
    endian: Endian,
) -> MatResult<(u32, &'a [u8])> {
    let first = read_u32(data, offset, endian)?;

    // Small element: length in the upper half-word, body in the next 4 bytes
    let small_len = (first >> 16) as usize;
    if small_len != 0 {
        if small_len > 4 {
            return Err(MatError::Parse(format!(
                "small element at offset {} claims {} bytes",
                *offset - 4,
                small_len
            )));
        }
        let body = slice(data, *offset, small_len)?;
        *offset += 4;
        return Ok((first & 0xFFFF, body));
    }

    let data_type = first;
    let len = read_u32(data, offset, endian)? as usize;
    let body = slice(data, *offset, len)?;

    let padded = if data_type == MI_COMPRESSED {
        len
    } else {
        (len + 7) & !7
    };
    // The final element of a stream is not always padded
    *offset = (*offset + padded).min(data.len());

    Ok((data_type, body))
}

/// Read every element of a stream, inflating compressed elements.
pub fn read_all_elements(data: &[u8], endian: Endian) -> MatResult<Vec<DataElement>> {
    let mut elements = Vec::new();
    let mut offset = 0;

    // Trailing bytes shorter than a tag are padding
    while offset + 8 <= data.len() {
        let start = offset;
        let (data_type, body) = read_element(data, &mut offset, endian)?;

        if data_type == MI_COMPRESSED {
            let inflated = inflate(body)?;
            log::debug!(
                "inflated {} compressed bytes at offset {} into {} bytes",
                body.len(),
                start,
                inflated.len()
            );
            elements.extend(read_all_elements(&inflated, endian)?);
        } else {
            elements.push(DataElement {
                data_type,
                data: body.to_vec(),
                offset: start,
            });
        }
    }

    Ok(elements)
}

fn inflate(body: &[u8]) -> MatResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(body);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| MatError::InvalidFormat(format!("corrupt compressed element: {}", e)))?;
    Ok(inflated)
}

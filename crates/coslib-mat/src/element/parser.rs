//! Low-level binary parsing helpers for MAT data elements.
//!
//! Multi-byte values follow the byte order declared in the file header.

use crate::element::types::{
    numeric_size, MI_DOUBLE, MI_INT16, MI_INT32, MI_INT64, MI_INT8, MI_SINGLE, MI_UINT16,
    MI_UINT32, MI_UINT64, MI_UINT8,
};
use crate::error::{MatError, MatResult};

/// Byte order of a MAT file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Decode the two-byte indicator at offset 126 of the header
    ///
    /// The writer stores `'M' << 8 | 'I'` in its native order, so reading
    /// `IM` means a little-endian file.
    pub fn from_indicator(bytes: [u8; 2]) -> Option<Self> {
        match &bytes {
            b"IM" => Some(Endian::Little),
            b"MI" => Some(Endian::Big),
            _ => None,
        }
    }
}

/// Take `N` bytes at `offset`, advancing `offset`.
#[inline]
fn take<const N: usize>(data: &[u8], offset: &mut usize) -> MatResult<[u8; N]> {
    let bytes: [u8; N] = data
        .get(*offset..*offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            MatError::Parse(format!(
                "unexpected end of data at offset {}, need {} bytes",
                *offset, N
            ))
        })?;
    *offset += N;
    Ok(bytes)
}

/// Read a `u16` at `offset`, advancing `offset`.
#[inline]
pub fn read_u16(data: &[u8], offset: &mut usize, endian: Endian) -> MatResult<u16> {
    let bytes = take::<2>(data, offset)?;
    Ok(match endian {
        Endian::Little => u16::from_le_bytes(bytes),
        Endian::Big => u16::from_be_bytes(bytes),
    })
}

/// Read a `u32` at `offset`, advancing `offset`.
#[inline]
pub fn read_u32(data: &[u8], offset: &mut usize, endian: Endian) -> MatResult<u32> {
    let bytes = take::<4>(data, offset)?;
    Ok(match endian {
        Endian::Little => u32::from_le_bytes(bytes),
        Endian::Big => u32::from_be_bytes(bytes),
    })
}

/// Read an `i32` at `offset`, advancing `offset`.
#[inline]
pub fn read_i32(data: &[u8], offset: &mut usize, endian: Endian) -> MatResult<i32> {
    read_u32(data, offset, endian).map(|v| v as i32)
}

/// Borrow `len` bytes at `offset` without advancing.
#[inline]
pub fn slice(data: &[u8], offset: usize, len: usize) -> MatResult<&[u8]> {
    data.get(offset..offset + len).ok_or_else(|| {
        MatError::Parse(format!(
            "element of {} bytes at offset {} runs past the end ({} bytes)",
            len,
            offset,
            data.len()
        ))
    })
}

/// Decode a buffer of numeric values of `data_type` into `f64`s.
pub fn read_numeric(data_type: u32, data: &[u8], endian: Endian) -> MatResult<Vec<f64>> {
    let size = numeric_size(data_type)
        .ok_or_else(|| MatError::Parse(format!("data type {} is not numeric", data_type)))?;
    if data.len() % size != 0 {
        return Err(MatError::Parse(format!(
            "{} bytes is not a whole number of {}-byte values",
            data.len(),
            size
        )));
    }

    let mut values = Vec::with_capacity(data.len() / size);
    let mut offset = 0;
    while offset < data.len() {
        let value = match (data_type, endian) {
            (MI_INT8, _) => take::<1>(data, &mut offset)?[0] as i8 as f64,
            (MI_UINT8, _) => take::<1>(data, &mut offset)?[0] as f64,
            (MI_INT16, Endian::Little) => i16::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_INT16, Endian::Big) => i16::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT16, Endian::Little) => u16::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT16, Endian::Big) => u16::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_INT32, Endian::Little) => i32::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_INT32, Endian::Big) => i32::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT32, Endian::Little) => u32::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT32, Endian::Big) => u32::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_SINGLE, Endian::Little) => f32::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_SINGLE, Endian::Big) => f32::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_DOUBLE, Endian::Little) => f64::from_le_bytes(take(data, &mut offset)?),
            (MI_DOUBLE, Endian::Big) => f64::from_be_bytes(take(data, &mut offset)?),
            (MI_INT64, Endian::Little) => i64::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_INT64, Endian::Big) => i64::from_be_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT64, Endian::Little) => u64::from_le_bytes(take(data, &mut offset)?) as f64,
            (MI_UINT64, Endian::Big) => u64::from_be_bytes(take(data, &mut offset)?) as f64,
            _ => return Err(MatError::Parse(format!("data type {} is not numeric", data_type))),
        };
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endian_indicator() {
        assert_eq!(Endian::from_indicator(*b"IM"), Some(Endian::Little));
        assert_eq!(Endian::from_indicator(*b"MI"), Some(Endian::Big));
        assert_eq!(Endian::from_indicator(*b"XX"), None);
    }

    #[test]
    fn test_read_u32() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let mut off = 0;
        assert_eq!(read_u32(&data, &mut off, Endian::Little).unwrap(), 0x1234_5678);
        assert_eq!(off, 4);

        let mut off = 0;
        assert_eq!(read_u32(&data, &mut off, Endian::Big).unwrap(), 0x7856_3412);
    }

    #[test]
    fn test_read_past_end() {
        let mut off = 1;
        assert!(matches!(
            read_u16(&[0u8; 2], &mut off, Endian::Little),
            Err(MatError::Parse(_))
        ));
        assert_eq!(off, 1);
    }

    #[test]
    fn test_read_numeric_types() {
        let bytes: Vec<u8> = [-3i16, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(
            read_numeric(MI_INT16, &bytes, Endian::Little).unwrap(),
            vec![-3.0, 7.0]
        );

        let bytes: Vec<u8> = [1.5f32, -0.25].iter().flat_map(|v| v.to_be_bytes()).collect();
        assert_eq!(
            read_numeric(MI_SINGLE, &bytes, Endian::Big).unwrap(),
            vec![1.5, -0.25]
        );

        assert_eq!(
            read_numeric(MI_UINT8, &[0, 255], Endian::Little).unwrap(),
            vec![0.0, 255.0]
        );
    }

    #[test]
    fn test_read_numeric_rejects_partial_values() {
        assert!(read_numeric(MI_DOUBLE, &[0u8; 12], Endian::Little).is_err());
        assert!(read_numeric(16, &[0u8; 4], Endian::Little).is_err());
    }
}

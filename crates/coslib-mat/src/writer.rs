//! MAT level-5 writer.
//!
//! Writes little-endian files of real double matrices, optionally wrapping
//! each variable in an `miCOMPRESSED` element.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use coslib_core::Matrix;

use crate::element::types::{
    HEADER_TEXT_LEN, MI_COMPRESSED, MI_DOUBLE, MI_INT32, MI_INT8, MI_MATRIX, MI_UINT32, VERSION,
};
use crate::error::{MatError, MatResult};

/// Class code of double arrays
const CLASS_DOUBLE: u32 = 6;

/// Options for writing MAT files
#[derive(Debug, Clone, Default)]
pub struct MatWriteOptions {
    /// Compress each variable with zlib
    pub compress: bool,
}

impl MatWriteOptions {
    pub fn compressed() -> Self {
        Self { compress: true }
    }
}

/// MAT file writer
pub struct MatWriter;

impl MatWriter {
    /// Write named matrices to a MAT file
    pub fn write_file<P: AsRef<Path>>(
        path: P,
        variables: &[(&str, &Matrix)],
        options: &MatWriteOptions,
    ) -> MatResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write(&mut writer, variables, options)?;
        writer.flush()?;
        log::debug!("wrote {} variables to {}", variables.len(), path.display());
        Ok(())
    }

    /// Write named matrices to a writer
    pub fn write<W: Write>(
        mut writer: W,
        variables: &[(&str, &Matrix)],
        options: &MatWriteOptions,
    ) -> MatResult<()> {
        writer.write_all(&Self::header())?;

        for (name, matrix) in variables {
            Self::check_name(name)?;
            let element = Self::matrix_element(name, matrix);

            if options.compress {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&element)?;
                let compressed = encoder.finish()?;
                // Compressed elements are not padded
                writer.write_all(&tag(MI_COMPRESSED, compressed.len()))?;
                writer.write_all(&compressed)?;
            } else {
                writer.write_all(&element)?;
            }
        }

        Ok(())
    }

    fn header() -> Vec<u8> {
        let text = format!(
            "MATLAB 5.0 MAT-file, Platform: coslib, Created on: {}",
            chrono::Local::now().format("%a %b %e %H:%M:%S %Y")
        );
        let mut header = vec![b' '; HEADER_TEXT_LEN];
        let len = text.len().min(HEADER_TEXT_LEN);
        header[..len].copy_from_slice(&text.as_bytes()[..len]);

        // No subsystem data
        header.extend_from_slice(&[0u8; 8]);
        header.extend_from_slice(&VERSION.to_le_bytes());
        header.extend_from_slice(b"IM");
        header
    }

    fn check_name(name: &str) -> MatResult<()> {
        if name.is_empty() || name.len() > u16::MAX as usize {
            return Err(MatError::InvalidName(name.to_string()));
        }
        let mut chars = name.chars();
        let identifier = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !identifier {
            log::warn!("'{}' is not a MATLAB identifier; readers may reject it", name);
        }
        Ok(())
    }

    /// Build a complete `miMATRIX` element for a double matrix
    fn matrix_element(name: &str, matrix: &Matrix) -> Vec<u8> {
        let mut body = Vec::new();

        // Array flags: class, no complex/global/logical bits, nzmax unused
        let mut flags = CLASS_DOUBLE.to_le_bytes().to_vec();
        flags.extend_from_slice(&0u32.to_le_bytes());
        body.extend(element(MI_UINT32, &flags));

        let dims: Vec<u8> = [matrix.rows(), matrix.cols()]
            .iter()
            .flat_map(|d| (*d as i32).to_le_bytes())
            .collect();
        body.extend(element(MI_INT32, &dims));

        body.extend(element(MI_INT8, name.as_bytes()));

        let real: Vec<u8> = matrix
            .to_column_major()
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        body.extend(element(MI_DOUBLE, &real));

        element(MI_MATRIX, &body)
    }
}

fn tag(data_type: u32, len: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&data_type.to_le_bytes());
    out[4..].copy_from_slice(&(len as u32).to_le_bytes());
    out
}

/// One element with its tag, using the small format for bodies of up to
/// 4 bytes and padding other bodies to 8 bytes
fn element(data_type: u32, body: &[u8]) -> Vec<u8> {
    if !body.is_empty() && body.len() <= 4 {
        let mut out = (((body.len() as u32) << 16) | data_type).to_le_bytes().to_vec();
        out.extend_from_slice(body);
        out.resize(8, 0);
        return out;
    }

    let mut out = tag(data_type, body.len()).to_vec();
    out.extend_from_slice(body);
    let padded = (out.len() + 7) & !7;
    out.resize(padded, 0);
    out
}

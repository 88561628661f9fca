//! MAT level-5 reader.
//!
//! Reads the 128-byte header, walks the top-level data elements and decodes
//! every `miMATRIX` into a [`MatVariable`].

use std::io::Read;
use std::path::Path;

use coslib_core::Matrix;

use crate::element::parser::{read_i32, read_numeric, read_u16, read_u32, Endian};
use crate::element::types::{
    MatClass, CLASS_MASK, FLAG_COMPLEX, FLAG_LOGICAL, HEADER_LEN, HEADER_TEXT_LEN, MI_INT32,
    MI_INT8, MI_MATRIX, MI_UINT32, MI_UTF8, VERSION,
};
use crate::element::{self, read_element};
use crate::error::{MatError, MatResult};

/// One variable of a MAT file.
#[derive(Debug, Clone, PartialEq)]
pub struct MatVariable {
    name: String,
    class: MatClass,
    dims: Vec<usize>,
    complex: bool,
    logical: bool,
    /// Real part in column-major order; `None` for non-numeric classes.
    data: Option<Vec<f64>>,
}

impl MatVariable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> MatClass {
        self.class
    }

    /// Dimensions as stored (at least two)
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn is_complex(&self) -> bool {
        self.complex
    }

    pub fn is_logical(&self) -> bool {
        self.logical
    }

    /// The variable as a 2-D matrix
    ///
    /// Arrays with more than two dimensions fold the trailing dimensions into
    /// columns, as a column-major reshape to `dims[0] x rest` would.
    pub fn to_matrix(&self) -> MatResult<Matrix> {
        if self.complex {
            return Err(MatError::Unsupported(format!(
                "variable '{}' is complex",
                self.name
            )));
        }
        let data = self.data.as_ref().ok_or_else(|| {
            MatError::Unsupported(format!(
                "variable '{}' has class {}, not a numeric array",
                self.name, self.class
            ))
        })?;

        let rows = self.dims.first().copied().unwrap_or(0);
        let cols = self.dims.iter().skip(1).product();
        Ok(Matrix::from_column_major(rows, cols, data.clone())?)
    }
}

/// A parsed MAT file.
#[derive(Debug, Clone, PartialEq)]
pub struct MatFile {
    description: String,
    endian: Endian,
    variables: Vec<MatVariable>,
}

impl MatFile {
    /// The descriptive text at the start of the header
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Variable names in file order
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name()).collect()
    }

    pub fn variables(&self) -> &[MatVariable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&MatVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Look up a variable and convert it to a matrix
    pub fn matrix(&self, name: &str) -> MatResult<Matrix> {
        self.variable(name)
            .ok_or_else(|| MatError::VariableNotFound(name.to_string()))?
            .to_matrix()
    }
}

/// MAT file reader.
pub struct MatReader;

impl MatReader {
    /// Read a MAT file from a filesystem path.
    pub fn read_file<P: AsRef<Path>>(path: P) -> MatResult<MatFile> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mat = Self::read(file)?;
        log::debug!(
            "read {} variables from {}",
            mat.variables.len(),
            path.display()
        );
        Ok(mat)
    }

    /// Read a MAT file from any `Read` source.
    pub fn read<R: Read>(mut reader: R) -> MatResult<MatFile> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Read one variable of a MAT file as a matrix.
    pub fn read_variable<P: AsRef<Path>>(path: P, name: &str) -> MatResult<Matrix> {
        let matrix = Self::read_file(path)?.matrix(name)?;
        log::debug!("variable '{}' is {}x{}", name, matrix.rows(), matrix.cols());
        Ok(matrix)
    }

    /// List the variable names of a MAT file.
    pub fn variable_names<P: AsRef<Path>>(path: P) -> MatResult<Vec<String>> {
        let mat = Self::read_file(path)?;
        Ok(mat.variable_names().into_iter().map(String::from).collect())
    }

    /// Parse a complete MAT file held in memory.
    pub fn parse(data: &[u8]) -> MatResult<MatFile> {
        let (description, endian) = Self::parse_header(data)?;

        let mut variables = Vec::new();
        for el in element::read_all_elements(&data[HEADER_LEN..], endian)? {
            if el.data_type != MI_MATRIX {
                log::warn!(
                    "skipping top-level element of type {} at offset {}",
                    el.data_type,
                    el.offset + HEADER_LEN
                );
                continue;
            }
            match Self::parse_matrix(&el.data, endian)? {
                Some(variable) => variables.push(variable),
                None => log::debug!("skipping empty array element at offset {}", el.offset),
            }
        }

        Ok(MatFile {
            description,
            endian,
            variables,
        })
    }

    /// Returns `(description, byte order)`.
    fn parse_header(data: &[u8]) -> MatResult<(String, Endian)> {
        if data.len() < HEADER_LEN {
            return Err(MatError::InvalidFormat(format!(
                "file is {} bytes, shorter than the {}-byte header",
                data.len(),
                HEADER_LEN
            )));
        }

        let description = String::from_utf8_lossy(&data[..HEADER_TEXT_LEN])
            .trim_end_matches(|c: char| c == ' ' || c == '\0')
            .to_string();

        let endian = Endian::from_indicator([data[126], data[127]]).ok_or_else(|| {
            MatError::InvalidFormat("missing MAT level-5 endian indicator".into())
        })?;

        if description.starts_with("MATLAB 7.3") {
            return Err(MatError::Unsupported(
                "MAT 7.3 files are HDF5 containers".into(),
            ));
        }

        let mut offset = 124;
        let version = read_u16(data, &mut offset, endian)?;
        if version != VERSION {
            log::warn!("unexpected MAT version 0x{:04X}", version);
        }

        Ok((description, endian))
    }

    /// Decode the body of an `miMATRIX` element.
    ///
    /// Returns `None` for the zero-length placeholder arrays some writers emit.
    fn parse_matrix(body: &[u8], endian: Endian) -> MatResult<Option<MatVariable>> {
        if body.is_empty() {
            return Ok(None);
        }

        let mut offset = 0;

        // Array flags
        let (flags_type, flags) = read_element(body, &mut offset, endian)?;
        if flags_type != MI_UINT32 || flags.len() < 4 {
            return Err(MatError::Parse("malformed array flags".into()));
        }
        let flags = read_u32(flags, &mut 0, endian)?;
        let class_code = flags & CLASS_MASK;
        let class = MatClass::from_code(class_code)
            .ok_or_else(|| MatError::Parse(format!("unknown array class {}", class_code)))?;

        // Dimensions
        let (dims_type, dims_data) = read_element(body, &mut offset, endian)?;
        if dims_type != MI_INT32 {
            return Err(MatError::Parse(format!(
                "dimensions stored as type {}, expected int32",
                dims_type
            )));
        }
        let mut dims = Vec::with_capacity(dims_data.len() / 4);
        let mut dim_offset = 0;
        while dim_offset < dims_data.len() {
            let dim = read_i32(dims_data, &mut dim_offset, endian)?;
            let dim = usize::try_from(dim)
                .map_err(|_| MatError::Parse(format!("negative dimension {}", dim)))?;
            dims.push(dim);
        }

        // Name
        let (name_type, name_data) = read_element(body, &mut offset, endian)?;
        if name_type != MI_INT8 && name_type != MI_UTF8 {
            return Err(MatError::Parse(format!(
                "array name stored as type {}",
                name_type
            )));
        }
        let name = String::from_utf8_lossy(name_data).into_owned();

        let complex = flags & FLAG_COMPLEX != 0;
        let logical = flags & FLAG_LOGICAL != 0;

        let data = if class.is_numeric() {
            let (real_type, real_data) = read_element(body, &mut offset, endian)?;
            let values = read_numeric(real_type, real_data, endian)?;
            let expected: usize = dims.iter().product();
            if values.len() != expected {
                return Err(MatError::Parse(format!(
                    "variable '{}' has {} values for dimensions {:?}",
                    name,
                    values.len(),
                    dims
                )));
            }
            Some(values)
        } else {
            log::debug!("variable '{}' has non-numeric class {}", name, class);
            None
        };

        Ok(Some(MatVariable {
            name,
            class,
            dims,
            complex,
            logical,
            data,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::types::{MI_DOUBLE, MI_UINT8};
    use pretty_assertions::assert_eq;

    /// Builds MAT bytes element by element in either byte order
    struct Builder {
        endian: Endian,
        out: Vec<u8>,
    }

    impl Builder {
        fn new(endian: Endian) -> Self {
            let mut out = vec![b' '; HEADER_TEXT_LEN];
            let text = b"MATLAB 5.0 MAT-file, test fixture";
            out[..text.len()].copy_from_slice(text);
            out.extend_from_slice(&[0u8; 8]);
            match endian {
                Endian::Little => {
                    out.extend_from_slice(&VERSION.to_le_bytes());
                    out.extend_from_slice(b"IM");
                }
                Endian::Big => {
                    out.extend_from_slice(&VERSION.to_be_bytes());
                    out.extend_from_slice(b"MI");
                }
            }
            Self { endian, out }
        }

        fn u32(&self, v: u32) -> [u8; 4] {
            match self.endian {
                Endian::Little => v.to_le_bytes(),
                Endian::Big => v.to_be_bytes(),
            }
        }

        fn element(&self, data_type: u32, body: &[u8]) -> Vec<u8> {
            let mut out = self.u32(data_type).to_vec();
            out.extend_from_slice(&self.u32(body.len() as u32));
            out.extend_from_slice(body);
            while out.len() % 8 != 0 {
                out.push(0);
            }
            out
        }

        fn matrix(&mut self, name: &str, class: u32, dims: &[i32], real: (u32, Vec<u8>)) {
            let mut body = Vec::new();
            let mut flags = self.u32(class).to_vec();
            flags.extend_from_slice(&[0u8; 4]);
            body.extend(self.element(MI_UINT32, &flags));
            let dims: Vec<u8> = dims.iter().flat_map(|d| self.u32(*d as u32)).collect();
            body.extend(self.element(MI_INT32, &dims));
            body.extend(self.element(MI_INT8, name.as_bytes()));
            body.extend(self.element(real.0, &real.1));
            let el = self.element(MI_MATRIX, &body);
            self.out.extend(el);
        }
    }

    #[test]
    fn test_big_endian_double() {
        let mut b = Builder::new(Endian::Big);
        let data: Vec<u8> = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        b.matrix("A", 6, &[2, 3], (MI_DOUBLE, data));

        let mat = MatReader::parse(&b.out).unwrap();
        assert_eq!(mat.endian(), Endian::Big);
        assert_eq!(mat.description(), "MATLAB 5.0 MAT-file, test fixture");

        // Column-major [1 3 5; 2 4 6]
        let m = mat.matrix("A").unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(0), &[1.0, 3.0, 5.0]);
        assert_eq!(m.row(1), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_integer_class_stored_compactly() {
        // A double array whose values fit in uint8 is often stored as miUINT8
        let mut b = Builder::new(Endian::Little);
        b.matrix("idx", 6, &[1, 3], (MI_UINT8, vec![1, 2, 250]));

        let mat = MatReader::parse(&b.out).unwrap();
        let variable = mat.variable("idx").unwrap();
        assert_eq!(variable.class(), MatClass::Double);
        assert_eq!(variable.dims(), &[1, 3]);
        assert_eq!(variable.to_matrix().unwrap().as_slice(), &[1.0, 2.0, 250.0]);
    }

    #[test]
    fn test_three_dimensional_folds_into_columns() {
        let mut b = Builder::new(Endian::Little);
        let data: Vec<u8> = (0..8).flat_map(|v| (v as f64).to_le_bytes()).collect();
        b.matrix("cube", 6, &[2, 2, 2], (MI_DOUBLE, data));

        let m = MatReader::parse(&b.out).unwrap().matrix("cube").unwrap();
        assert_eq!(m.shape(), (2, 4));
        assert_eq!(m.row(0), &[0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_non_numeric_variable() {
        let mut b = Builder::new(Endian::Little);
        let text: Vec<u8> = "hi".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        b.matrix("label", 4, &[1, 2], (4, text));

        let mat = MatReader::parse(&b.out).unwrap();
        assert_eq!(mat.variable_names(), vec!["label"]);
        assert!(matches!(mat.matrix("label"), Err(MatError::Unsupported(_))));
        assert!(matches!(
            mat.matrix("other"),
            Err(MatError::VariableNotFound(name)) if name == "other"
        ));
    }

    #[test]
    fn test_value_count_mismatch() {
        let mut b = Builder::new(Endian::Little);
        b.matrix("bad", 6, &[2, 2], (MI_DOUBLE, 1.0f64.to_le_bytes().to_vec()));
        assert!(matches!(MatReader::parse(&b.out), Err(MatError::Parse(_))));
    }

    #[test]
    fn test_invalid_headers() {
        assert!(matches!(
            MatReader::parse(b"too short"),
            Err(MatError::InvalidFormat(_))
        ));

        let mut data = vec![b' '; HEADER_LEN];
        assert!(matches!(
            MatReader::parse(&data),
            Err(MatError::InvalidFormat(_))
        ));

        data[..10].copy_from_slice(b"MATLAB 7.3");
        data[126..].copy_from_slice(b"IM");
        assert!(matches!(
            MatReader::parse(&data),
            Err(MatError::Unsupported(_))
        ));
    }
}

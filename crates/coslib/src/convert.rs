//! Reference fixture conversion
//!
//! Simulation runs dump each state variable as delimited text with a `%`
//! comment header. These helpers bundle such dumps into a single MAT file,
//! one variable per input named after the file stem.

use std::path::Path;

use coslib_core::{extract_numbers, Matrix};
use coslib_mat::{MatWriteOptions, MatWriter};

use crate::error::{Error, Result};
use crate::source::{read_delimited, DelimitedOptions};

/// Read one commented numeric text dump as a matrix
pub fn read_commented_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let grid = read_delimited(path, &DelimitedOptions::numeric().comment(b'%'))?;
    Ok(extract_numbers(&grid, None, None)?)
}

/// Convert text dumps into one MAT file
///
/// # Example
/// ```rust,no_run
/// use coslib::convert_csv_to_mat;
///
/// convert_csv_to_mat("gold.mat", &["cse.csv", "phie.csv"])?;
/// # Ok::<(), coslib::Error>(())
/// ```
pub fn convert_csv_to_mat<P, Q>(output: P, inputs: &[Q]) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut variables: Vec<(String, Matrix)> = Vec::with_capacity(inputs.len());

    for input in inputs {
        let input = input.as_ref();
        let name = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Config(format!("no variable name for {}", input.display())))?
            .to_string();

        if variables.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::Config(format!("duplicate variable name '{}'", name)));
        }

        let matrix = read_commented_matrix(input)?;
        log::debug!(
            "{} -> '{}' ({}x{})",
            input.display(),
            name,
            matrix.rows(),
            matrix.cols()
        );
        variables.push((name, matrix));
    }

    let named: Vec<(&str, &Matrix)> = variables.iter().map(|(n, m)| (n.as_str(), m)).collect();
    MatWriter::write_file(output, &named, &MatWriteOptions::default())?;
    Ok(())
}

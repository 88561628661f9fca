//! # coslib-mat
//!
//! MAT level-5 (MATLAB 5 through 7.2) matrix file reader and writer.
//!
//! Real numeric arrays of every class are read as `f64` matrices; compressed
//! variables are inflated transparently. Cell, struct, char, sparse and
//! complex arrays are listed but cannot be read as matrices.

pub mod element;
pub mod error;
pub mod reader;
pub mod writer;

pub use element::types::MatClass;
pub use error::{MatError, MatResult};
pub use reader::{MatFile, MatReader, MatVariable};
pub use writer::{MatWriteOptions, MatWriter};

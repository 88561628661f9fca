//! 1-based row/column index sets

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// An ordered set of 1-based row or column indices
///
/// Indices need not be contiguous or sorted; order is preserved so sections
/// come out in the order the indices were given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct IndexRange(Vec<usize>);

impl IndexRange {
    /// Create a range from explicit 1-based indices
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i == 0) {
            return Err(Error::InvalidIndex(bad));
        }
        Ok(Self(indices))
    }

    /// Inclusive span `start..=stop`
    pub fn span(start: usize, stop: usize) -> Result<Self> {
        if start == 0 {
            return Err(Error::InvalidIndex(start));
        }
        Ok(Self((start..=stop).collect()))
    }

    /// The full extent `1..=len`
    pub fn full(len: usize) -> Self {
        Self((1..=len).collect())
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the range selects nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The indices
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Iterate over the indices
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<usize>> for IndexRange {
    type Error = Error;

    fn try_from(indices: Vec<usize>) -> Result<Self> {
        Self::new(indices)
    }
}

impl TryFrom<RangeInclusive<usize>> for IndexRange {
    type Error = Error;

    fn try_from(range: RangeInclusive<usize>) -> Result<Self> {
        Self::span(*range.start(), *range.end())
    }
}

impl From<IndexRange> for Vec<usize> {
    fn from(range: IndexRange) -> Self {
        range.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let r = IndexRange::span(3, 5).unwrap();
        assert_eq!(r.indices(), &[3, 4, 5]);
        assert!(IndexRange::span(5, 4).unwrap().is_empty());
        assert!(IndexRange::span(0, 4).is_err());
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            IndexRange::new(vec![1, 0, 2]),
            Err(Error::InvalidIndex(0))
        ));
        let r = IndexRange::new(vec![5, 1, 3]).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![5, 1, 3]);
    }

    #[test]
    fn test_full_and_conversions() {
        assert_eq!(IndexRange::full(3).indices(), &[1, 2, 3]);
        let r = IndexRange::try_from(2..=3).unwrap();
        assert_eq!(Vec::from(r), vec![2, 3]);
    }
}

//! Mesh partitioning
//!
//! A cell mesh spans the negative electrode, the separator and the positive
//! electrode in one normalized coordinate. The default layout puts the
//! negative electrode on `[0, 1]`, the separator on `(1, 2]` and the
//! positive electrode above 2.

use std::ops::Range;

use crate::error::{Error, Result};

/// Region boundaries of a normalized mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshThresholds {
    /// Upper bound (inclusive) of the negative electrode
    pub negative: f64,
    /// Upper bound (inclusive) of the separator
    pub separator: f64,
}

impl Default for MeshThresholds {
    fn default() -> Self {
        Self {
            negative: 1.0,
            separator: 2.0,
        }
    }
}

/// One of the three cell regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Negative,
    Separator,
    Positive,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Negative, Region::Separator, Region::Positive];
}

/// Index sets of each region over one mesh
///
/// The three index sets are disjoint, together cover every mesh position,
/// and are each in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRegions {
    pub mesh: Vec<f64>,
    pub negative: Vec<usize>,
    pub separator: Vec<usize>,
    pub positive: Vec<usize>,
}

impl MeshRegions {
    pub fn region(&self, region: Region) -> &[usize] {
        match region {
            Region::Negative => &self.negative,
            Region::Separator => &self.separator,
            Region::Positive => &self.positive,
        }
    }

    /// Mesh coordinates of one region
    pub fn coordinates(&self, region: Region) -> Vec<f64> {
        self.region(region).iter().map(|&i| self.mesh[i]).collect()
    }

    /// Pick one region's entries out of a per-node vector
    pub fn slice(&self, region: Region, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.mesh.len() {
            return Err(Error::shape("values vs mesh", self.mesh.len(), values.len()));
        }
        Ok(self.region(region).iter().map(|&i| values[i]).collect())
    }

    pub fn len(&self) -> usize {
        self.mesh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// Partition a mesh with the default thresholds
///
/// # Example
/// ```rust
/// use coslib::partition;
///
/// let regions = partition(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
/// assert_eq!(regions.negative, vec![0, 1, 2]);
/// assert_eq!(regions.separator, vec![3, 4]);
/// assert_eq!(regions.positive, vec![5, 6]);
/// ```
pub fn partition(mesh: &[f64]) -> MeshRegions {
    partition_with(mesh, &MeshThresholds::default())
}

/// Partition a mesh by the given thresholds
///
/// Interface nodes are often written twice, once for each side. When a
/// region ends on such a duplicate, the duplicate is moved into the next
/// region so each side of the interface owns one copy.
pub fn partition_with(mesh: &[f64], thresholds: &MeshThresholds) -> MeshRegions {
    let mut negative = Vec::new();
    let mut separator = Vec::new();
    let mut positive = Vec::new();

    for (i, &x) in mesh.iter().enumerate() {
        if x <= thresholds.negative {
            negative.push(i);
        } else if x <= thresholds.separator {
            separator.push(i);
        } else {
            positive.push(i);
        }
    }

    move_duplicate_boundary(mesh, &mut negative, &mut separator);
    move_duplicate_boundary(mesh, &mut separator, &mut positive);

    log::debug!(
        "partitioned {} nodes: {} negative, {} separator, {} positive",
        mesh.len(),
        negative.len(),
        separator.len(),
        positive.len()
    );

    MeshRegions {
        mesh: mesh.to_vec(),
        negative,
        separator,
        positive,
    }
}

fn move_duplicate_boundary(mesh: &[f64], region: &mut Vec<usize>, next: &mut Vec<usize>) {
    let n = region.len();
    if n < 2 {
        return;
    }
    if mesh[region[n - 1]] == mesh[region[n - 2]] {
        if let Some(last) = region.pop() {
            next.insert(0, last);
        }
    }
}

/// Contiguous index range of a region, when its indices are consecutive
pub fn region_range(regions: &MeshRegions, region: Region) -> Option<Range<usize>> {
    let indices = regions.region(region);
    let first = *indices.first()?;
    let last = *indices.last()?;
    (last + 1 - first == indices.len()).then_some(first..last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_partition() {
        let regions = partition(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(regions.negative, vec![0, 1, 2]);
        assert_eq!(regions.separator, vec![3, 4]);
        assert_eq!(regions.positive, vec![5, 6]);
        assert_eq!(region_range(&regions, Region::Separator), Some(3..5));
    }

    #[test]
    fn test_duplicate_interface_nodes() {
        let mesh = [0.0, 0.5, 1.0, 1.0, 1.5, 2.0, 2.0, 2.5];
        let regions = partition(&mesh);
        assert_eq!(regions.negative, vec![0, 1, 2]);
        assert_eq!(regions.separator, vec![3, 4, 5]);
        assert_eq!(regions.positive, vec![6, 7]);
        assert_eq!(regions.coordinates(Region::Separator), vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_single_node_region_is_kept() {
        let regions = partition(&[1.0, 1.5, 3.0]);
        assert_eq!(regions.negative, vec![0]);
        assert_eq!(regions.separator, vec![1]);
        assert_eq!(regions.positive, vec![2]);
    }

    #[test]
    fn test_empty_regions() {
        let regions = partition(&[2.5, 3.0]);
        assert!(regions.negative.is_empty());
        assert!(regions.separator.is_empty());
        assert_eq!(regions.positive, vec![0, 1]);
        assert_eq!(region_range(&regions, Region::Negative), None);

        assert!(partition(&[]).is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = MeshThresholds {
            negative: 0.4,
            separator: 0.6,
        };
        let regions = partition_with(&[0.0, 0.2, 0.4, 0.5, 0.6, 0.8, 1.0], &thresholds);
        assert_eq!(regions.negative, vec![0, 1, 2]);
        assert_eq!(regions.separator, vec![3, 4]);
        assert_eq!(regions.positive, vec![5, 6]);
    }

    #[test]
    fn test_slice() {
        let regions = partition(&[0.5, 1.5, 2.5]);
        let values = [10.0, 20.0, 30.0];
        assert_eq!(regions.slice(Region::Positive, &values).unwrap(), vec![30.0]);
        assert!(matches!(
            regions.slice(Region::Positive, &values[..2]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_regions_cover_mesh(mut mesh in prop::collection::vec(0.0f64..3.0, 0..40)) {
            mesh.sort_by(|a, b| a.total_cmp(b));
            let regions = partition(&mesh);

            let mut all: Vec<usize> = Region::ALL
                .iter()
                .flat_map(|&r| regions.region(r).to_vec())
                .collect();
            // Sorted mesh keeps regions in order, so concatenation is already 0..n
            prop_assert_eq!(all.clone(), (0..mesh.len()).collect::<Vec<_>>());
            all.sort_unstable();
            all.dedup();
            prop_assert_eq!(all.len(), mesh.len());
        }
    }
}

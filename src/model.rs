use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BankerError, Result};

/// Units of a single resource type.
pub type Units = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Dense row-major P×R matrix of resource units.
///
/// Rows are processes, columns are resource types. The width is fixed when the
/// matrix is built, so every row is guaranteed to have `resources()` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatrixDocument", into = "MatrixDocument")]
pub struct Matrix {
    processes: usize,
    resources: usize,
    dense: Vec<Units>,
}

impl Matrix {
    pub fn zeros(processes: usize, resources: usize) -> Self {
        Self {
            processes,
            resources,
            dense: vec![0; processes * resources],
        }
    }

    /// Builds a matrix from per-process rows. The first row fixes the width.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Units]>,
    {
        Self::collect_rows(None, rows)
    }

    /// Builds a matrix whose width is given up front, so a matrix with no
    /// rows still knows how many resource types it spans.
    pub fn with_width<I, R>(resources: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Units]>,
    {
        Self::collect_rows(Some(resources), rows)
    }

    fn collect_rows<I, R>(mut resources: Option<usize>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Units]>,
    {
        let mut dense = Vec::new();
        let mut processes = 0;

        for (row, units) in rows.into_iter().enumerate() {
            let units = units.as_ref();
            let expected = *resources.get_or_insert(units.len());
            if units.len() != expected {
                return Err(BankerError::RaggedMatrix {
                    row,
                    expected,
                    found: units.len(),
                });
            }
            dense.extend_from_slice(units);
            processes += 1;
        }

        Ok(Self {
            processes,
            resources: resources.unwrap_or(0),
            dense,
        })
    }

    pub fn processes(&self) -> usize {
        self.processes
    }

    pub fn resources(&self) -> usize {
        self.resources
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.processes, self.resources)
    }

    pub fn row(&self, process: usize) -> Option<&[Units]> {
        if process >= self.processes {
            return None;
        }
        let start = process * self.resources;
        self.dense.get(start..start + self.resources)
    }

    pub fn get(&self, process: usize, resource: usize) -> Option<Units> {
        if resource >= self.resources {
            return None;
        }
        self.row(process).map(|row| row[resource])
    }

    pub(crate) fn row_mut(&mut self, process: usize) -> Option<&mut [Units]> {
        if process >= self.processes {
            return None;
        }
        let start = process * self.resources;
        self.dense.get_mut(start..start + self.resources)
    }

    /// Iterates rows in process order.
    pub fn rows(&self) -> impl Iterator<Item = &[Units]> + '_ {
        (0..self.processes).filter_map(move |process| self.row(process))
    }
}

/// Serialized form of [`Matrix`]. The width is stored next to the rows so
/// that a matrix without processes keeps its resource count.
#[derive(Serialize, Deserialize)]
struct MatrixDocument {
    resources: usize,
    rows: Vec<Vec<Units>>,
}

impl TryFrom<MatrixDocument> for Matrix {
    type Error = BankerError;

    fn try_from(document: MatrixDocument) -> Result<Self> {
        Self::with_width(document.resources, document.rows)
    }
}

impl From<Matrix> for MatrixDocument {
    fn from(matrix: Matrix) -> Self {
        Self {
            resources: matrix.resources,
            rows: matrix.rows().map(<[Units]>::to_vec).collect(),
        }
    }
}

/// Per-resource unit counts, e.g. the available vector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceVector(Vec<Units>);

impl ResourceVector {
    pub fn new(units: impl Into<Vec<Units>>) -> Self {
        Self(units.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Units] {
        &self.0
    }

    /// Entrywise `self >= other`. Vectors of different lengths never dominate.
    pub fn dominates(&self, other: &ResourceVector) -> bool {
        self.len() == other.len() && self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }
}

impl From<Vec<Units>> for ResourceVector {
    fn from(units: Vec<Units>) -> Self {
        Self(units)
    }
}

impl<const N: usize> From<[Units; N]> for ResourceVector {
    fn from(units: [Units; N]) -> Self {
        Self(units.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_row_major_layout() {
        let matrix = Matrix::from_rows([[1, 2, 0], [3, 4, 5]]).unwrap();
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.row(1), Some(&[3, 4, 5][..]));
        assert_eq!(matrix.get(0, 1), Some(2));
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.row(2), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            BankerError::RaggedMatrix {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_matrix_has_no_width() {
        let matrix = Matrix::from_rows(Vec::<Vec<Units>>::new()).unwrap();
        assert_eq!(matrix.shape(), (0, 0));
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn zero_width_rows_are_allowed() {
        let matrix = Matrix::from_rows(vec![Vec::<Units>::new(), Vec::new()]).unwrap();
        assert_eq!(matrix.shape(), (2, 0));
        assert_eq!(matrix.row(1), Some(&[][..]));
    }

    #[test]
    fn explicit_width_survives_without_rows() {
        let matrix = Matrix::with_width(3, Vec::<Vec<Units>>::new()).unwrap();
        assert_eq!(matrix.shape(), (0, 3));
        assert_eq!(matrix, Matrix::zeros(0, 3));

        let err = Matrix::with_width(2, [[1, 2, 3]]).unwrap_err();
        assert_eq!(
            err,
            BankerError::RaggedMatrix {
                row: 0,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn dominates_is_entrywise() {
        let big = ResourceVector::from([3, 2, 2]);
        assert!(big.dominates(&ResourceVector::from([3, 1, 0])));
        assert!(!big.dominates(&ResourceVector::from([4, 0, 0])));
        assert!(!big.dominates(&ResourceVector::from([1, 1])));
    }

    #[test]
    fn process_ids_display_with_prefix() {
        assert_eq!(ProcessId(4).to_string(), "P4");
    }
}

//! Dense symmetric matrix container
//!
//! Holds the n×n score matrix a matrix producer hands to the matching core,
//! and the boolean matched-pair matrix handed back to the consumer. Storage
//! is full row-major; `set` writes both triangles so symmetry is preserved
//! by construction once a matrix has been validated.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::MatchingError;

/// Symmetric matrix with `dimension × dimension` entries
///
/// Deserialization runs the same checks as [`SymmetricMatrix::from_rows`],
/// so a decoded matrix is always square, symmetric and comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawSymmetricMatrix<T>",
    bound(deserialize = "T: Deserialize<'de> + Clone + PartialEq")
)]
pub struct SymmetricMatrix<T> {
    dimension: usize,
    values: Vec<T>,
}

/// Wire form of a matrix before validation
#[derive(Deserialize)]
struct RawSymmetricMatrix<T> {
    dimension: usize,
    values: Vec<T>,
}

impl<T: Clone + PartialEq> TryFrom<RawSymmetricMatrix<T>> for SymmetricMatrix<T> {
    type Error = MatchingError;

    fn try_from(raw: RawSymmetricMatrix<T>) -> Result<Self, Self::Error> {
        if raw.dimension.checked_mul(raw.dimension) != Some(raw.values.len()) {
            return Err(MatchingError::MatrixLength {
                dimension: raw.dimension,
                length: raw.values.len(),
            });
        }

        let matrix = Self {
            dimension: raw.dimension,
            values: raw.values,
        };
        matrix.check_entries()?;
        Ok(matrix)
    }
}

impl<T: Clone + PartialEq> SymmetricMatrix<T> {
    /// Creates a matrix with every entry set to `value`
    pub fn filled(dimension: usize, value: T) -> Self {
        Self {
            dimension,
            values: vec![value; dimension * dimension],
        }
    }

    /// Builds a matrix from rows, rejecting non-square or asymmetric input
    ///
    /// An off-diagonal entry that does not compare equal to itself (a NaN
    /// score) is reported as `NonFiniteEntry` rather than as an asymmetry.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatchingError> {
        let dimension = rows.len();

        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != dimension {
                return Err(MatchingError::NonSquareMatrix {
                    rows: dimension,
                    row,
                    length: entries.len(),
                });
            }
        }

        let matrix = Self {
            dimension,
            values: rows.into_iter().flatten().collect(),
        };
        matrix.check_entries()?;
        Ok(matrix)
    }

    /// Checks every off-diagonal pair for comparability and symmetry
    fn check_entries(&self) -> Result<(), MatchingError> {
        for i in 0..self.dimension {
            for j in (i + 1)..self.dimension {
                let (Some(upper), Some(lower)) = (self.get(i, j), self.get(j, i)) else {
                    return Err(MatchingError::MatrixLength {
                        dimension: self.dimension,
                        length: self.values.len(),
                    });
                };

                if !PartialEq::eq(upper, upper) {
                    return Err(MatchingError::NonFiniteEntry { row: i, column: j });
                }
                if !PartialEq::eq(lower, lower) {
                    return Err(MatchingError::NonFiniteEntry { row: j, column: i });
                }
                if upper != lower {
                    return Err(MatchingError::AsymmetricMatrix { row: i, column: j });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Entry at `(row, column)`, `None` when out of bounds
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.dimension && column < self.dimension {
            self.values.get(row * self.dimension + column)
        } else {
            None
        }
    }

    fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.dimension && column < self.dimension {
            self.values.get_mut(row * self.dimension + column)
        } else {
            None
        }
    }

    /// Writes `value` at `(row, column)` and `(column, row)`
    pub fn set(&mut self, row: usize, column: usize, value: T) -> Result<(), MatchingError> {
        let dimension = self.dimension;
        let out_of_bounds = || MatchingError::IndexOutOfBounds { row, column, dimension };

        *self.get_mut(column, row).ok_or_else(out_of_bounds)? = value.clone();
        *self.get_mut(row, column).ok_or_else(out_of_bounds)? = value;
        Ok(())
    }

    /// Iterates the strict upper triangle as `(row, column, value)` in row-major order
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let n = self.dimension;
        (0..n).flat_map(move |i| {
            ((i + 1)..n).filter_map(move |j| self.get(i, j).map(|value| (i, j, value)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_accepts_symmetric_input() {
        let matrix = SymmetricMatrix::from_rows(vec![
            vec![0.0, 0.7, 0.1],
            vec![0.7, 0.0, 0.4],
            vec![0.1, 0.4, 0.0],
        ])
        .unwrap();

        assert_eq!(matrix.dimension(), 3);
        assert_eq!(matrix.get(0, 1), Some(&0.7));
        assert_eq!(matrix.get(2, 1), Some(&0.4));
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = SymmetricMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]);

        assert!(matches!(
            result,
            Err(MatchingError::NonSquareMatrix { rows: 2, row: 1, length: 1 })
        ));
    }

    #[test]
    fn test_from_rows_rejects_asymmetric_entries() {
        let result = SymmetricMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.5],
            vec![0.0, 0.2, 0.0],
        ]);

        assert!(matches!(
            result,
            Err(MatchingError::AsymmetricMatrix { row: 1, column: 2 })
        ));
    }

    #[test]
    fn test_set_writes_both_triangles() {
        let mut matrix = SymmetricMatrix::filled(4, false);
        matrix.set(1, 3, true).unwrap();

        assert_eq!(matrix.get(1, 3), Some(&true));
        assert_eq!(matrix.get(3, 1), Some(&true));
        assert!(matrix.set(4, 0, true).is_err());
    }

    #[test]
    fn test_upper_triangle_order() {
        let matrix = SymmetricMatrix::from_rows(vec![
            vec![0, 1, 2],
            vec![1, 0, 3],
            vec![2, 3, 0],
        ])
        .unwrap();

        let entries: Vec<_> = matrix.upper_triangle().map(|(i, j, v)| (i, j, *v)).collect();
        assert_eq!(entries, vec![(0, 1, 1), (0, 2, 2), (1, 2, 3)]);
    }

    #[test]
    fn test_from_rows_reports_nan_as_non_finite() {
        let result = SymmetricMatrix::from_rows(vec![
            vec![0.0, 0.3, 0.0],
            vec![0.3, 0.0, f64::NAN],
            vec![0.0, f64::NAN, 0.0],
        ]);

        assert!(matches!(
            result,
            Err(MatchingError::NonFiniteEntry { row: 1, column: 2 })
        ));
    }

    #[test]
    fn test_deserialization_validates_payload() {
        let matrix: SymmetricMatrix<f64> =
            serde_json::from_str(r#"{"dimension":2,"values":[0.0,0.8,0.8,0.0]}"#).unwrap();
        assert_eq!(matrix.get(1, 0), Some(&0.8));

        let asymmetric = serde_json::from_str::<SymmetricMatrix<f64>>(
            r#"{"dimension":2,"values":[0.0,1.0,0.0,0.0]}"#,
        );
        assert!(asymmetric.unwrap_err().to_string().contains("not symmetric"));

        let truncated =
            serde_json::from_str::<SymmetricMatrix<f64>>(r#"{"dimension":3,"values":[0.0]}"#);
        assert!(truncated.unwrap_err().to_string().contains("cannot hold 1 entries"));
    }

    #[test]
    fn test_serialized_form_decodes_to_same_matrix() {
        let mut matrix = SymmetricMatrix::filled(3, false);
        matrix.set(0, 2, true).unwrap();

        let json = serde_json::to_string(&matrix).unwrap();
        let decoded: SymmetricMatrix<bool> = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, matrix);
    }
}

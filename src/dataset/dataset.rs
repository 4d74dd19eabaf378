use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use super::{DataErr, Result};

/// A labelled, in-memory dataset: one feature row per example plus its class.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Vec<usize>,
}

impl Dataset {
    /// Creates a new dataset from its feature matrix and labels.
    ///
    /// # Errors
    /// `DataErr::LengthMismatch` if there is not exactly one label per row.
    pub fn new(features: Array2<f32>, labels: Vec<usize>) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(DataErr::LengthMismatch {
                labels: labels.len(),
                rows: features.nrows(),
            });
        }

        Ok(Self { features, labels })
    }

    /// Creates a new dataset from raw rows laid out as `[label, x_1, .., x_k]`.
    ///
    /// # Errors
    /// - `DataErr::Empty` if there are no rows or no feature columns.
    /// - `DataErr::RowWidth` if a row is wider or narrower than the first one.
    /// - `DataErr::InvalidLabel` if a label is not a non-negative integer.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or_default();
        if width < 2 {
            return Err(DataErr::Empty);
        }

        let mut labels = Vec::with_capacity(rows.len());
        let mut data = Vec::with_capacity(rows.len() * (width - 1));

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(DataErr::RowWidth {
                    row: i,
                    got: row.len(),
                    expected: width,
                });
            }

            labels.push(parse_label(i, row[0])?);
            data.extend_from_slice(&row[1..]);
        }

        let features = Array2::from_shape_vec((rows.len(), width - 1), data)?;
        Self::new(features, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the amount of features per example.
    pub fn x_size(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Iterates over the `(label, features)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ArrayView1<'_, f32>)> {
        self.labels
            .iter()
            .copied()
            .zip(self.features.axis_iter(Axis(0)))
    }

    /// Divides every feature by `scale`. Labels are left untouched.
    pub fn normalize(&mut self, scale: f32) {
        normalize(&mut self.features, scale);
    }
}

/// Divides every value of a feature matrix by `scale`.
pub fn normalize(features: &mut Array2<f32>, scale: f32) {
    features.mapv_inplace(|v| v / scale);
}

pub(super) fn parse_label(row: usize, value: f32) -> Result<usize> {
    if value.is_finite() && value >= 0. && value.fract() == 0. {
        Ok(value as usize)
    } else {
        Err(DataErr::InvalidLabel { row, value })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn rows_are_split_into_labels_and_features() {
        let ds = Dataset::from_rows(&[vec![0f32, 1., 0.], vec![1., 0., 1.]]).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.x_size(), 2);
        assert_eq!(ds.labels(), [0, 1]);
        assert_eq!(ds.features(), array![[1f32, 0.], [0., 1.]]);
    }

    #[test]
    fn iteration_keeps_dataset_order() {
        let ds = Dataset::from_rows(&[[2f32, 0.5], [0., 0.25], [1., 0.125]]).unwrap();
        let pairs: Vec<_> = ds.iter().map(|(label, x)| (label, x[0])).collect();

        assert_eq!(pairs, [(2, 0.5), (0, 0.25), (1, 0.125)]);
    }

    #[test]
    fn normalize_leaves_labels_alone() {
        let mut ds = Dataset::from_rows(&[[3f32, 255., 51.]]).unwrap();
        ds.normalize(255.);

        assert_eq!(ds.labels(), [3]);
        assert_eq!(ds.features(), array![[1f32, 0.2]]);
    }

    #[test]
    fn invalid_labels_are_rejected() {
        for label in [-1f32, 0.5, f32::NAN] {
            let err = Dataset::from_rows(&[[label, 1.]]).unwrap_err();
            assert!(matches!(err, DataErr::InvalidLabel { row: 0, .. }), "got {err:?}");
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Dataset::from_rows(&[vec![0f32, 1., 2.], vec![1., 2.]]).unwrap_err();
        assert!(matches!(err, DataErr::RowWidth { row: 1, got: 2, expected: 3 }));
    }

    #[test]
    fn rows_without_features_are_empty() {
        let no_rows: [Vec<f32>; 0] = [];
        assert!(matches!(Dataset::from_rows(&no_rows), Err(DataErr::Empty)));
        assert!(matches!(Dataset::from_rows(&[[1f32]]), Err(DataErr::Empty)));
    }

    #[test]
    fn labels_must_match_rows() {
        let err = Dataset::new(Array2::zeros((2, 3)), vec![0]).unwrap_err();
        assert!(matches!(err, DataErr::LengthMismatch { labels: 1, rows: 2 }));
    }
}

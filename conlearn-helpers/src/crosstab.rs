use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::{Category, Frame, FrameError};

/// Contingency table of two equal-length label sequences.
///
/// Rows are the sorted distinct actual values, columns the sorted distinct
/// predicted values. A sequence missing a class simply has fewer rows (or
/// columns), so callers should look cells up by value with [`CrossTab::count`].
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab<V> {
    rows: Vec<V>,
    cols: Vec<V>,
    counts: Array2<usize>,
}

impl<V> CrossTab<V>
where
    V: Category,
{
    pub fn new(actual: &[V], predicted: &[V]) -> Result<Self, FrameError> {
        if actual.len() != predicted.len() {
            return Err(FrameError::ShapeMismatch {
                expected: actual.len(),
                got: predicted.len(),
            });
        }

        let rows: Vec<V> = actual.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let cols: Vec<V> = predicted.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();

        let mut counts = Array2::zeros((rows.len(), cols.len()));
        for (a, p) in actual.iter().zip(predicted) {
            if let (Ok(i), Ok(j)) = (rows.binary_search(a), cols.binary_search(p)) {
                counts[[i, j]] += 1;
            }
        }

        Ok(Self { rows, cols, counts })
    }

    /// Cross-tabulates two columns of the same frame.
    pub fn from_frame(frame: &Frame<V>, actual: &str, predicted: &str) -> Result<Self, FrameError> {
        let actual = frame.column(actual)?.to_vec();
        let predicted = frame.column(predicted)?.to_vec();
        Self::new(&actual, &predicted)
    }

    /// Distinct actual values, sorted.
    pub fn row_values(&self) -> &[V] {
        &self.rows
    }

    /// Distinct predicted values, sorted.
    pub fn col_values(&self) -> &[V] {
        &self.cols
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    /// Number of pairs with this actual and predicted value (0 if either never occurs).
    pub fn count(&self, actual: &V, predicted: &V) -> usize {
        match (self.rows.binary_search(actual), self.cols.binary_search(predicted)) {
            (Ok(i), Ok(j)) => self.counts[[i, j]],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.sum()
    }
}

impl<V> Display for CrossTab<V>
where
    V: Category,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actual \\ Predicted")?;
        for col in &self.cols {
            write!(f, "\t{}", col)?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{}", row)?;
            for j in 0..self.cols.len() {
                write!(f, "\t{}", self.counts[[i, j]])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

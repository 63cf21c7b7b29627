use ndarray::{Array2, ArrayView1, Axis};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::Category;

/// Errors raised by [`Frame`] construction, column access and loading.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// No column with this name exists.
    UnknownColumn(String),
    /// A column name appears more than once.
    DuplicateColumn(String),
    /// A row or column does not have the expected number of cells.
    ShapeMismatch { expected: usize, got: usize },
    /// Row index past the end of the frame.
    RowOutOfBounds { row: usize, n_rows: usize },
    /// The CSV input could not be parsed.
    Csv(String),
    /// The input could not be read.
    Io(String),
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::UnknownColumn(name) => write!(f, "Unknown column '{}'", name),
            FrameError::DuplicateColumn(name) => write!(f, "Duplicate column '{}'", name),
            FrameError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected {} cells, got {}", expected, got)
            }
            FrameError::RowOutOfBounds { row, n_rows } => {
                write!(f, "Row {} is out of bounds for a frame with {} rows", row, n_rows)
            }
            FrameError::Csv(msg) => write!(f, "Malformed CSV input: {}", msg),
            FrameError::Io(msg) => write!(f, "Could not read input: {}", msg),
        }
    }
}

impl Error for FrameError {}

/// A small column-named table of categorical values.
///
/// Rows are examples, columns are attributes. Cells live in a row-major
/// `Array2`, column names keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Frame<V> {
    columns: Vec<String>,
    data: Array2<V>,
}

impl<V> Frame<V>
where
    V: Category,
{
    /// Creates a frame from column names and a matrix of cells.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::ShapeMismatch` if the number of names differs from the
    /// number of matrix columns, and `FrameError::DuplicateColumn` if a name repeats.
    pub fn new(columns: Vec<String>, data: Array2<V>) -> Result<Self, FrameError> {
        if columns.len() != data.ncols() {
            return Err(FrameError::ShapeMismatch {
                expected: columns.len(),
                got: data.ncols(),
            });
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(FrameError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { columns, data })
    }

    /// Creates a frame from row vectors. Every row must have one cell per column.
    pub fn from_rows<S, I>(columns: I, rows: Vec<Vec<V>>) -> Result<Self, FrameError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let width = columns.len();
        let n_rows = rows.len();

        let mut cells = Vec::with_capacity(n_rows * width);
        for row in rows {
            if row.len() != width {
                return Err(FrameError::ShapeMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
            cells.extend(row);
        }
        let n_cells = cells.len();
        let data = Array2::from_shape_vec((n_rows, width), cells).map_err(|_| {
            FrameError::ShapeMismatch {
                expected: n_rows * width,
                got: n_cells,
            }
        })?;
        Self::new(columns, data)
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, V>, FrameError> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }

    /// The row at integer position `i`, or `None` past the end.
    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, V>> {
        (i < self.n_rows()).then(|| self.data.row(i))
    }

    /// The cell at row `row` of the named column.
    pub fn value(&self, row: usize, name: &str) -> Result<&V, FrameError> {
        let idx = self.column_index(name)?;
        self.data.get((row, idx)).ok_or(FrameError::RowOutOfBounds {
            row,
            n_rows: self.n_rows(),
        })
    }

    /// A new frame holding the given rows, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Frame<V> {
        Frame {
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), indices),
        }
    }

    /// Boolean mask over the rows, computed from the named column.
    pub fn mask<P>(&self, column: &str, mut predicate: P) -> Result<Vec<bool>, FrameError>
    where
        P: FnMut(&V) -> bool,
    {
        Ok(self.column(column)?.iter().map(|v| predicate(v)).collect())
    }

    /// A new frame with the rows whose `column` value satisfies `predicate`.
    pub fn filter_rows<P>(&self, column: &str, predicate: P) -> Result<Frame<V>, FrameError>
    where
        P: FnMut(&V) -> bool,
    {
        let indices: Vec<usize> = self
            .mask(column, predicate)?
            .into_iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        Ok(self.select_rows(&indices))
    }

    /// A new frame without the named column.
    pub fn drop_column(&self, name: &str) -> Result<Frame<V>, FrameError> {
        let idx = self.column_index(name)?;
        let keep: Vec<usize> = (0..self.n_cols()).filter(|&c| c != idx).collect();
        let columns = keep.iter().map(|&c| self.columns[c].clone()).collect();
        Ok(Frame {
            columns,
            data: self.data.select(Axis(1), &keep),
        })
    }

    /// Writes `values` into the named column, appending it if it does not exist yet.
    ///
    /// The frame is left untouched when `values` has the wrong length.
    pub fn set_column(&mut self, name: &str, values: Vec<V>) -> Result<(), FrameError> {
        if values.len() != self.n_rows() {
            return Err(FrameError::ShapeMismatch {
                expected: self.n_rows(),
                got: values.len(),
            });
        }
        let values = ArrayView1::from(values.as_slice());
        match self.column_index(name) {
            Ok(idx) => self.data.column_mut(idx).assign(&values),
            Err(_) => {
                self.data
                    .push_column(values)
                    .map_err(|_| FrameError::ShapeMismatch {
                        expected: self.data.nrows(),
                        got: values.len(),
                    })?;
                self.columns.push(name.to_string());
            }
        }
        Ok(())
    }

    /// Consuming variant of [`Frame::set_column`].
    pub fn with_column(mut self, name: &str, values: Vec<V>) -> Result<Frame<V>, FrameError> {
        self.set_column(name, values)?;
        Ok(self)
    }

    /// For each row, whether it equals the reference mapping on every listed column.
    ///
    /// An empty mapping matches every row.
    pub fn rows_matching<'a, I>(&self, reference: I) -> Result<Vec<bool>, FrameError>
    where
        I: IntoIterator<Item = (&'a str, &'a V)>,
        V: 'a,
    {
        let reference = reference
            .into_iter()
            .map(|(name, value)| Ok((self.column_index(name)?, value)))
            .collect::<Result<Vec<_>, FrameError>>()?;

        Ok(self
            .data
            .rows()
            .into_iter()
            .map(|row| reference.iter().all(|&(idx, value)| &row[idx] == value))
            .collect())
    }

    /// The `(column, value)` pairs of row `i`, in column order.
    pub fn record(&self, i: usize) -> Option<Vec<(&str, &V)>> {
        let row = self.row(i)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.into_iter())
                .collect(),
        )
    }

    /// Iterates over all rows as `(column, value)` records.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &V)>> + '_ {
        self.data.rows().into_iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.into_iter())
                .collect()
        })
    }
}

impl<V> Display for Frame<V>
where
    V: Category,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn mail_frame() -> Frame<u8> {
        Frame::from_rows(
            ["has_link", "has_attachment", "is_spam"],
            vec![
                vec![1, 0, 1],
                vec![1, 1, 1],
                vec![0, 1, 0],
                vec![0, 0, 0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let frame = mail_frame();
        assert_eq!(frame.n_rows(), 4);
        assert_eq!(frame.n_cols(), 3);
        assert_eq!(frame.columns(), ["has_link", "has_attachment", "is_spam"]);
        assert_eq!(*frame.value(1, "has_attachment").unwrap(), 1);
    }

    #[test]
    fn test_error_on_ragged_rows() {
        let result = Frame::from_rows(["a", "b"], vec![vec![1u8, 0], vec![1u8]]);
        assert_eq!(
            result.unwrap_err(),
            FrameError::ShapeMismatch { expected: 2, got: 1 }
        );
    }

    #[test]
    fn test_error_on_duplicate_column() {
        let result = Frame::new(
            vec!["a".to_string(), "a".to_string()],
            array![[1u8, 0]],
        );
        assert_eq!(result.unwrap_err(), FrameError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_unknown_column() {
        let frame = mail_frame();
        assert!(matches!(
            frame.column("subject"),
            Err(FrameError::UnknownColumn(_))
        ));
        assert!(matches!(
            frame.value(9, "is_spam"),
            Err(FrameError::RowOutOfBounds { row: 9, n_rows: 4 })
        ));
        assert!(frame.row(4).is_none());
    }

    #[test]
    fn test_filter_and_drop() {
        let frame = mail_frame();
        let spam = frame
            .filter_rows("is_spam", |v| *v == 1)
            .unwrap()
            .drop_column("is_spam")
            .unwrap();
        assert_eq!(spam.n_rows(), 2);
        assert_eq!(spam.columns(), ["has_link", "has_attachment"]);
        assert_eq!(spam.row(1).unwrap().to_vec(), vec![1, 1]);
    }

    #[test]
    fn test_set_column_appends_then_replaces() {
        let mut frame = mail_frame();
        frame.set_column("predicted", vec![0, 0, 0, 0]).unwrap();
        assert_eq!(frame.n_cols(), 4);

        frame.set_column("predicted", vec![1, 1, 0, 0]).unwrap();
        assert_eq!(frame.n_cols(), 4);
        assert_eq!(frame.column("predicted").unwrap().to_vec(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_with_column() {
        let frame = mail_frame().with_column("predicted", vec![1, 1, 0, 0]).unwrap();
        assert_eq!(frame.columns().last().unwrap(), "predicted");
        assert_eq!(frame.value(0, "predicted").unwrap(), &1);

        assert_eq!(
            mail_frame().with_column("predicted", vec![1]).unwrap_err(),
            FrameError::ShapeMismatch { expected: 4, got: 1 }
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(!mail_frame().is_empty());
        let ham = mail_frame().filter_rows("is_spam", |v| *v == 2).unwrap();
        assert!(ham.is_empty());
        assert_eq!(ham.n_cols(), 3);
    }

    #[test]
    fn test_set_column_wrong_length_leaves_frame_untouched() {
        let mut frame = mail_frame();
        let before = frame.clone();
        assert!(frame.set_column("predicted", vec![1, 0]).is_err());
        assert_eq!(frame, before);
    }

    #[test]
    fn test_rows_matching() {
        let frame = mail_frame();
        let one = 1u8;
        let mask = frame.rows_matching([("has_link", &one)]).unwrap();
        assert_eq!(mask, vec![true, true, false, false]);

        let everything = frame.rows_matching(std::iter::empty()).unwrap();
        assert_eq!(everything, vec![true; 4]);

        assert!(frame.rows_matching([("subject", &one)]).is_err());
    }

    #[test]
    fn test_records_follow_column_order() {
        let frame = mail_frame();
        let first = frame.record(0).unwrap();
        assert_eq!(first, vec![("has_link", &1u8), ("has_attachment", &0u8), ("is_spam", &1u8)]);
        assert_eq!(frame.records().count(), 4);
    }
}

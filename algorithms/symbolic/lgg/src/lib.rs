//! Concept learning by Least General Generalization.
//!
//! The learner describes the positive class of a binary-labeled table with a
//! single conjunction of `attribute == value` literals: it starts from the first
//! positive training example and drops every literal that a later positive
//! example disagrees with. Test examples covered by the conjunction are
//! predicted positive.

use std::error::Error;
use std::fmt::{Display, Formatter};

use conlearn_helpers::{FrameError, SplitError};

mod conjunction;
mod learner;
mod metrics;

pub use conjunction::{lgg_conjunction, lgg_set, Conjunction, Literal};
pub use learner::{ConceptLearner, LearnerConfig};
pub use metrics::ConfusionMatrix;

/// Errors that can occur when building, fitting or evaluating a [`ConceptLearner`].
#[derive(Debug, Clone, PartialEq)]
pub enum LggError {
    /// The test fraction must lie strictly between 0 and 1.
    InvalidTestFraction(f64),
    /// The split leaves the train or test partition without rows.
    EmptyPartition { n_rows: usize, test_fraction: f64 },
    /// The label column is not part of the dataset.
    MissingLabelColumn(String),
    /// A label cell holds something other than 0 or 1.
    InvalidLabel { row: usize, value: String },
    /// The configured prediction column would overwrite a dataset column.
    PredictionColumnClash(String),
    /// A table operation failed.
    Frame(FrameError),
    /// The training split holds no positive example to start generalizing from.
    NoPositiveExamples { n_train: usize },
    /// `fit` has not run yet.
    NotFitted,
    /// `predict` has not run yet.
    NotPredicted,
    /// A metric's denominator is zero.
    DegenerateMetric { metric: &'static str },
}

/// Coarse classification of [`LggError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad construction input: fraction, label column, dataset shape.
    Configuration,
    /// Not enough data to induce a hypothesis.
    InsufficientData,
    /// An operation was called out of order.
    Sequence,
    /// A metric is undefined for the current predictions.
    DegenerateMetric,
}

impl LggError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LggError::InvalidTestFraction(_)
            | LggError::EmptyPartition { .. }
            | LggError::MissingLabelColumn(_)
            | LggError::InvalidLabel { .. }
            | LggError::PredictionColumnClash(_)
            | LggError::Frame(_) => ErrorKind::Configuration,
            LggError::NoPositiveExamples { .. } => ErrorKind::InsufficientData,
            LggError::NotFitted | LggError::NotPredicted => ErrorKind::Sequence,
            LggError::DegenerateMetric { .. } => ErrorKind::DegenerateMetric,
        }
    }
}

impl Display for LggError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LggError::InvalidTestFraction(fraction) => {
                write!(f, "Test fraction must be in (0, 1), got {}", fraction)
            }
            LggError::EmptyPartition {
                n_rows,
                test_fraction,
            } => write!(
                f,
                "Cannot split {} rows with test fraction {} without an empty partition",
                n_rows, test_fraction
            ),
            LggError::MissingLabelColumn(name) => {
                write!(f, "Label column '{}' is not in the dataset", name)
            }
            LggError::InvalidLabel { row, value } => {
                write!(f, "Label in row {} must be 0 or 1, got '{}'", row, value)
            }
            LggError::PredictionColumnClash(name) => write!(
                f,
                "Prediction column '{}' would overwrite a dataset column",
                name
            ),
            LggError::Frame(e) => write!(f, "{}", e),
            LggError::NoPositiveExamples { n_train } => write!(
                f,
                "No positive examples among {} training rows, cannot induce a hypothesis",
                n_train
            ),
            LggError::NotFitted => write!(f, "The learner has not been fitted yet"),
            LggError::NotPredicted => write!(f, "No predictions yet, call predict first"),
            LggError::DegenerateMetric { metric } => {
                write!(f, "The {} is undefined: its denominator is zero", metric)
            }
        }
    }
}

impl Error for LggError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LggError::Frame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for LggError {
    fn from(e: FrameError) -> Self {
        LggError::Frame(e)
    }
}

impl From<SplitError> for LggError {
    fn from(e: SplitError) -> Self {
        match e {
            SplitError::InvalidFraction(fraction) => LggError::InvalidTestFraction(fraction),
            SplitError::EmptyPartition {
                n_rows,
                test_fraction,
            } => LggError::EmptyPartition {
                n_rows,
                test_fraction,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(LggError::InvalidTestFraction(1.5).kind(), ErrorKind::Configuration);
        assert_eq!(
            LggError::NoPositiveExamples { n_train: 3 }.kind(),
            ErrorKind::InsufficientData
        );
        assert_eq!(LggError::NotFitted.kind(), ErrorKind::Sequence);
        assert_eq!(LggError::NotPredicted.kind(), ErrorKind::Sequence);
        assert_eq!(
            LggError::DegenerateMetric { metric: "precision" }.kind(),
            ErrorKind::DegenerateMetric
        );
    }

    #[test]
    fn test_split_errors_convert() {
        let e: LggError = SplitError::InvalidFraction(0.0).into();
        assert_eq!(e, LggError::InvalidTestFraction(0.0));
        let e: LggError = FrameError::UnknownColumn("x".into()).into();
        assert!(e.source().is_some());
    }
}

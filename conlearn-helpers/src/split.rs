use log::info;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::{Category, Frame};

/// Errors that can occur when partitioning a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    /// The test fraction must lie strictly between 0 and 1.
    InvalidFraction(f64),
    /// The fraction leaves the train or the test partition without rows.
    EmptyPartition { n_rows: usize, test_fraction: f64 },
}

impl Display for SplitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::InvalidFraction(fraction) => {
                write!(f, "Test fraction must be in (0, 1), got {}", fraction)
            }
            SplitError::EmptyPartition {
                n_rows,
                test_fraction,
            } => write!(
                f,
                "Splitting {} rows with test fraction {} leaves an empty partition",
                n_rows, test_fraction
            ),
        }
    }
}

impl Error for SplitError {}

/// Randomly partitions `frame` into `(train, test)`.
///
/// The test partition receives `ceil(test_fraction * n)` rows, the train
/// partition the rest. Both come back in shuffled order.
///
/// # Arguments
///
/// * `frame`: The rows to partition.
/// * `test_fraction`: Share of rows held out for testing, strictly between 0 and 1.
/// * `seed`: `Some(seed)` for a reproducible split, `None` for a fresh random one.
///
/// # Errors
///
/// Returns `SplitError::InvalidFraction` for a fraction outside (0, 1) and
/// `SplitError::EmptyPartition` when either side would end up empty.
pub fn train_test_split<V>(
    frame: &Frame<V>,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(Frame<V>, Frame<V>), SplitError>
where
    V: Category,
{
    let (train_idx, test_idx) = split_indices(frame.n_rows(), test_fraction, seed)?;
    info!(
        "Split {} rows into {} train / {} test",
        frame.n_rows(),
        train_idx.len(),
        test_idx.len()
    );
    Ok((frame.select_rows(&train_idx), frame.select_rows(&test_idx)))
}

fn split_indices(
    n_rows: usize,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>), SplitError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction));
    }

    let n_test = (test_fraction * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition {
            n_rows,
            test_fraction,
        });
    }

    // Use a random seed when none was given
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let mut indices: Vec<usize> = (0..n_rows).collect();
    indices.shuffle(&mut rng);
    let train = indices.split_off(n_test);
    Ok((train, indices))
}

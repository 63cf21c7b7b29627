use num_traits::{One, Zero};

use std::fmt::{Debug, Display};
use std::hash::Hash;

// Include submodules
mod crosstab;
mod frame;
mod io;
mod split;

// Re-export types from submodules
pub use crosstab::CrossTab;
pub use frame::{Frame, FrameError};
pub use io::{read_csv, read_csv_from};
pub use split::{train_test_split, SplitError};

/// A discrete cell value of a [`Frame`].
///
/// Besides being comparable and printable, a category must be able to act as a
/// binary class label, so that the same value type can hold both attribute
/// values and the 0/1 class column.
pub trait Category: Clone + Eq + Hash + Ord + Debug + Display {
    /// Interprets the value as a binary label: `Some(false)` for 0,
    /// `Some(true)` for 1 and `None` for anything else.
    fn as_label(&self) -> Option<bool>;

    /// Builds the value representing the given binary label.
    fn from_label(label: bool) -> Self;
}

macro_rules! impl_category_for_int {
    ($($t:ty),*) => {
        $(
            impl Category for $t {
                fn as_label(&self) -> Option<bool> {
                    if self.is_zero() {
                        Some(false)
                    } else if self.is_one() {
                        Some(true)
                    } else {
                        None
                    }
                }

                fn from_label(label: bool) -> Self {
                    if label { <$t>::one() } else { <$t>::zero() }
                }
            }
        )*
    };
}

impl_category_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Category for bool {
    fn as_label(&self) -> Option<bool> {
        Some(*self)
    }

    fn from_label(label: bool) -> Self {
        label
    }
}

/// Strings are labels only when they read "0" or "1" (surrounding whitespace ignored).
impl Category for String {
    fn as_label(&self) -> Option<bool> {
        match self.trim() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }
    }

    fn from_label(label: bool) -> Self {
        if label { "1".to_string() } else { "0".to_string() }
    }
}

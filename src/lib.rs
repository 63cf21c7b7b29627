//! Conjunctive concept learning over categorical tables.
//!
//! Re-exports the table helpers (`Frame`, splitting, cross-tabulation, CSV
//! loading) and the LGG learner so applications only need this one crate.

// Re-export types from the workspace crates
pub use conlearn_helpers::{
    read_csv, read_csv_from, train_test_split, Category, CrossTab, Frame, FrameError, SplitError,
};
pub use lgg::{
    lgg_conjunction, lgg_set, ConceptLearner, ConfusionMatrix, Conjunction, ErrorKind,
    LearnerConfig, LggError, Literal,
};

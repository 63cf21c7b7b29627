use conlearn_helpers::CrossTab;
use std::fmt::{Display, Formatter};

use crate::LggError;

/// 2×2 counts of actual vs. predicted binary labels.
///
/// Every ratio returns `LggError::DegenerateMetric` instead of a value when its
/// denominator is zero, which happens when the test split lacks one of the
/// classes (or the hypothesis never fires).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Reads the four cells out of a label cross-tabulation by value.
    ///
    /// Cells for a class missing from the table count as zero.
    pub fn from_crosstab(table: &CrossTab<bool>) -> Self {
        Self {
            tp: table.count(&true, &true),
            tn: table.count(&false, &false),
            fp: table.count(&false, &true),
            fn_: table.count(&true, &false),
        }
    }

    pub fn from_labels(actual: &[bool], predicted: &[bool]) -> Result<Self, LggError> {
        Ok(Self::from_crosstab(&CrossTab::new(actual, predicted)?))
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// (TP + TN) / total
    pub fn accuracy(&self) -> Result<f64, LggError> {
        ratio("accuracy", self.tp + self.tn, self.total())
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> Result<f64, LggError> {
        ratio("precision", self.tp, self.tp + self.fp)
    }

    /// TP / (TP + FN), also known as recall or true positive rate.
    pub fn sensitivity(&self) -> Result<f64, LggError> {
        ratio("sensitivity", self.tp, self.tp + self.fn_)
    }

    /// Specificity approximated as `1 - sensitivity`.
    ///
    /// This equals TN / (TN + FP) only by coincidence. Use
    /// [`ConfusionMatrix::true_negative_rate`] for the standard quantity.
    pub fn specificity(&self) -> Result<f64, LggError> {
        Ok(1.0 - self.sensitivity()?)
    }

    /// TN / (TN + FP)
    pub fn true_negative_rate(&self) -> Result<f64, LggError> {
        ratio("true negative rate", self.tn, self.tn + self.fp)
    }

    pub fn f1_score(&self) -> Result<f64, LggError> {
        ratio("f1 score", 2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

impl Display for ConfusionMatrix {
    /// Renders the matrix with 0/1 row and column headers, actual labels on the rows.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Actual \\ Predicted\t0\t1")?;
        writeln!(f, "0\t{}\t{}", self.tn, self.fp)?;
        writeln!(f, "1\t{}\t{}", self.fn_, self.tp)
    }
}

fn ratio(metric: &'static str, numerator: usize, denominator: usize) -> Result<f64, LggError> {
    if denominator == 0 {
        return Err(LggError::DegenerateMetric { metric });
    }
    Ok(numerator as f64 / denominator as f64)
}

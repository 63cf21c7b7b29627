use conlearn_helpers::{train_test_split, Category, CrossTab, Frame};
use log::{info, warn};
use ndarray::ArrayView1;

use crate::{lgg_set, Conjunction, ConfusionMatrix, LggError};

/// Settings for a [`ConceptLearner`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct LearnerConfig {
    /// Share of rows held out for testing, strictly between 0 and 1.
    pub test_fraction: f64,
    /// `Some(seed)` makes the train/test split reproducible.
    pub seed: Option<u64>,
    /// Name of the column predictions are written to in the test frame.
    pub prediction_column: String,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: None,
            prediction_column: "predicted".to_string(),
        }
    }
}

impl LearnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_prediction_column<S: Into<String>>(mut self, name: S) -> Self {
        self.prediction_column = name.into();
        self
    }
}

/// Learns a conjunctive description of the positive class of a binary-labeled table.
///
/// The dataset is split into train and test partitions once, at construction.
/// [`fit`](ConceptLearner::fit) induces the hypothesis from the positive training
/// rows, [`predict`](ConceptLearner::predict) writes a 0/1 prediction column into
/// the test partition, and the metric accessors compare it with the label column.
///
/// # Type Parameters
///
/// * `V`: The cell type of the table, shared by attributes and the label column.
#[derive(Debug, Clone)]
pub struct ConceptLearner<V>
where
    V: Category,
{
    label_column: String,
    config: LearnerConfig,
    train: Frame<V>,
    test: Frame<V>,
    hypothesis: Option<Conjunction<V>>,
}

impl<V> ConceptLearner<V>
where
    V: Category,
{
    /// Creates a learner with the default configuration (20% test split, unseeded).
    pub fn new(dataset: Frame<V>, label_column: &str) -> Result<Self, LggError> {
        Self::with_config(dataset, label_column, LearnerConfig::default())
    }

    /// Validates the dataset and splits it into train and test partitions.
    ///
    /// # Errors
    ///
    /// Returns `LggError::MissingLabelColumn` if `label_column` is absent,
    /// `LggError::InvalidLabel` for a label other than 0/1,
    /// `LggError::PredictionColumnClash` if the prediction column already exists,
    /// and `LggError::InvalidTestFraction` / `LggError::EmptyPartition` when the
    /// split cannot be made.
    pub fn with_config(
        dataset: Frame<V>,
        label_column: &str,
        config: LearnerConfig,
    ) -> Result<Self, LggError> {
        if !dataset.has_column(label_column) {
            return Err(LggError::MissingLabelColumn(label_column.to_string()));
        }
        if dataset.has_column(&config.prediction_column) {
            return Err(LggError::PredictionColumnClash(config.prediction_column));
        }
        for (row, value) in dataset.column(label_column)?.iter().enumerate() {
            if value.as_label().is_none() {
                return Err(LggError::InvalidLabel {
                    row,
                    value: value.to_string(),
                });
            }
        }

        let (train, test) = train_test_split(&dataset, config.test_fraction, config.seed)?;

        Ok(Self {
            label_column: label_column.to_string(),
            config,
            train,
            test,
            hypothesis: None,
        })
    }

    /// Induces the hypothesis from the positive training examples.
    ///
    /// # Errors
    ///
    /// Returns `LggError::NoPositiveExamples` if the training split has no row
    /// labeled 1. A previously induced hypothesis is kept in that case.
    pub fn fit(&mut self) -> Result<&Conjunction<V>, LggError> {
        let positives = self
            .train
            .filter_rows(&self.label_column, |v| v.as_label() == Some(true))?
            .drop_column(&self.label_column)?;

        let examples = positives
            .records()
            .map(|record| record.into_iter().collect::<Conjunction<V>>());
        let hypothesis = lgg_set(examples).ok_or(LggError::NoPositiveExamples {
            n_train: self.train.n_rows(),
        })?;

        if hypothesis.is_empty() {
            warn!(
                "All attributes were generalized away, every example will be predicted positive"
            );
        }
        info!(
            "Induced {} from {} positive training examples",
            hypothesis,
            positives.n_rows()
        );
        Ok(self.hypothesis.insert(hypothesis))
    }

    /// Writes predictions for every test row into the prediction column.
    ///
    /// A row is predicted 1 when it matches every literal of the hypothesis, 0
    /// otherwise. Calling this again recomputes the column from scratch.
    ///
    /// # Errors
    ///
    /// Returns `LggError::NotFitted` before [`fit`](ConceptLearner::fit) has succeeded.
    pub fn predict(&mut self) -> Result<ArrayView1<'_, V>, LggError> {
        let hypothesis = self.hypothesis.as_ref().ok_or(LggError::NotFitted)?;

        let matches = self.test.rows_matching(hypothesis.pairs())?;
        let n_positive = matches.iter().filter(|&&m| m).count();
        let predictions: Vec<V> = matches.into_iter().map(V::from_label).collect();

        self.test
            .set_column(&self.config.prediction_column, predictions)?;
        info!(
            "Predicted {} of {} test examples positive",
            n_positive,
            self.test.n_rows()
        );
        self.predictions()
    }

    /// Classifies a single example given as `(attribute, value)` pairs.
    pub fn classify<'a, I>(&self, example: I) -> Result<bool, LggError>
    where
        I: IntoIterator<Item = (&'a str, &'a V)>,
        V: 'a,
    {
        let hypothesis = self.hypothesis.as_ref().ok_or(LggError::NotFitted)?;
        let example: Conjunction<V> = example.into_iter().collect();
        Ok(hypothesis.covers(&example))
    }

    pub fn is_fitted(&self) -> bool {
        self.hypothesis.is_some()
    }

    pub fn is_predicted(&self) -> bool {
        self.test.has_column(&self.config.prediction_column)
    }

    /// The induced hypothesis.
    pub fn hypothesis(&self) -> Result<&Conjunction<V>, LggError> {
        self.hypothesis.as_ref().ok_or(LggError::NotFitted)
    }

    /// The hypothesis as `attr1 = val1 ∧ attr2 = val2`.
    pub fn rule_string(&self) -> Result<String, LggError> {
        Ok(self.hypothesis()?.to_string())
    }

    /// The current prediction column of the test partition.
    pub fn predictions(&self) -> Result<ArrayView1<'_, V>, LggError> {
        if !self.is_fitted() {
            return Err(LggError::NotFitted);
        }
        if !self.is_predicted() {
            return Err(LggError::NotPredicted);
        }
        Ok(self.test.column(&self.config.prediction_column)?)
    }

    /// The test partition, including the prediction column once `predict` ran.
    pub fn test_frame(&self) -> &Frame<V> {
        &self.test
    }

    pub fn train_frame(&self) -> &Frame<V> {
        &self.train
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Actual vs. predicted label counts on the test partition.
    pub fn crosstab(&self) -> Result<CrossTab<bool>, LggError> {
        let predicted = self.predictions()?;
        let actual = self.test.column(&self.label_column)?;
        // Labels were validated at construction, predictions come from `from_label`
        let actual: Vec<bool> = actual.iter().map(|v| v.as_label() == Some(true)).collect();
        let predicted: Vec<bool> = predicted
            .iter()
            .map(|v| v.as_label() == Some(true))
            .collect();
        Ok(CrossTab::new(&actual, &predicted)?)
    }

    pub fn confusion_matrix(&self) -> Result<ConfusionMatrix, LggError> {
        Ok(ConfusionMatrix::from_crosstab(&self.crosstab()?))
    }

    pub fn accuracy(&self) -> Result<f64, LggError> {
        self.confusion_matrix()?.accuracy()
    }

    pub fn precision(&self) -> Result<f64, LggError> {
        self.confusion_matrix()?.precision()
    }

    pub fn sensitivity(&self) -> Result<f64, LggError> {
        self.confusion_matrix()?.sensitivity()
    }

    /// Same as [`sensitivity`](ConceptLearner::sensitivity).
    pub fn recall(&self) -> Result<f64, LggError> {
        self.sensitivity()
    }

    /// Same as [`sensitivity`](ConceptLearner::sensitivity).
    pub fn true_positive_rate(&self) -> Result<f64, LggError> {
        self.sensitivity()
    }

    /// `1 - sensitivity`. See [`ConfusionMatrix::specificity`].
    pub fn specificity(&self) -> Result<f64, LggError> {
        self.confusion_matrix()?.specificity()
    }

    /// TN / (TN + FP).
    pub fn true_negative_rate(&self) -> Result<f64, LggError> {
        self.confusion_matrix()?.true_negative_rate()
    }
}

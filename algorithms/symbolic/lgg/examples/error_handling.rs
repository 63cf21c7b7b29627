//! Example demonstrating error handling with the LGG concept learner.
//!
//! Walks through the configuration, data and sequencing errors a caller can
//! run into, then a successful fit/predict/evaluate round.

use conlearn_helpers::Frame;
use lgg::{ConceptLearner, LearnerConfig, LggError};

fn mailbox() -> Frame<u8> {
    Frame::from_rows(
        ["has_link", "has_attachment", "is_spam"],
        vec![
            vec![1, 0, 1],
            vec![1, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 1],
            vec![0, 1, 0],
            vec![0, 0, 0],
            vec![0, 1, 0],
            vec![0, 0, 0],
            vec![1, 0, 1],
            vec![0, 0, 0],
        ],
    )
    .expect("rows match the header")
}

fn main() {
    println!("LGG Concept Learner Error Handling Examples");
    println!("===========================================");

    // Example 1: Invalid test fraction
    println!("\n1. Handling an invalid test fraction (1.5):");
    let config = LearnerConfig::new().with_test_fraction(1.5);
    match ConceptLearner::with_config(mailbox(), "is_spam", config) {
        Ok(_) => println!("   Learner created successfully"),
        Err(e @ LggError::InvalidTestFraction(_)) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Missing label column
    println!("\n2. Handling a missing label column:");
    match ConceptLearner::new(mailbox(), "label") {
        Ok(_) => println!("   Learner created successfully"),
        Err(e @ LggError::MissingLabelColumn(_)) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: Predicting before fitting
    println!("\n3. Handling predict before fit:");
    match ConceptLearner::new(mailbox(), "is_spam") {
        Ok(mut learner) => match learner.predict() {
            Ok(_) => println!("   Predictions written"),
            Err(LggError::NotFitted) => {
                println!("   ✓ Caught expected error: {}", LggError::NotFitted)
            }
            Err(e) => println!("   ✗ Unexpected error: {}", e),
        },
        Err(e) => println!("   ✗ Failed to create learner: {}", e),
    }

    // Example 4: No positive examples
    println!("\n4. Handling a training split without spam:");
    let ham_only = Frame::from_rows(
        ["has_link", "has_attachment", "is_spam"],
        vec![vec![0u8, 1, 0], vec![1, 0, 0], vec![0, 0, 0], vec![1, 1, 0], vec![0, 0, 0]],
    )
    .expect("rows match the header");
    match ConceptLearner::new(ham_only, "is_spam") {
        Ok(mut learner) => match learner.fit() {
            Ok(h) => println!("   Induced {}", h),
            Err(e @ LggError::NoPositiveExamples { .. }) => {
                println!("   ✓ Caught expected error: {}", e)
            }
            Err(e) => println!("   ✗ Unexpected error: {}", e),
        },
        Err(e) => println!("   ✗ Failed to create learner: {}", e),
    }

    // Example 5: Error propagation in a function
    println!("\n5. Error propagation in functions:");

    fn learn_and_evaluate() -> Result<(String, f64), LggError> {
        let config = LearnerConfig::new().with_test_fraction(0.3).with_seed(42);
        let mut learner = ConceptLearner::with_config(mailbox(), "is_spam", config)?;
        learner.fit()?;
        learner.predict()?;
        Ok((learner.rule_string()?, learner.accuracy()?))
    }

    match learn_and_evaluate() {
        Ok((rule, accuracy)) => {
            println!("   ✓ Learned rule: {}", rule);
            println!("   ✓ Test accuracy: {:.2}", accuracy)
        }
        Err(e) => println!("   ✗ Learning failed: {}", e),
    }

    println!("\n6. Error kinds and their meanings:");
    println!("   - Configuration: bad test fraction, label column or dataset");
    println!("   - InsufficientData: no positive example to start generalizing from");
    println!("   - Sequence: predict or a metric was called before fit/predict");
    println!("   - DegenerateMetric: a metric's denominator is zero for this test split");

    println!("\nAll examples completed successfully!");
}

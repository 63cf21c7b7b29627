//! Benchmarks for LGG induction and prediction.

use std::hint::black_box;

use conlearn_helpers::Frame;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lgg::{ConceptLearner, Conjunction, LearnerConfig, lgg_set};

/// `n_rows` examples over `n_features` attributes; the first attribute decides the label.
fn mailbox(n_rows: usize, n_features: usize) -> Frame<u8> {
    let mut columns: Vec<String> = (0..n_features).map(|j| format!("x{j}")).collect();
    columns.push("label".to_string());

    let rows = (0..n_rows)
        .map(|i| {
            let mut row: Vec<u8> = (0..n_features).map(|j| ((i * (j + 1)) % 3) as u8).collect();
            let label = (row[0] == 0) as u8;
            row.push(label);
            row
        })
        .collect();
    Frame::from_rows(columns, rows).unwrap()
}

fn bench_lgg_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("lgg_set");

    for n_examples in [100, 1_000, 10_000] {
        let frame = mailbox(n_examples, 32).drop_column("label").unwrap();
        let examples: Vec<Conjunction<u8>> = frame
            .records()
            .map(|record| record.into_iter().collect())
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(n_examples),
            &examples,
            |b, examples| {
                b.iter(|| black_box(lgg_set(black_box(examples.clone()))));
            },
        );
    }

    group.finish();
}

fn bench_fit_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_predict");

    for n_rows in [1_000, 10_000] {
        let config = LearnerConfig::new().with_seed(7);
        let learner = ConceptLearner::with_config(mailbox(n_rows, 32), "label", config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &learner, |b, learner| {
            b.iter(|| {
                let mut learner = learner.clone();
                learner.fit().unwrap();
                let n_predicted = learner.predict().unwrap().len();
                black_box(n_predicted)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lgg_set, bench_fit_predict);
criterion_main!(benches);

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use conlearn::{read_csv, ConceptLearner, ErrorKind, LearnerConfig, LggError};

fn cli() -> Command {
    Command::new("conlearn")
        .version(clap::crate_version!())
        .about("Learn a conjunctive rule for the positive class of a labeled CSV table")
        .arg(
            Arg::new("data")
                .help("Path to the dataset (*.csv, or *.tsv for tab separated)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("label")
                .short('l')
                .long("label")
                .help("Name of the 0/1 class column")
                .required(true)
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("test_size")
                .short('t')
                .long("test-size")
                .help("Share of rows held out for testing, strictly between 0 and 1")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.2"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for a reproducible train/test split")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("prediction_column")
                .long("prediction-column")
                .help("Name of the column predictions are written to")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .default_value("predicted"),
        )
        .arg(
            Arg::new("show_test")
                .long("show-test")
                .help("Print the test partition including predictions")
                .action(ArgAction::SetTrue),
        )
}

fn learner_config(matches: &ArgMatches) -> LearnerConfig {
    let mut config = LearnerConfig::new();
    if let Some(&test_size) = matches.get_one::<f64>("test_size") {
        config = config.with_test_fraction(test_size);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    if let Some(name) = matches.get_one::<String>("prediction_column") {
        config = config.with_prediction_column(name.as_str());
    }
    config
}

/// Prints a metric, or "undefined" when the test split makes it degenerate.
fn print_metric(name: &str, value: Result<f64, LggError>) -> Result<()> {
    match value {
        Ok(v) => println!("{:<20}{:.4}", name, v),
        Err(e) if e.kind() == ErrorKind::DegenerateMetric => {
            println!("{:<20}undefined ({})", name, e)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CONLEARN_LOG", "error,conlearn=info,lgg=info"))
        .init();

    let matches = cli().get_matches();

    let data = matches
        .get_one::<PathBuf>("data")
        .context("No dataset given")?;
    let label = matches
        .get_one::<String>("label")
        .context("No label column given")?;

    let frame = read_csv(data).with_context(|| format!("Failed to load dataset: {:?}", data))?;
    log::info!("Loaded {} rows x {} columns", frame.n_rows(), frame.n_cols());

    let mut learner = ConceptLearner::with_config(frame, label, learner_config(&matches))?;
    learner.fit().context("Failed to induce a hypothesis")?;
    learner.predict()?;

    println!("Rule: {}", learner.rule_string()?);
    println!();
    print!("{}", learner.confusion_matrix()?);
    println!();
    print_metric("Accuracy", learner.accuracy())?;
    print_metric("Precision", learner.precision())?;
    print_metric("Sensitivity", learner.sensitivity())?;
    print_metric("Specificity", learner.specificity())?;
    print_metric("True negative rate", learner.true_negative_rate())?;

    if matches.get_flag("show_test") {
        println!();
        print!("{}", learner.test_frame());
    }
    Ok(())
}

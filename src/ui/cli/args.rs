use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueHint};

use crate::evaluation::ReportFormat;
use crate::streams::csv::TargetColumn;
use crate::tasks::TrainEvaluateParams;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Train and evaluate an entropy-based decision tree on categorical CSV data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a tree on a training file and evaluate it on a test file or holdout
    Run(RunArgs),
    /// Label the rows of a CSV file with a previously dumped model
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON file with run parameters; command line flags take precedence
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub params_file: Option<PathBuf>,

    /// Headered CSV file to train on
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub train: Option<PathBuf>,

    /// Headered CSV file to evaluate on (omit to hold out part of the training file)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub test: Option<PathBuf>,

    /// Fraction of training rows held out when no test file is given
    #[arg(long, value_name = "FRACTION")]
    pub holdout: Option<f64>,

    /// Seed for the holdout shuffle
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Column holding the class label: first, last or a zero-based index
    #[arg(long, value_name = "COLUMN")]
    pub target_column: Option<TargetColumn>,

    /// Label treated as positive for precision, recall and F-score
    #[arg(long, value_name = "LABEL")]
    pub positive_label: Option<String>,

    /// Override the derived maximum depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Override the derived minimum sample count for a split
    #[arg(long, value_name = "N")]
    pub min_samples: Option<usize>,

    /// Override the derived minimum entropy decrease for a split
    #[arg(long, value_name = "BITS")]
    pub min_entropy_decrease: Option<f64>,

    /// Print the fitted tree
    #[arg(long)]
    pub print_tree: bool,

    /// Print the information gain of every feature on the training set
    #[arg(long)]
    pub show_gains: bool,

    /// Write the fitted model as JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub dump_model: Option<PathBuf>,

    /// Write the evaluation report to this file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub report_file: Option<PathBuf>,

    /// Format for the report file (csv, tsv, json)
    #[arg(long, default_value_t = ReportFormat::Csv, value_name = "FORMAT")]
    pub report_format: ReportFormat,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Model written by `run --dump-model`
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// Headered CSV file whose columns are the training features, in order
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write one label per line here instead of stdout
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    pub fn into_params(self) -> Result<TrainEvaluateParams> {
        let mut params = match &self.params_file {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str::<TrainEvaluateParams>(&raw)
                    .with_context(|| format!("invalid parameters in {}", path.display()))?
            }
            None => TrainEvaluateParams::default(),
        };

        if let Some(train) = self.train {
            params.train_file = train;
        }
        if self.test.is_some() {
            params.test_file = self.test;
        }
        if let Some(fraction) = self.holdout {
            params.holdout_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(target) = self.target_column {
            params.target_column = target;
        }
        if self.positive_label.is_some() {
            params.positive_label = self.positive_label;
        }
        if self.max_depth.is_some() {
            params.pruning.max_depth_allowed = self.max_depth;
        }
        if self.min_samples.is_some() {
            params.pruning.min_samples_allowed = self.min_samples;
        }
        if self.min_entropy_decrease.is_some() {
            params.pruning.min_entropy_decrease_allowed = self.min_entropy_decrease;
        }

        anyhow::ensure!(
            !params.train_file.as_os_str().is_empty(),
            "a training file is required (--train or train_file in --params-file)"
        );
        Ok(params)
    }
}

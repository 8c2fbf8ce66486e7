use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use idtree::classifiers::Classifier;
use idtree::classifiers::decision_tree::{DecisionTree, TreePrinter};
use idtree::evaluation::ClassificationReport;
use idtree::streams::csv::read_table_from_path;
use idtree::tasks::{TrainEvaluateOutcome, TrainEvaluateTask};
use idtree::ui::cli::args::{Cli, Command, PredictArgs, RunArgs};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Predict(args) => predict(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let print_tree = args.print_tree;
    let show_gains = args.show_gains;
    let dump_model = args.dump_model.clone();
    let report_file = args.report_file.clone();
    let report_format = args.report_format;

    let params = args.into_params().context("invalid run arguments")?;
    let task = TrainEvaluateTask::new(params).context("failed to construct task")?;

    println!("{BOLD}{FG_CYAN}▶ Decision Tree{RESET}  {}", timestamp_now());
    println!(
        "{DIM}train={}  test={}  target={}{RESET}",
        task.params().train_file.display(),
        task.params()
            .test_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("holdout {:.2}", task.params().holdout_fraction)),
        task.params().target_column,
    );
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );

    let outcome = task.run().context("task failed")?;

    print_summary(&outcome);

    if show_gains {
        println!("\n{BOLD}Information gain{RESET}");
        for (name, gain) in outcome.feature_gains() {
            println!("  {name:<24} {gain:.4}");
        }
    }

    if print_tree {
        println!("\n{BOLD}Tree{RESET}");
        print!("{}", TreePrinter::new(&outcome.tree));
    }

    print_report(&outcome.evaluation.report);

    if let Some(path) = dump_model.filter(|p| !p.as_os_str().is_empty()) {
        fs::write(&path, outcome.tree.to_json()?)
            .with_context(|| format!("failed to write model to {}", path.display()))?;
        println!("{DIM}model written to {}{RESET}", path.display());
    }

    if let Some(path) = report_file.filter(|p| !p.as_os_str().is_empty()) {
        outcome
            .evaluation
            .report
            .export(&path, report_format)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        println!("{DIM}report written to {}{RESET}", path.display());
    }

    Ok(())
}

fn predict(args: PredictArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.model)
        .with_context(|| format!("failed to read model {}", args.model.display()))?;
    let tree = DecisionTree::from_json(&raw).context("failed to load model")?;

    let (header, rows) = read_table_from_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if tree.feature_names().is_some_and(|names| names != header.as_slice()) {
        eprintln!("warning: input header does not match the model's feature names");
    }

    let labels = tree.predict(&rows).context("prediction failed")?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    for label in labels {
        writeln!(out, "{label}")?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(outcome: &TrainEvaluateOutcome) {
    let eval = &outcome.evaluation;
    println!(
        "{FG_GREEN}{BOLD}train{RESET} {:>7}  {FG_GREEN}{BOLD}test{RESET} {:>7}  {DIM}features{RESET} {}",
        outcome.train.len(),
        outcome.test.len(),
        outcome.train.feature_names.len()
    );

    if let (Some(root), Some(cfg)) = (outcome.tree.root(), outcome.tree.pruning_config()) {
        println!(
            "{DIM}nodes{RESET} {}  {DIM}leaves{RESET} {}  {DIM}depth{RESET} {}  \
             {DIM}min_samples{RESET} {}  {DIM}max_depth{RESET} {}  {DIM}min_entropy_decrease{RESET} {:.6}",
            root.number_of_nodes(),
            root.number_of_leaves(),
            root.depth(),
            cfg.min_samples_allowed(),
            cfg.max_depth_allowed(),
            cfg.min_entropy_decrease_allowed()
        );
    }
    println!(
        "{DIM}fit{RESET} {:.6}s  {DIM}predict{RESET} {:.6}s",
        eval.fit_seconds, eval.predict_seconds
    );
}

fn print_report(report: &ClassificationReport) {
    println!(
        "\n{BOLD}{FG_MAGENTA}Model performance{RESET} {DIM}(positive = {}){RESET}",
        report.positive_label
    );
    println!("  accuracy   {}", pct(report.accuracy));
    println!("  precision  {}", pct(report.precision));
    println!("  recall     {}", pct(report.recall));
    println!("  f-score    {}", pct(report.f_score));
}

fn pct(x: f64) -> String {
    if x.is_nan() {
        format!("{DIM}NaN{RESET}")
    } else {
        format!("{:>6.2}%", x * 100.0)
    }
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use motionrisk_core::config::{load_dotenv, Config};
use motionrisk_rules::evaluator::{RuleEvaluator, Subject};
use motionrisk_rules::loader::{LoadResult, LoadStatus, RuleLoader};
use motionrisk_rules::report::RiskReport;
use motionrisk_rules::signals::MotionData;
use motionrisk_rules::validation::{validate_document, ValidationResult};

use crate::cli::{AnalyzeArgs, CliArgs, Command, RulesDirArg};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();

    let outcome = match args.command {
        Command::Analyze(analyze) => run_analyze(analyze, config),
        Command::Validate(dir) => run_validate(dir, config),
        Command::Rules(dir) => run_rules(dir, config),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ── Rule loading ────────────────────────────────────────────────────

/// Load the rules directory, falling back to the built-in table when it
/// holds no threshold rules.
fn load_rules(rules_dir: &Path) -> Result<(RuleLoader, Vec<LoadResult>)> {
    let mut loader = RuleLoader::new(rules_dir.to_path_buf());
    let results = loader
        .load_with_fallback()
        .with_context(|| format!("failed to scan rules directory {}", rules_dir.display()))?;
    Ok((loader, results))
}

// ── analyze ─────────────────────────────────────────────────────────

fn run_analyze(args: AnalyzeArgs, mut config: Config) -> Result<ExitCode> {
    if let Some(dir) = args.rules.rules_dir {
        config.rules_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(kg) = args.body_weight {
        config.body_weight_kg = kg;
    }
    if let Some(format) = args.format {
        config.report_format = format;
    }
    if !(config.body_weight_kg.is_finite() && config.body_weight_kg > 0.0) {
        bail!("body weight must be a positive number of kg, got {}", config.body_weight_kg);
    }
    config.log_summary();

    let data = MotionData::load(
        Some(&args.ik),
        args.inverse_dynamics.as_deref(),
        args.so_activation.as_deref(),
        args.so_force.as_deref(),
    )
    .context("failed to read motion data")?;

    let (loader, _) = load_rules(&config.rules_dir)?;
    let scoring = loader.scoring_config();
    let subject = Subject {
        body_weight_kg: config.body_weight_kg,
    };

    let assessment = RuleEvaluator::evaluate_all(loader.threshold_rules(), &data, &subject, &scoring)
        .context("rule evaluation failed")?;

    let report = RiskReport::new(assessment, config.body_weight_kg, data.duration());
    let written = report
        .write(&config.output_dir, config.report_format)
        .with_context(|| format!("failed to write report to {}", config.output_dir.display()))?;

    println!(
        "Overall risk: {} ({} findings)",
        report.overall_risk_assessment, report.risk_summary.risk_count
    );
    println!("{}", report.risk_summary.text);
    for path in written {
        println!("Report written to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

// ── validate ────────────────────────────────────────────────────────

fn run_validate(args: RulesDirArg, config: Config) -> Result<ExitCode> {
    let rules_dir = args.rules_dir.unwrap_or(config.rules_dir);
    let (loader, results) = load_rules(&rules_dir)?;

    let mut failed = 0usize;
    for result in &results {
        if let LoadStatus::Failed { error } = &result.status {
            failed += 1;
            println!("FAIL  {}: {}", result.path.display(), error);
        }
    }

    let mut invalid = 0usize;
    let mut warnings = 0usize;
    for (id, doc) in loader.documents() {
        let validation = validate_document(doc);
        warnings += validation.warnings.len();
        if !validation.valid {
            invalid += 1;
        }
        print_validation(id, &validation);
    }

    println!(
        "{} rules loaded, {} failed to load, {} invalid, {} warnings",
        loader.len(),
        failed,
        invalid,
        warnings
    );

    Ok(if failed == 0 && invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_validation(id: &str, result: &ValidationResult) {
    let status = if result.valid { "ok  " } else { "ERR " };
    println!("{status}  {id}");
    for e in &result.errors {
        println!("      error   {}: {}", e.path, e.message);
    }
    for w in &result.warnings {
        match &w.suggestion {
            Some(s) => println!("      warning {}: {} ({})", w.path, w.message, s),
            None => println!("      warning {}: {}", w.path, w.message),
        }
    }
}

// ── rules ───────────────────────────────────────────────────────────

fn run_rules(args: RulesDirArg, config: Config) -> Result<ExitCode> {
    let rules_dir = args.rules_dir.unwrap_or(config.rules_dir);
    let (loader, _) = load_rules(&rules_dir)?;

    for rule in loader.threshold_rules() {
        let spec = &rule.spec;
        let window = spec
            .window
            .as_ref()
            .map(|w| format!(" [{:.2}-{:.2}]", w.start, w.end))
            .unwrap_or_default();
        println!(
            "{:<34} {:<18} {} {} {}{}",
            rule.metadata.id,
            spec.category.to_string(),
            spec.condition.operator.symbol(),
            spec.condition.threshold,
            spec.condition.unit,
            window
        );
    }

    let scoring = loader.scoring_config();
    println!(
        "scoring: high when count > {} or duration > {}s; moderate when count > {} or duration > {}s",
        scoring.high.count, scoring.high.duration, scoring.moderate.count, scoring.moderate.duration
    );
    info!(rules = loader.threshold_rules().count(), "listed rules");
    Ok(ExitCode::SUCCESS)
}

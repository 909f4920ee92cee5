use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use motionrisk_core::ReportFormat;

/// Injury-risk screening over musculoskeletal simulation output.
///
/// Reads inverse kinematics, inverse dynamics and static optimization
/// storage files, evaluates the threshold rules and writes a risk report.
#[derive(Parser, Debug)]
#[command(name = "motionrisk", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate all enabled rules against one motion and write the report.
    Analyze(AnalyzeArgs),
    /// Load and validate every rule file; exits non-zero on errors.
    Validate(RulesDirArg),
    /// List the enabled threshold rules.
    Rules(RulesDirArg),
}

#[derive(Args, Debug)]
pub struct RulesDirArg {
    /// Directory of rule YAML files. Built-in rules are used when it holds none.
    #[arg(long, env = "MOTIONRISK_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Inverse kinematics motion file (.mot).
    #[arg(long)]
    pub ik: PathBuf,

    /// Inverse dynamics generalized forces (.sto).
    #[arg(long)]
    pub inverse_dynamics: Option<PathBuf>,

    /// Static optimization activations (.sto).
    #[arg(long)]
    pub so_activation: Option<PathBuf>,

    /// Static optimization muscle forces (.sto).
    #[arg(long)]
    pub so_force: Option<PathBuf>,

    /// Subject body mass in kg.
    #[arg(long, env = "MOTIONRISK_BODY_WEIGHT_KG")]
    pub body_weight: Option<f64>,

    #[command(flatten)]
    pub rules: RulesDirArg,

    /// Directory the report files are written to.
    #[arg(long, env = "MOTIONRISK_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report format: json, text or both.
    #[arg(long, env = "MOTIONRISK_REPORT_FORMAT")]
    pub format: Option<ReportFormat>,
}

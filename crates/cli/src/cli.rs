use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Compliance checker for NetBox inventory.
///
/// Loads declarative rules from a YAML file, fetches every device (with its
/// interfaces) from NetBox and reports pass/fail per device and rule.
/// Connection settings come from the environment (`NETBOX_URL`,
/// `NETBOX_TOKEN`, ...) or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "netcheck", version, about = "Compliance checker for NetBox inventory")]
pub struct CliArgs {
    /// Settings profile: keys are read as {PROFILE}_{KEY} before {KEY}
    #[arg(long, env = "NETCHECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch devices from NetBox and evaluate every rule against them
    Check(CheckArgs),
    /// Load and validate the rule file without contacting NetBox
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule file (default: $NETCHECK_RULES or compliance-rules.yaml)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// NetBox base URL (overrides $NETBOX_URL)
    #[arg(long)]
    pub netbox_url: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Only print failed checks (the summary still counts everything)
    #[arg(long)]
    pub only_failures: bool,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    pub fail_on_violation: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rule file (default: $NETCHECK_RULES or compliance-rules.yaml)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Exit with status 1 when validation produced warnings
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

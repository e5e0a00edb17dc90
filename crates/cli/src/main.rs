mod cli;
mod report;
mod run;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use netcheck_core::config::{load_dotenv, Config};
use netcheck_inventory::NetboxClient;
use tracing::info;

use crate::cli::{CheckArgs, CliArgs, Command, ReportFormat, ValidateArgs};
use crate::run::{load_rules, run_check};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    load_dotenv();
    let args = CliArgs::parse();

    // Initialize tracing (stderr, so reports on stdout stay clean)
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.profile {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };

    match args.command {
        Command::Check(check) => check_command(config, check).await,
        Command::Validate(validate) => validate_command(config, validate),
    }
}

async fn check_command(mut config: Config, args: CheckArgs) -> Result<ExitCode> {
    if let Some(url) = args.netbox_url {
        config.netbox.url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(path) = args.rules {
        config.rules.path = path;
    }
    config.log_summary();

    let (rule_set, _warnings) = load_rules(&config.rules.path)?;

    let client = NetboxClient::new(&config.netbox).context("failed to create NetBox client")?;
    let outcome = run_check(&client, &rule_set)
        .await
        .context("failed to fetch NetBox devices")?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        ReportFormat::Text => report::render_text(&mut stdout, &outcome, args.only_failures)?,
        ReportFormat::Json => {
            report::render_json(&mut stdout, &outcome, args.only_failures, chrono::Utc::now())?
        }
    }
    stdout.flush()?;

    if args.fail_on_violation && !outcome.summary.all_compliant() {
        info!(failed = outcome.summary.failed, "violations found");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn validate_command(mut config: Config, args: ValidateArgs) -> Result<ExitCode> {
    if let Some(path) = args.rules {
        config.rules.path = path;
    }

    let (rule_set, report) = load_rules(&config.rules.path)?;

    let mut stdout = std::io::stdout().lock();
    for rule in rule_set.iter() {
        writeln!(
            stdout,
            "Loaded rule: [{}] {} ({})",
            rule.id,
            rule.description,
            rule.type_name()
        )?;
    }
    for warning in &report.warnings {
        writeln!(stdout, "warning: {}", warning)?;
    }
    writeln!(
        stdout,
        "{} rules, {} warnings",
        rule_set.len(),
        report.warnings.len()
    )?;

    if args.strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

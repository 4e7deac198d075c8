//! groupsweep: tear down everything a module provisioned in one region
//!
//! `plan` lists what would be removed; `teardown` removes it and exits 2 if
//! any resource could not be cleaned up.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use groupsweep::aws::{AwsCloud, AwsContext, FromAwsContext, get_current_account_id};
use groupsweep::config::{OutputFormat, TeardownConfig};
use groupsweep::{RetryPolicy, Teardown};
use groupsweep_common::defaults::DEFAULT_REGION;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "groupsweep")]
#[command(about = "Ordered, idempotent teardown of a tagged AWS resource group")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Arguments shared by every subcommand
#[derive(clap::Args, Debug)]
struct GroupArgs {
    /// Module name; the group is rg-<module>, the key pair kp-<module>
    #[arg(short, long, env = "GROUPSWEEP_MODULE")]
    module: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, env = "AWS_PROFILE")]
    aws_profile: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl From<GroupArgs> for TeardownConfig {
    fn from(args: GroupArgs) -> Self {
        Self {
            module: args.module,
            region: args.region,
            aws_profile: args.aws_profile,
            format: args.format,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show what a teardown would remove, without removing anything
    Plan(GroupArgs),

    /// Remove every resource of the group, then the group and key pair
    Teardown(GroupArgs),
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    }
}

/// Default log filter; the AWS SDK only reports warnings and errors
const DEFAULT_LOG_FILTER: &str = "info,aws_config=warn,aws_sdk_ec2=warn,aws_sdk_resourcegroups=warn,aws_sdk_sts=warn,aws_smithy_runtime=warn";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether the run ended clean.
async fn run() -> Result<bool> {
    let args = Args::parse();
    init_tracing();

    let (config, execute) = match args.command {
        Command::Plan(group) => (TeardownConfig::from(group), false),
        Command::Teardown(group) => (TeardownConfig::from(group), true),
    };
    config.validate()?;

    if let Some(profile) = &config.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let ctx = AwsContext::with_profile(&config.region, config.aws_profile.as_deref()).await;
    let account_id = get_current_account_id(ctx.sdk_config(), &config.region).await?;
    let cloud = AwsCloud::from_context(&ctx);
    let teardown = Teardown::new(&cloud, config.names()).with_policy(config.retry);

    if !execute {
        let plan = teardown.plan().await?;
        match config.format {
            OutputFormat::Json => println!("{}", plan.to_json()?),
            OutputFormat::Table => {
                println!(
                    "Teardown plan for {} in {} (account {account_id}):",
                    plan.resource_group, config.region
                );
                if !plan.group_found {
                    println!("Resource group does not exist.");
                }
                println!("{}", plan.to_table());
                if let Some(dropped) = plan.dropped_table() {
                    println!("\nLeft alone (unmanaged types):\n{dropped}");
                }
                println!("\nRun `groupsweep teardown` to execute.");
            }
        }
        return Ok(true);
    }

    info!(
        module = %config.module,
        region = %config.region,
        account_id = %account_id,
        "Starting teardown"
    );

    let report = teardown
        .run()
        .await
        .context("Teardown aborted")?
        .with_session(&config.region, Some(account_id));

    match config.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => {
            if report.entries.is_empty() && !report.group_found {
                println!("Resource group {} does not exist.", report.resource_group);
            }
            println!("{}", report.to_table());
            let summary = report.summary();
            println!(
                "\nDeleted: {}, Not found: {}, Already terminal: {}, Failed: {}",
                summary.deleted, summary.not_found, summary.skipped, summary.failed
            );
        }
    }

    Ok(report.is_clean())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("groupsweep").chain(args.iter().copied()))
    }

    #[test]
    fn test_retry_policy_is_fixed() {
        let args = parse(&["teardown", "--module", "awsbi-module", "--region", "eu-central-1"])
            .unwrap();
        let Command::Teardown(group) = args.command else {
            panic!("expected teardown subcommand");
        };
        let config = TeardownConfig::from(group);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_retry_flags_are_rejected() {
        for flag in [["--max-attempts", "1"], ["--retry-interval", "0"]] {
            let mut args = vec!["teardown", "--module", "awsbi-module"];
            args.extend(flag);
            assert!(parse(&args).is_err(), "{} should not be accepted", flag[0]);
        }
    }

    #[test]
    fn test_log_filter_lowers_every_sdk() {
        for target in ["aws_sdk_ec2", "aws_sdk_resourcegroups", "aws_sdk_sts"] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=warn")),
                "{target} missing from default filter"
            );
        }
        assert!(DEFAULT_LOG_FILTER.parse::<tracing_subscriber::EnvFilter>().is_ok());
    }
}

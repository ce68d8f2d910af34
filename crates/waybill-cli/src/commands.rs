use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use serde_json::{json, Value};
use waybill_ledger::{
    ConservationValidator, DeliveryReport, Ledger, LedgerError, ReplayResult, TripReplay,
    ValidatorConfig,
};
use waybill_types::{Location, Plan};

use crate::cli::{Cli, Command, OutputFormat, PlanArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&cli)?;
    let passed = match cli.command {
        Command::Validate(ref args) => cmd_validate(args, config, &cli.format)?,
        Command::Replay(ref args) => cmd_replay(args, config, &cli.format)?,
    };
    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Settings file first, then command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<ValidatorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ValidatorConfig::default(),
    };
    if cli.strict_staging {
        config.strict_staging = true;
    }
    if cli.max_trips.is_some() {
        config.max_trips = cli.max_trips;
    }
    Ok(config)
}

fn load_config(path: &Path) -> anyhow::Result<ValidatorConfig> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    ValidatorConfig::from_toml_str(&input)
        .with_context(|| format!("parsing config {}", path.display()))
}

fn load_plan(path: &Path) -> anyhow::Result<Plan> {
    Plan::from_path(path).with_context(|| format!("loading plan {}", path.display()))
}

fn cmd_validate(
    args: &PlanArgs,
    config: ValidatorConfig,
    format: &OutputFormat,
) -> anyhow::Result<bool> {
    let plan = load_plan(&args.plan)?;
    let result = ConservationValidator::new(config).check_plan(&plan);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&verdict_json(&result))?);
        }
        OutputFormat::Text => match &result {
            Ok(report) => print_delivery(report),
            Err(e) => println!("{} {}", "✗ invalid:".red().bold(), e),
        },
    }

    Ok(result.is_ok())
}

fn cmd_replay(
    args: &PlanArgs,
    config: ValidatorConfig,
    format: &OutputFormat,
) -> anyhow::Result<bool> {
    let plan = load_plan(&args.plan)?;
    let result = TripReplay::new(config).replay(&plan);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&replay_json(&result))?);
        }
        OutputFormat::Text => print_replay(&plan, &result),
    }

    Ok(result.is_complete())
}

fn print_delivery(report: &DeliveryReport) {
    println!("{} Plan is balanced", "✓".green().bold());
    println!("  Trips: {}", report.trips_applied);
    println!("  Items: {}", report.items);
    for (location, quantity) in &report.delivered {
        println!("  {} {} ← {}", "delivered:".green(), location.to_string().bold(), quantity);
    }
}

fn print_replay(plan: &Plan, result: &ReplayResult) {
    let start = Ledger::seed(&plan.initial_pickups).snapshot();
    println!("{}  {}", "start".yellow(), format_state(plan, &start));
    let staging: Vec<&str> = plan.staging_points().into_iter().map(Location::as_str).collect();
    if !staging.is_empty() {
        println!("{} {}", "staging:".dimmed(), staging.join(", "));
    }
    for step in &result.steps {
        println!(
            "{} {}  {}",
            format!("#{}", step.index).yellow(),
            step.trip,
            format_state(plan, &step.state)
        );
    }
    if let Some(e) = &result.halted {
        println!("{} {}", "✗ halted:".red().bold(), e);
    }
}

/// Final destinations are highlighted.
fn format_state(plan: &Plan, state: &BTreeMap<Location, u64>) -> String {
    if state.is_empty() {
        return "(empty)".dimmed().to_string();
    }
    state
        .iter()
        .map(|(location, quantity)| {
            let entry = format!("{location}={quantity}");
            if plan.is_final(location) {
                entry.cyan().to_string()
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn verdict_json(result: &Result<DeliveryReport, LedgerError>) -> Value {
    match result {
        Ok(report) => json!({
            "valid": true,
            "trips_applied": report.trips_applied,
            "items": report.items,
            "delivered": report.delivered,
        }),
        Err(e) => {
            let mut value = violation_json(e);
            value["valid"] = Value::Bool(false);
            value
        }
    }
}

fn violation_json(e: &LedgerError) -> Value {
    json!({
        "violation": e.kind().map(|k| k.to_string()),
        "trip": e.trip(),
        "message": e.to_string(),
    })
}

fn replay_json(result: &ReplayResult) -> Value {
    json!({
        "complete": result.is_complete(),
        "applied_trips": result.applied_trips,
        "steps": result.steps,
        "halted": result.halted.as_ref().map(violation_json),
        "state": result.state,
    })
}

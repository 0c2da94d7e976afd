//! Settlement CLI
//!
//! Reads groups and expenses from a JSON ledger file and prints each group's
//! balances and the transfers that settle them.
//!
//! ```text
//! settle <ledger.json> [--config settlement.toml] [--group <id>] [--json]
//! ```
//!
//! Without `--config` the engine is configured from `LEDGER_*` and
//! `SETTLEMENT_*` environment variables.

use anyhow::Context;
use clap::Parser;
use ledger_core::{total_spent, ExpenseRecord, Group, MemberId, NetBalance, Standing};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use settlement::{Config, NettingStats, Settlement, SettlementEngine, Transfer};
use std::path::PathBuf;

/// Input file layout
#[derive(Debug, Deserialize)]
struct LedgerFile {
    groups: Vec<Group>,
    #[serde(default)]
    expenses: Vec<ExpenseRecord>,
}

/// Structured output for `--json`
#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    group_id: &'a str,
    total_spent: Decimal,
    stats: NettingStats,
    #[serde(flatten)]
    settlement: &'a Settlement,
}

/// Settle shared expenses with the fewest transfers
#[derive(Debug, Parser)]
#[command(name = "settle")]
#[command(about = "Print balances and settlement transfers for each group.")]
struct Args {
    /// JSON ledger file with groups and expenses
    ledger: PathBuf,

    /// TOML config file (defaults to LEDGER_* and SETTLEMENT_* env vars)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only settle the group with this id
    #[arg(long)]
    group: Option<String>,

    /// Emit a JSON report instead of text
    #[arg(long)]
    json: bool,
}

fn display_name<'a>(group: &'a Group, id: &'a MemberId) -> &'a str {
    group.member(id).map(|m| m.name.as_str()).unwrap_or(id.as_str())
}

fn describe_balance(group: &Group, entry: &NetBalance, tolerance: Decimal, scale: u32) -> String {
    let name = display_name(group, &entry.member_id);
    let amount = entry.balance.abs().round_dp(scale);
    match entry.standing(tolerance) {
        Standing::Owed => format!("{} is owed {}", name, amount),
        Standing::Owes => format!("{} owes {}", name, amount),
        Standing::Settled => format!("{} is settled up", name),
    }
}

fn describe_transfer(group: &Group, transfer: &Transfer, scale: u32) -> String {
    format!(
        "{} pays {} {}",
        display_name(group, &transfer.payer),
        display_name(group, &transfer.payee),
        transfer.amount.round_dp(scale)
    )
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::from_env().context("Failed to load config from environment")?,
    };
    let tolerance = config.ledger.tolerance;
    let scale = config.ledger.currency_scale;

    let content = std::fs::read_to_string(&args.ledger)
        .with_context(|| format!("Failed to read {}", args.ledger.display()))?;
    let ledger: LedgerFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.ledger.display()))?;

    tracing::info!(
        "Loaded {} groups and {} expenses from {}",
        ledger.groups.len(),
        ledger.expenses.len(),
        args.ledger.display()
    );

    let engine = SettlementEngine::new(config)?;

    let groups: Vec<&Group> = match &args.group {
        Some(id) => {
            let group = ledger
                .groups
                .iter()
                .find(|g| g.id.as_str() == id)
                .with_context(|| format!("No group with id {}", id))?;
            vec![group]
        }
        None => ledger.groups.iter().collect(),
    };

    let mut settlements = Vec::with_capacity(groups.len());
    for group in &groups {
        let settlement = engine
            .settle_group(group, &ledger.expenses)
            .with_context(|| format!("Failed to settle group {}", group.id))?;
        settlements.push(settlement);
    }

    if args.json {
        let reports: Vec<GroupReport<'_>> = groups
            .iter()
            .zip(&settlements)
            .map(|(group, settlement)| GroupReport {
                group_id: group.id.as_str(),
                total_spent: total_spent(group.expenses(&ledger.expenses)),
                stats: settlement.stats(tolerance),
                settlement,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (group, settlement) in groups.iter().zip(&settlements) {
        println!(
            "{} (total expenses {})",
            group.name,
            total_spent(group.expenses(&ledger.expenses)).round_dp(scale)
        );
        for entry in &settlement.balances {
            println!("  {}", describe_balance(group, entry, tolerance, scale));
        }
        if settlement.plan.is_empty() {
            println!("  Nothing to settle");
        } else {
            let stats = settlement.stats(tolerance);
            println!(
                "  Settlement ({} transfers among {} members, {} total):",
                stats.transfer_count,
                stats.participant_count,
                stats.total_volume.round_dp(scale)
            );
            for transfer in &settlement.plan {
                println!("    {}", describe_transfer(group, transfer, scale));
            }
        }
        println!();
    }

    Ok(())
}

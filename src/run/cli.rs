use anyhow::Result;
use std::fmt::Write as _;

use crate::actions::{Action, Outcome};
use crate::ledger::{Ledger, NewExpense};
use crate::models::Month;
use crate::projection;
use crate::session::Session;
use crate::ui::util::{format_amount, parse_amount, parse_installments};

pub(crate) fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], session),
        "paid" => cli_mutate_by_id(&args[2..], session, "paid", Action::MarkPaid),
        "delete" | "rm" => cli_mutate_by_id(&args[2..], session, "delete", Action::Delete),
        "list" | "ls" => {
            print!("{}", format_list(session.ledger()));
            Ok(())
        }
        "chart" | "summary" | "s" => {
            print!("{}", format_chart(session.ledger()));
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI — local-only monthly expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                    Launch interactive TUI");
    println!("  add <month> <description> <amount> [n]    Add an expense in n monthly installments");
    println!("                                            (month: 1-12 or name, amount: 1.234,56)");
    println!("  paid <id>                                 Mark an expense as paid");
    println!("  delete <id>                               Delete a single expense");
    println!("  list                                      List expenses grouped by month");
    println!("  chart                                     Print monthly totals");
    println!("  --help, -h                                Show this help");
    println!("  --version, -V                             Show version");
    println!();
    println!("Environment:");
    println!("  EXPENSETUI_DATA_DIR                       Override the data directory");
    println!("  EXPENSETUI_LOG                            Log level (error|warn|info|debug|trace)");
}

pub(crate) fn parse_cli_add(args: &[String]) -> Result<NewExpense> {
    if args.len() < 3 {
        anyhow::bail!("Usage: expensetui add <month> <description> <amount> [installments]");
    }
    let month = Month::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Unknown month: {}", args[0]))?;
    let amount = parse_amount(&args[2])?;
    let installments = match args.get(3) {
        Some(n) => parse_installments(n)?,
        None => 1,
    };
    Ok(NewExpense {
        start_month: month.index(),
        description: args[1].clone(),
        amount,
        installments,
    })
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let new = parse_cli_add(args)?;
    let outcome = session.dispatch(Action::Add(new))?;
    println!("{}", outcome.message());
    if let Outcome::Added { ids, .. } = &outcome {
        for id in ids {
            if let Some(rec) = session.ledger().get(*id) {
                let month = rec.month().map_or("?", |m| m.as_str());
                println!("  {id}  {month:<10} {}", rec.description);
            }
        }
    }
    Ok(())
}

fn cli_mutate_by_id(
    args: &[String],
    session: &mut Session,
    name: &str,
    action: fn(i64) -> Action,
) -> Result<()> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: expensetui {name} <id>"))?;
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {raw}"))?;
    let outcome = session.dispatch(action(id))?;
    println!("{}", outcome.message());
    Ok(())
}

pub(crate) fn format_list(ledger: &Ledger) -> String {
    let groups = projection::group_by_month(ledger.records());
    if groups.is_empty() {
        return "No expenses\n".into();
    }

    let mut out = String::new();
    for group in &groups {
        let _ = writeln!(
            out,
            "{} — total {} (open {})",
            group.month,
            format_amount(group.total),
            format_amount(group.unpaid)
        );
        for rec in &group.records {
            let mark = if rec.paid { "x" } else { " " };
            let _ = writeln!(
                out,
                "  [{mark}] {:<15} {:<40} {:>16}",
                rec.id,
                rec.description,
                format_amount(rec.amount)
            );
        }
    }
    out
}

pub(crate) fn format_chart(ledger: &Ledger) -> String {
    const WIDTH: u64 = 40;

    let bars = projection::chart_bars(ledger.totals());
    let series = projection::chart_series(ledger.totals());
    let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0);

    let mut out = String::new();
    for ((label, value), total) in bars.iter().zip(series.iter()) {
        let len = if max == 0 {
            0
        } else {
            u128::from(*value) * u128::from(WIDTH) / u128::from(max)
        };
        let _ = writeln!(
            out,
            "{label} {:<width$} {}",
            "█".repeat(len as usize),
            format_amount(*total),
            width = WIDTH as usize
        );
    }
    let _ = writeln!(out, "{}", "─".repeat(WIDTH as usize + 20));
    let _ = writeln!(
        out,
        "Total {}",
        format_amount(ledger.totals().grand_total())
    );
    out
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

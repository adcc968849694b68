use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{parse_amount, parse_installments};
use crate::actions::{Action, Outcome};
use crate::ledger::{LedgerError, NewExpense};
use crate::models::Month;
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("c", "Go to Chart", cmd_chart, r);
    register_command!("chart", "Go to Chart", cmd_chart, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add mar 3 1.200,00 Rent)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 3 1 49,90 Gym)", cmd_add, r);
    register_command!(
        "paid",
        "Mark expense paid (selected, or :paid <id>)",
        cmd_paid,
        r
    );
    register_command!(
        "delete",
        "Delete expense (selected, or :delete <id>)",
        cmd_delete,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parse `:add` arguments: `<month> <installments> <amount> <description...>`.
pub(crate) fn parse_add_args(args: &str) -> Result<NewExpense, LedgerError> {
    let parts: Vec<&str> = args.splitn(4, ' ').map(str::trim).collect();
    if parts.len() < 4 || parts[3].is_empty() {
        return Err(LedgerError::validation(
            "Usage: :add <month> <installments> <amount> <description>",
        ));
    }
    let month = Month::parse(parts[0])
        .ok_or_else(|| LedgerError::validation(format!("Unknown month: {}", parts[0])))?;
    let installments = parse_installments(parts[1])?;
    let amount = parse_amount(parts[2])?;

    Ok(NewExpense {
        start_month: month.index(),
        description: parts[3].to_string(),
        amount,
        installments,
    })
}

fn report(app: &mut App, session: &mut Session, action: Action) {
    match session.dispatch(action) {
        Ok(outcome) => {
            app.refresh(session.ledger());
            if let Outcome::Added { ids, .. } = &outcome {
                if let Some(first) = ids.first() {
                    app.select(*first);
                }
            }
            app.set_status(outcome.message());
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
}

/// Explicit id argument, or the row under the cursor when empty.
fn target_id(args: &str, app: &App) -> Result<i64, String> {
    if args.is_empty() {
        return app
            .selected_id()
            .ok_or_else(|| "No expense selected".to_string());
    }
    args.parse::<i64>()
        .map_err(|_| format!("Invalid id: {args}"))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(session.ledger());
    Ok(())
}

fn cmd_chart(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Chart;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :add <month> <installments> <amount> <description>. Example: :add jan 3 1.000,00 Rent",
        );
        return Ok(());
    }
    match parse_add_args(args) {
        Ok(new) => report(app, session, Action::Add(new)),
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    Ok(())
}

fn cmd_paid(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    match target_id(args, app) {
        Ok(id) => report(app, session, Action::MarkPaid(id)),
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let id = match target_id(args, app) {
        Ok(id) => id,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    match session.ledger().get(id) {
        Some(rec) => {
            app.confirm_message = format!("Delete '{}'?", rec.description);
            app.pending_action = Some(PendingAction::DeleteExpense { id });
            app.input_mode = InputMode::Confirm;
        }
        None => app.set_status(format!("No expense with id {id}")),
    }
    Ok(())
}

/// Run a confirmed pending action.
pub(crate) fn confirm(action: PendingAction, app: &mut App, session: &mut Session) {
    match action {
        PendingAction::DeleteExpense { id } => report(app, session, Action::Delete(id)),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

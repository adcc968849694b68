use crate::db::ExpenseStore;
use crate::ledger::{Ledger, LedgerError, NewExpense};
use crate::ui::util::format_amount;

/// Every user-triggered ledger mutation, whichever front end it came from.
#[derive(Debug, Clone)]
pub(crate) enum Action {
    Add(NewExpense),
    MarkPaid(i64),
    Delete(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Added {
        ids: Vec<i64>,
        description: String,
        saved: bool,
    },
    MarkedPaid {
        id: i64,
        saved: bool,
    },
    Deleted {
        id: i64,
        description: String,
        saved: bool,
    },
    /// The id did not match any record; nothing changed.
    Unchanged {
        id: i64,
    },
}

impl Outcome {
    pub(crate) fn saved(&self) -> bool {
        match self {
            Self::Added { saved, .. }
            | Self::MarkedPaid { saved, .. }
            | Self::Deleted { saved, .. } => *saved,
            Self::Unchanged { .. } => true,
        }
    }

    pub(crate) fn message(&self) -> String {
        let msg = match self {
            Self::Added {
                ids, description, ..
            } => {
                let plural = if ids.len() == 1 { "" } else { "s" };
                format!("Added {} record{plural}: {description}", ids.len())
            }
            Self::MarkedPaid { id, .. } => format!("Marked {id} as paid"),
            Self::Deleted { description, .. } => format!("Deleted: {description}"),
            Self::Unchanged { id } => return format!("No expense with id {id}"),
        };
        if self.saved() {
            msg
        } else {
            format!("{msg} (not saved, see log)")
        }
    }
}

/// Apply one action: validate, mutate, then persist. Persistence failures
/// are logged and reported in the outcome, never propagated.
pub(crate) fn apply(
    action: Action,
    ledger: &mut Ledger,
    store: &mut dyn ExpenseStore,
) -> Result<Outcome, LedgerError> {
    let outcome = match action {
        Action::Add(new) => {
            let description = format!(
                "{} {} x{}",
                new.description.trim(),
                format_amount(new.amount),
                new.installments
            );
            let ids = ledger.add_expense(new)?;
            Outcome::Added {
                ids,
                description,
                saved: persist(ledger, store),
            }
        }
        Action::MarkPaid(id) => {
            if !ledger.mark_as_paid(id) {
                return Ok(Outcome::Unchanged { id });
            }
            Outcome::MarkedPaid {
                id,
                saved: persist(ledger, store),
            }
        }
        Action::Delete(id) => match ledger.delete_expense(id) {
            Some(rec) => Outcome::Deleted {
                id,
                description: rec.description,
                saved: persist(ledger, store),
            },
            None => return Ok(Outcome::Unchanged { id }),
        },
    };
    debug_assert!(ledger.is_consistent());
    Ok(outcome)
}

fn persist(ledger: &Ledger, store: &mut dyn ExpenseStore) -> bool {
    match store.save(ledger.records()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save {} expenses: {e:#}", ledger.len());
            false
        }
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;

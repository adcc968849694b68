mod error;
mod totals;

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::models::{ExpenseRecord, Month};

pub(crate) use error::LedgerError;
pub(crate) use totals::MonthlyTotals;

/// Input for a single add. Expands into `installments` records.
#[derive(Debug, Clone)]
pub(crate) struct NewExpense {
    pub(crate) start_month: u8,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) installments: u32,
}

impl NewExpense {
    fn validate(&self) -> Result<Month, LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::validation("Description must not be empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "Amount must be positive, got {}",
                self.amount
            )));
        }
        if self.installments == 0 {
            return Err(LedgerError::validation(
                "Installments must be a positive whole number",
            ));
        }
        Month::from_index(self.start_month).ok_or_else(|| {
            LedgerError::validation(format!(
                "Month must be between 0 and 11, got {}",
                self.start_month
            ))
        })
    }
}

/// Expense records in insertion order plus incrementally maintained
/// monthly totals. `totals[m]` always equals the sum of every record in
/// month `m`, paid or not.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    records: Vec<ExpenseRecord>,
    totals: MonthlyTotals,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from persisted records, dropping any that break the
    /// record invariants. Totals are computed from what is kept.
    pub(crate) fn from_records(records: Vec<ExpenseRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut totals = MonthlyTotals::default();
        let mut kept = Vec::with_capacity(records.len());
        for rec in records {
            if rec.month().is_none() {
                log::warn!("Dropping expense {}: month {} out of range", rec.id, rec.month);
                continue;
            }
            if rec.amount <= Decimal::ZERO {
                log::warn!("Dropping expense {}: non-positive amount {}", rec.id, rec.amount);
                continue;
            }
            if seen.contains(&rec.id) {
                log::warn!("Dropping expense {}: duplicate id", rec.id);
                continue;
            }
            if let Err(e) = totals.add(rec.month, rec.amount) {
                log::warn!("Dropping expense {}: {e}", rec.id);
                continue;
            }
            seen.insert(rec.id);
            kept.push(rec);
        }
        Self {
            records: kept,
            totals,
        }
    }

    pub(crate) fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub(crate) fn totals(&self) -> &MonthlyTotals {
        &self.totals
    }

    pub(crate) fn get(&self, id: i64) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add an expense using the current wall clock for ids.
    pub(crate) fn add_expense(&mut self, new: NewExpense) -> Result<Vec<i64>, LedgerError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.add_expense_at(new, now_ms)
    }

    /// Add an expense, one full-amount record per installment on
    /// consecutive months starting at `start_month`. Ids start at
    /// `now_ms`, raised past the largest existing id when needed.
    pub(crate) fn add_expense_at(
        &mut self,
        new: NewExpense,
        now_ms: i64,
    ) -> Result<Vec<i64>, LedgerError> {
        let start = new.validate()?;
        let description = new.description.trim();

        let base = match self.records.iter().map(|r| r.id).max() {
            Some(max_id) if max_id >= now_ms => max_id.checked_add(1),
            _ => Some(now_ms),
        };
        // The last installment's id must fit as well.
        let base = base
            .filter(|b| b.checked_add(i64::from(new.installments - 1)).is_some())
            .ok_or_else(|| LedgerError::validation("No expense ids left"))?;

        let mut totals = self.totals;
        for i in 0..new.installments {
            totals.add(start.advance(i).index(), new.amount)?;
        }

        let mut ids = Vec::with_capacity(new.installments as usize);
        for i in 0..new.installments {
            let month = start.advance(i);
            let id = base + i64::from(i);
            let desc = ExpenseRecord::installment_description(description, i + 1, new.installments);
            self.records
                .push(ExpenseRecord::new(id, desc, new.amount, month));
            ids.push(id);
        }
        self.totals = totals;

        log::info!(
            "Added '{}' x{} from {} ({} each)",
            description,
            new.installments,
            start,
            new.amount
        );
        Ok(ids)
    }

    /// Returns false when no record has `id`.
    pub(crate) fn mark_as_paid(&mut self, id: i64) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(rec) => {
                rec.paid = true;
                log::info!("Marked expense {id} as paid");
                true
            }
            None => {
                log::debug!("mark_as_paid: no expense with id {id}");
                false
            }
        }
    }

    /// Remove one record. Installment siblings are left alone.
    pub(crate) fn delete_expense(&mut self, id: i64) -> Option<ExpenseRecord> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            log::debug!("delete_expense: no expense with id {id}");
            return None;
        };
        let rec = self.records.remove(pos);
        self.totals.sub(rec.month, rec.amount);
        log::info!("Deleted expense {id} ('{}')", rec.description);
        Some(rec)
    }

    /// Totals summed from scratch over the current records. Every record
    /// got in through a checked add, so no month sum can overflow here.
    pub(crate) fn recompute_totals(&self) -> MonthlyTotals {
        let mut totals = MonthlyTotals::default();
        for rec in &self.records {
            if let Err(e) = totals.add(rec.month, rec.amount) {
                log::error!("Recomputing totals: {e}");
            }
        }
        totals
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.recompute_totals() == self.totals
    }
}

#[cfg(test)]
mod tests;

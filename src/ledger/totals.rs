use rust_decimal::Decimal;

use super::LedgerError;
use crate::models::Month;

/// Per-month accumulators, one slot per calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MonthlyTotals([Decimal; Month::COUNT]);

impl MonthlyTotals {
    pub(crate) fn get(&self, month: u8) -> Decimal {
        self.0.get(month as usize).copied().unwrap_or(Decimal::ZERO)
    }

    /// Fails without touching the slot when the sum would overflow.
    pub(crate) fn add(&mut self, month: u8, amount: Decimal) -> Result<(), LedgerError> {
        let Some(slot) = self.0.get_mut(month as usize) else {
            return Ok(());
        };
        *slot = slot.checked_add(amount).ok_or_else(|| {
            LedgerError::validation(format!(
                "Total for {} would exceed the largest supported amount",
                Month::from_index(month).map_or("?", Month::as_str)
            ))
        })?;
        Ok(())
    }

    pub(crate) fn sub(&mut self, month: u8, amount: Decimal) {
        if let Some(slot) = self.0.get_mut(month as usize) {
            *slot -= amount;
        }
    }

    pub(crate) fn as_array(&self) -> &[Decimal; Month::COUNT] {
        &self.0
    }

    pub(crate) fn grand_total(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
    }
}

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::MonthlyTotals;
use crate::models::{ExpenseRecord, Month};

/// Records of one calendar month, in insertion order.
#[derive(Debug)]
pub(crate) struct MonthGroup<'a> {
    pub(crate) month: Month,
    pub(crate) records: Vec<&'a ExpenseRecord>,
    pub(crate) total: Decimal,
    pub(crate) unpaid: Decimal,
}

/// Months with at least one record, January first.
pub(crate) fn group_by_month(records: &[ExpenseRecord]) -> Vec<MonthGroup<'_>> {
    Month::all()
        .iter()
        .filter_map(|&month| {
            let in_month: Vec<&ExpenseRecord> = records
                .iter()
                .filter(|r| r.month == month.index())
                .collect();
            if in_month.is_empty() {
                return None;
            }
            let total = in_month.iter().map(|r| r.amount).sum();
            let unpaid = in_month
                .iter()
                .filter(|r| !r.paid)
                .map(|r| r.amount)
                .sum();
            Some(MonthGroup {
                month,
                records: in_month,
                total,
                unpaid,
            })
        })
        .collect()
}

/// The 12 monthly totals, as handed to the chart.
pub(crate) fn chart_series(totals: &MonthlyTotals) -> [Decimal; Month::COUNT] {
    *totals.as_array()
}

/// Largest bar value handed out. The bar widget multiplies values by its
/// height in `u64`, so bigger totals are scaled down proportionally.
pub(crate) const MAX_BAR_VALUE: u64 = 1_000_000_000;

/// Bar labels and whole-unit values for the chart widget.
pub(crate) fn chart_bars(totals: &MonthlyTotals) -> Vec<(&'static str, u64)> {
    let units: Vec<u64> = chart_series(totals)
        .iter()
        .map(|total| total.round().to_u64().unwrap_or(u64::MAX))
        .collect();
    let max = units.iter().copied().max().unwrap_or(0);

    Month::all()
        .iter()
        .zip(units)
        .map(|(m, value)| (m.short(), scale_bar(value, max, MAX_BAR_VALUE)))
        .collect()
}

/// `value` rescaled so that `max` maps to at most `limit`, computed in `u128`.
fn scale_bar(value: u64, max: u64, limit: u64) -> u64 {
    if max <= limit {
        return value;
    }
    let scaled = u128::from(value) * u128::from(limit) / u128::from(max);
    u64::try_from(scaled).unwrap_or(limit)
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;

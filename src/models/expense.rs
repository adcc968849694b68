use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

/// One expense line. Installment siblings are independent records that
/// only share the description root and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExpenseRecord {
    pub(crate) id: i64,
    pub(crate) description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    /// Zero-based calendar month, no year.
    pub(crate) month: u8,
    #[serde(default)]
    pub(crate) paid: bool,
}

impl ExpenseRecord {
    pub(crate) fn new(id: i64, description: String, amount: Decimal, month: Month) -> Self {
        Self {
            id,
            description,
            amount,
            month: month.index(),
            paid: false,
        }
    }

    pub(crate) fn month(&self) -> Option<Month> {
        Month::from_index(self.month)
    }

    /// Description with the `(Installment i/N)` suffix applied.
    pub(crate) fn installment_description(root: &str, number: u32, of: u32) -> String {
        format!("{root} (Installment {number}/{of})")
    }
}

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::ledger::LedgerError;

/// Format an amount as Brazilian real: `.` groups thousands, `,` marks decimals.
/// e.g. `1234567.89` → `"R$ 1.234.567,89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_dots: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if val < Decimal::ZERO {
        format!("-R$ {with_dots},{dec_part}")
    } else {
        format!("R$ {with_dots},{dec_part}")
    }
}

/// Parse a user-typed amount such as `"1.234,56"` or `"R$ 90"`.
/// Dots are thousands separators and a comma is the decimal mark.
/// Only strictly positive amounts are accepted.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let cleaned = trimmed
        .strip_prefix("R$")
        .unwrap_or(trimmed)
        .trim()
        .replace('.', "")
        .replace(',', ".");

    if cleaned.is_empty() {
        return Err(LedgerError::validation("Amount is required"));
    }

    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| LedgerError::validation(format!("Invalid amount: {input}")))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "Amount must be positive: {input}"
        )));
    }
    Ok(amount)
}

/// Parse an installment count; must be a whole number of at least one.
pub(crate) fn parse_installments(input: &str) -> Result<u32, LedgerError> {
    match input.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(LedgerError::validation(format!(
            "Installments must be a positive whole number: {input}"
        ))),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

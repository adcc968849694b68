#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

const NOW: i64 = 1_700_000_000_000;

fn new_expense(month: u8, description: &str, amount: Decimal, installments: u32) -> NewExpense {
    NewExpense {
        start_month: month,
        description: description.into(),
        amount,
        installments,
    }
}

fn assert_totals_match(ledger: &Ledger) {
    for m in 0..12u8 {
        let expected: Decimal = ledger
            .records()
            .iter()
            .filter(|r| r.month == m)
            .map(|r| r.amount)
            .sum();
        assert_eq!(ledger.totals().get(m), expected, "month {m}");
    }
    assert!(ledger.is_consistent());
}

// ── add_expense ───────────────────────────────────────────────

#[test]
fn test_rent_three_installments_from_january() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 3), NOW)
        .unwrap();

    assert_eq!(ids.len(), 3);
    let recs = ledger.records();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].description, "Rent (Installment 1/3)");
    assert_eq!(recs[1].description, "Rent (Installment 2/3)");
    assert_eq!(recs[2].description, "Rent (Installment 3/3)");
    assert_eq!(
        recs.iter().map(|r| r.month).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(recs.iter().all(|r| r.amount == dec!(1000)));
    assert!(recs.iter().all(|r| !r.paid));

    for m in 0..3 {
        assert_eq!(ledger.totals().get(m), dec!(1000));
    }
    for m in 3..12 {
        assert_eq!(ledger.totals().get(m), Decimal::ZERO);
    }
}

#[test]
fn test_gift_wraps_past_december() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(11, "Gift", dec!(200), 2), NOW)
        .unwrap();

    let months: Vec<u8> = ledger.records().iter().map(|r| r.month).collect();
    assert_eq!(months, vec![11, 0]);
    assert_eq!(ledger.totals().get(11), dec!(200));
    assert_eq!(ledger.totals().get(0), dec!(200));
    assert_eq!(ledger.totals().grand_total(), dec!(400));
}

#[test]
fn test_installments_carry_full_amount() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(4, "Laptop", dec!(2500.50), 5), NOW)
        .unwrap();
    assert!(ledger.records().iter().all(|r| r.amount == dec!(2500.50)));
    assert_eq!(ledger.totals().grand_total(), dec!(12502.50));
}

#[test]
fn test_installment_split_covers_every_start_and_count() {
    for start in 0..12u8 {
        for n in [1u32, 2, 5, 12, 13, 25] {
            let mut ledger = Ledger::new();
            ledger
                .add_expense_at(new_expense(start, "X", dec!(10), n), NOW)
                .unwrap();
            assert_eq!(ledger.len(), n as usize);
            for (i, rec) in ledger.records().iter().enumerate() {
                assert_eq!(rec.month as usize, (start as usize + i) % 12);
                assert_eq!(rec.amount, dec!(10));
            }
            assert_totals_match(&ledger);
        }
    }
}

#[test]
fn test_single_installment_keeps_suffix() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(5, "Coffee", dec!(4.50), 1), NOW)
        .unwrap();
    assert_eq!(ledger.records()[0].description, "Coffee (Installment 1/1)");
}

#[test]
fn test_description_is_trimmed() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(5, "  Gym  ", dec!(50), 1), NOW)
        .unwrap();
    assert_eq!(ledger.records()[0].description, "Gym (Installment 1/1)");
}

#[test]
fn test_ids_start_at_timestamp_and_step_by_one() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 3), NOW)
        .unwrap();
    assert_eq!(ids, vec![NOW, NOW + 1, NOW + 2]);
}

#[test]
fn test_ids_unique_when_adds_share_a_timestamp() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(0, "A", dec!(1), 3), NOW)
        .unwrap();
    ledger
        .add_expense_at(new_expense(0, "B", dec!(1), 3), NOW)
        .unwrap();
    ledger
        .add_expense_at(new_expense(0, "C", dec!(1), 1), NOW - 5)
        .unwrap();

    let mut ids: Vec<i64> = ledger.records().iter().map(|r| r.id).collect();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn test_ids_unique_with_wall_clock() {
    let mut ledger = Ledger::new();
    for _ in 0..20 {
        ledger
            .add_expense(new_expense(3, "Fast", dec!(1), 4))
            .unwrap();
    }
    let mut ids: Vec<i64> = ledger.records().iter().map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 80);
}

// ── validation ────────────────────────────────────────────────

#[test]
fn test_rejects_empty_description() {
    let mut ledger = Ledger::new();
    let err = ledger
        .add_expense_at(new_expense(0, "   ", dec!(10), 1), NOW)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(ledger.is_empty());
}

#[test]
fn test_rejects_non_positive_amount() {
    let mut ledger = Ledger::new();
    assert!(ledger
        .add_expense_at(new_expense(0, "Zero", Decimal::ZERO, 1), NOW)
        .is_err());
    assert!(ledger
        .add_expense_at(new_expense(0, "Neg", dec!(-5), 1), NOW)
        .is_err());
    assert!(ledger.is_empty());
    assert_eq!(ledger.totals().grand_total(), Decimal::ZERO);
}

#[test]
fn test_rejects_zero_installments() {
    let mut ledger = Ledger::new();
    let err = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(10), 0), NOW)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::validation("Installments must be a positive whole number")
    );
    assert!(ledger.is_empty());
}

#[test]
fn test_rejects_month_out_of_range() {
    let mut ledger = Ledger::new();
    assert!(ledger
        .add_expense_at(new_expense(12, "Rent", dec!(10), 1), NOW)
        .is_err());
    assert!(ledger.is_empty());
}

#[test]
fn test_failed_add_leaves_existing_state() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(2, "Rent", dec!(1000), 2), NOW)
        .unwrap();
    let before_records = ledger.records().to_vec();
    let before_totals = *ledger.totals();

    assert!(ledger
        .add_expense_at(new_expense(2, "", dec!(1000), 2), NOW + 10)
        .is_err());

    assert_eq!(ledger.records(), before_records.as_slice());
    assert_eq!(*ledger.totals(), before_totals);
}

// ── mark_as_paid ──────────────────────────────────────────────

#[test]
fn test_mark_as_paid_isolated() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 3), NOW)
        .unwrap();
    let totals_before = *ledger.totals();

    assert!(ledger.mark_as_paid(ids[1]));

    let recs = ledger.records();
    assert!(!recs[0].paid);
    assert!(recs[1].paid);
    assert!(!recs[2].paid);
    assert_eq!(*ledger.totals(), totals_before);
    assert_totals_match(&ledger);
}

#[test]
fn test_mark_as_paid_twice_is_fine() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 1), NOW)
        .unwrap();
    assert!(ledger.mark_as_paid(ids[0]));
    assert!(ledger.mark_as_paid(ids[0]));
    assert!(ledger.get(ids[0]).unwrap().paid);
}

#[test]
fn test_mark_as_paid_unknown_id_is_noop() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 2), NOW)
        .unwrap();
    let records = ledger.records().to_vec();
    let totals = *ledger.totals();

    assert!(!ledger.mark_as_paid(12345));

    assert_eq!(ledger.records(), records.as_slice());
    assert_eq!(*ledger.totals(), totals);
}

// ── delete_expense ────────────────────────────────────────────

#[test]
fn test_delete_second_installment() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(0, "Rent", dec!(1000), 3), NOW)
        .unwrap();

    let removed = ledger.delete_expense(ids[1]).unwrap();
    assert_eq!(removed.description, "Rent (Installment 2/3)");
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.totals().get(1), Decimal::ZERO);
    assert_eq!(ledger.totals().get(0), dec!(1000));
    assert_eq!(ledger.totals().get(2), dec!(1000));
    assert!(ledger.get(ids[0]).is_some());
    assert!(ledger.get(ids[2]).is_some());
    assert_totals_match(&ledger);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(6, "Trip", dec!(300), 2), NOW)
        .unwrap();
    let records = ledger.records().to_vec();
    let totals = *ledger.totals();

    assert!(ledger.delete_expense(999).is_none());

    assert_eq!(ledger.records(), records.as_slice());
    assert_eq!(*ledger.totals(), totals);
}

#[test]
fn test_delete_paid_record_still_reduces_total() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(8, "Phone", dec!(80), 1), NOW)
        .unwrap();
    ledger.mark_as_paid(ids[0]);
    ledger.delete_expense(ids[0]);
    assert_eq!(ledger.totals().get(8), Decimal::ZERO);
    assert!(ledger.is_empty());
}

#[test]
fn test_delete_twice_second_is_noop() {
    let mut ledger = Ledger::new();
    let ids = ledger
        .add_expense_at(new_expense(8, "Phone", dec!(80), 2), NOW)
        .unwrap();
    assert!(ledger.delete_expense(ids[0]).is_some());
    assert!(ledger.delete_expense(ids[0]).is_none());
    assert_eq!(ledger.len(), 1);
    assert_totals_match(&ledger);
}

// ── totals consistency ────────────────────────────────────────

#[test]
fn test_totals_consistent_across_mixed_sequence() {
    let mut ledger = Ledger::new();
    let mut now = NOW;
    let mut all_ids = Vec::new();

    let inputs = [
        (0u8, "Rent", dec!(1000), 3u32),
        (11, "Gift", dec!(200), 2),
        (5, "Course", dec!(149.90), 10),
        (2, "Dentist", dec!(320.25), 1),
        (9, "Insurance", dec!(75.10), 14),
    ];

    for (month, desc, amount, n) in inputs {
        let ids = ledger
            .add_expense_at(new_expense(month, desc, amount, n), now)
            .unwrap();
        now += 1000;
        assert_totals_match(&ledger);
        all_ids.extend(ids);
    }

    for (i, id) in all_ids.iter().enumerate() {
        if i % 3 == 0 {
            ledger.mark_as_paid(*id);
        } else if i % 3 == 1 {
            ledger.delete_expense(*id);
        }
        ledger.delete_expense(-1);
        ledger.mark_as_paid(-1);
        assert_totals_match(&ledger);
    }
}

#[test]
fn test_recompute_on_empty_ledger() {
    let ledger = Ledger::new();
    assert_eq!(ledger.recompute_totals(), MonthlyTotals::default());
    assert!(ledger.is_consistent());
}

// ── from_records ──────────────────────────────────────────────

#[test]
fn test_from_records_recomputes_totals() {
    let records = vec![
        ExpenseRecord::new(1, "A".into(), dec!(10), Month::January),
        ExpenseRecord::new(2, "B".into(), dec!(15), Month::January),
        ExpenseRecord::new(3, "C".into(), dec!(7), Month::June),
    ];
    let ledger = Ledger::from_records(records);
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.totals().get(0), dec!(25));
    assert_eq!(ledger.totals().get(5), dec!(7));
    assert!(ledger.is_consistent());
}

#[test]
fn test_from_records_drops_invalid() {
    let mut bad_month = ExpenseRecord::new(2, "Bad month".into(), dec!(10), Month::May);
    bad_month.month = 14;
    let records = vec![
        ExpenseRecord::new(1, "Good".into(), dec!(10), Month::May),
        bad_month,
        ExpenseRecord::new(3, "Zero".into(), Decimal::ZERO, Month::May),
        ExpenseRecord::new(1, "Duplicate".into(), dec!(99), Month::May),
    ];
    let ledger = Ledger::from_records(records);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].description, "Good");
    assert_eq!(ledger.totals().get(4), dec!(10));
}

#[test]
fn test_from_records_keeps_order_and_paid() {
    let mut paid = ExpenseRecord::new(5, "Paid".into(), dec!(1), Month::March);
    paid.paid = true;
    let records = vec![
        ExpenseRecord::new(9, "First".into(), dec!(1), Month::December),
        paid,
    ];
    let ledger = Ledger::from_records(records);
    assert_eq!(ledger.records()[0].id, 9);
    assert!(ledger.records()[1].paid);
}

#[test]
fn test_add_after_load_avoids_loaded_ids() {
    let records = vec![ExpenseRecord::new(NOW + 50, "Later".into(), dec!(1), Month::March)];
    let mut ledger = Ledger::from_records(records);
    let ids = ledger
        .add_expense_at(new_expense(0, "New", dec!(1), 2), NOW)
        .unwrap();
    assert_eq!(ids, vec![NOW + 51, NOW + 52]);
}

#[test]
fn test_add_rejected_when_no_ids_left() {
    let records = vec![ExpenseRecord::new(i64::MAX, "Last".into(), dec!(1), Month::March)];
    let mut ledger = Ledger::from_records(records);
    let before = *ledger.totals();

    let err = ledger
        .add_expense_at(new_expense(0, "New", dec!(1), 1), NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::validation("No expense ids left"));
    assert_eq!(ledger.len(), 1);
    assert_eq!(*ledger.totals(), before);
}

#[test]
fn test_add_rejected_when_last_installment_id_overflows() {
    let records = vec![ExpenseRecord::new(i64::MAX - 2, "Near".into(), dec!(1), Month::March)];
    let mut ledger = Ledger::from_records(records);

    assert!(ledger
        .add_expense_at(new_expense(0, "Three", dec!(1), 3), NOW)
        .is_err());
    let ids = ledger
        .add_expense_at(new_expense(0, "Two", dec!(1), 2), NOW)
        .unwrap();
    assert_eq!(ids, vec![i64::MAX - 1, i64::MAX]);
}

// ── overflow ──────────────────────────────────────────────────

#[test]
fn test_month_total_overflow_rejected() {
    let big = Decimal::MAX - dec!(1);
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(0, "Huge", big, 1), NOW)
        .unwrap();

    let err = ledger
        .add_expense_at(new_expense(0, "Again", big, 1), NOW + 1)
        .unwrap_err();
    assert!(err.to_string().contains("January"), "{err}");
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.totals().get(0), big);
    assert_totals_match(&ledger);
}

#[test]
fn test_wrapping_installments_overflow_leaves_no_partial_add() {
    let big = Decimal::MAX - dec!(1);
    let mut ledger = Ledger::new();
    // 13 installments from January land on January twice.
    assert!(ledger
        .add_expense_at(new_expense(0, "Huge", big, 13), NOW)
        .is_err());
    assert!(ledger.is_empty());
    assert_eq!(*ledger.totals(), MonthlyTotals::default());

    ledger
        .add_expense_at(new_expense(0, "Huge", big, 12), NOW)
        .unwrap();
    assert_eq!(ledger.len(), 12);
    assert_totals_match(&ledger);
}

#[test]
fn test_grand_total_saturates() {
    let big = Decimal::MAX - dec!(1);
    let mut ledger = Ledger::new();
    ledger
        .add_expense_at(new_expense(0, "Huge", big, 2), NOW)
        .unwrap();
    assert_eq!(ledger.totals().grand_total(), Decimal::MAX);
}

#[test]
fn test_from_records_drops_record_that_overflows_month() {
    let big = Decimal::MAX - dec!(1);
    let records = vec![
        ExpenseRecord::new(1, "Huge".into(), big, Month::May),
        ExpenseRecord::new(2, "Huge again".into(), big, Month::May),
        ExpenseRecord::new(3, "Small".into(), dec!(5), Month::June),
    ];
    let ledger = Ledger::from_records(records);
    let ids: Vec<i64> = ledger.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ledger.totals().get(4), big);
    assert!(ledger.is_consistent());
}

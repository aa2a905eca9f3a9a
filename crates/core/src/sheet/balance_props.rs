//! Property-based tests for the balance calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::compute_balance;

/// Strategy for line item values with up to 4 decimal places (0.0001 to 1,000,000.0000).
fn value() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals are exact sums; only the balance is rounded.
    #[test]
    fn prop_totals_are_exact(
        payables in prop::collection::vec(value(), 0..20),
        receivables in prop::collection::vec(value(), 0..20),
    ) {
        let expected_payable: Decimal = payables.iter().copied().sum();
        let expected_receivable: Decimal = receivables.iter().copied().sum();

        let totals = compute_balance(payables, receivables);

        prop_assert_eq!(totals.total_payable, expected_payable);
        prop_assert_eq!(totals.total_receivable, expected_receivable);
    }

    /// The balance has at most 2 decimal places and is within half a cent.
    #[test]
    fn prop_balance_is_rounded_to_cents(
        payables in prop::collection::vec(value(), 0..20),
        receivables in prop::collection::vec(value(), 0..20),
    ) {
        let totals = compute_balance(payables, receivables);
        let exact = totals.total_receivable - totals.total_payable;

        prop_assert!(totals.balance.scale() <= 2);
        prop_assert!((totals.balance - exact).abs() <= Decimal::new(5, 3));
    }

    /// Swapping payables and receivables negates the balance.
    #[test]
    fn prop_balance_is_antisymmetric(
        a in prop::collection::vec(value(), 0..20),
        b in prop::collection::vec(value(), 0..20),
    ) {
        let forward = compute_balance(a.clone(), b.clone());
        let backward = compute_balance(b, a);

        prop_assert_eq!(forward.balance, -backward.balance);
    }
}

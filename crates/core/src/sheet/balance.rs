//! Sheet totals and balance.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Derived totals of a sheet. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTotals {
    /// Exact sum of payable values.
    pub total_payable: Decimal,
    /// Exact sum of receivable values.
    pub total_receivable: Decimal,
    /// Receivables minus payables, rounded to cents (half away from zero).
    pub balance: Decimal,
}

/// Computes a sheet's totals from the values of its line items.
#[must_use]
pub fn compute_balance<P, R>(payables: P, receivables: R) -> SheetTotals
where
    P: IntoIterator<Item = Decimal>,
    R: IntoIterator<Item = Decimal>,
{
    let total_payable: Decimal = payables.into_iter().sum();
    let total_receivable: Decimal = receivables.into_iter().sum();
    let balance = (total_receivable - total_payable)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    SheetTotals {
        total_payable,
        total_receivable,
        balance,
    }
}

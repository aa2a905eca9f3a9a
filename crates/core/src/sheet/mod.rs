//! Sheet rules: description naming and balance.
//!
//! - `description` - trimming, case-insensitive uniqueness, duplicate names
//! - `balance` - totals and balance of a sheet's line items

pub mod balance;
pub mod description;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod description_props;

pub use balance::{SheetTotals, compute_balance};
pub use description::{
    ensure_unique_description, generate_duplicate_description, normalize_description,
    same_description,
};

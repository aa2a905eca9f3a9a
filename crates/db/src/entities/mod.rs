//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts_payable;
pub mod accounts_receivable;
pub mod sheets;
pub mod users;

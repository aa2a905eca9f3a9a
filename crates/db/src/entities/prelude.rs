//! Entity re-exports.

pub use super::accounts_payable::Entity as AccountsPayable;
pub use super::accounts_receivable::Entity as AccountsReceivable;
pub use super::sheets::Entity as Sheets;
pub use super::users::Entity as Users;

//! Ownership-based authorization.
//!
//! Every sheet, payable, and receivable belongs to exactly one user. Before a
//! record is read or changed, the caller's id is compared against the
//! record's owner; lookups that find nothing fail with the record's id.

pub mod error;
pub mod guard;

pub use error::AccessError;
pub use guard::{Action, Owned, ResourceKind, authorize, require_actor};

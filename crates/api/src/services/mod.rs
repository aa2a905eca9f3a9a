//! Services that coordinate repositories, tokens and mail.

pub mod account;

pub use account::AccountService;

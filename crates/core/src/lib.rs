//! Core business logic for Smart Budget.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `access` - Ownership checks on sheets and line items
//! - `auth` - Password hashing, password policy, recovery cooldown
//! - `sheet` - Description uniqueness, duplicate naming, balance

pub mod access;
pub mod auth;
pub mod sheet;

//! Service layer for accounts.

pub mod account;

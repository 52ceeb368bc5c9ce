//! Limeleaf Accounts - user accounts, profiles, and billing data.
//!
//! This crate is the persistence and behavior layer for Limeleaf user
//! accounts: email-keyed users with Argon2id password hashes, an
//! auto-provisioned one-to-one profile per user, and the billing-address
//! form binding. HTTP routing and templating live elsewhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod forms;
pub mod models;
pub mod services;

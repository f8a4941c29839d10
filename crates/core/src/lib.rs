//! Core business logic for Terralot.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, transition rules, and ledger calculations live here.
//!
//! # Modules
//!
//! - `inventory` - Property status machine and sale gating
//! - `subdivision` - Block-to-lot subdivision workflow with size conservation
//! - `sales` - Cash and installment sales ledger math
//! - `survey` - Survey job lifecycle and payment ledger
//! - `clients` - Client admission and soft-delete rules

pub mod clients;
pub mod inventory;
pub mod sales;
pub mod subdivision;
pub mod survey;

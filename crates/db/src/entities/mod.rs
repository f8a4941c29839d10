//! `SeaORM` entity definitions for the Terralot schema.

pub mod sea_orm_active_enums;

pub mod activity_logs;
pub mod agents;
pub mod clients;
pub mod installment_plans;
pub mod installments;
pub mod payment_plans;
pub mod properties;
pub mod property_transfers;
pub mod proposed_lots;
pub mod sale_payment_history;
pub mod sale_transactions;
pub mod service_dispatches;
pub mod service_jobs;
pub mod service_payment_history;
pub mod service_payments;

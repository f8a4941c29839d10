//! Initial database migration.
//!
//! Creates the full Terralot schema: enum types, inventory, subdivision,
//! client, sales, and service tables plus the audit trail.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: INVENTORY & SUBDIVISION
        // ============================================================
        db.execute_unprepared(PROPERTIES_SQL).await?;
        db.execute_unprepared(PROPOSED_LOTS_SQL).await?;

        // ============================================================
        // PART 3: PEOPLE
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(AGENTS_SQL).await?;

        // ============================================================
        // PART 4: SALES LEDGER
        // ============================================================
        db.execute_unprepared(PAYMENT_PLANS_SQL).await?;
        db.execute_unprepared(SALE_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(INSTALLMENT_PLANS_SQL).await?;
        db.execute_unprepared(INSTALLMENTS_SQL).await?;
        db.execute_unprepared(SALE_PAYMENT_HISTORY_SQL).await?;
        db.execute_unprepared(PROPERTY_TRANSFERS_SQL).await?;

        // ============================================================
        // PART 5: SERVICE JOBS
        // ============================================================
        db.execute_unprepared(SERVICE_JOBS_SQL).await?;
        db.execute_unprepared(SERVICE_PAYMENTS_SQL).await?;
        db.execute_unprepared(SERVICE_PAYMENT_HISTORY_SQL).await?;
        db.execute_unprepared(SERVICE_DISPATCHES_SQL).await?;

        // ============================================================
        // PART 6: AUDIT TRAIL
        // ============================================================
        db.execute_unprepared(ACTIVITY_LOGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Parcel kinds
CREATE TYPE property_kind AS ENUM ('block', 'lot');

-- Parcel lifecycle
CREATE TYPE property_status AS ENUM (
    'available',
    'booked',
    'sold',
    'unavailable'
);

-- Subdivision proposal lifecycle
CREATE TYPE lot_proposal_status AS ENUM ('proposed', 'confirmed', 'rejected');

-- Client soft-delete state
CREATE TYPE client_status AS ENUM ('active', 'inactive');

-- Sale payment modes
CREATE TYPE payment_mode AS ENUM ('cash', 'installments');

-- Scheduled installment state
CREATE TYPE installment_status AS ENUM ('outstanding', 'partially_paid', 'paid');

-- Survey job lifecycle
CREATE TYPE job_status AS ENUM ('ongoing', 'completed', 'dispatched', 'cancelled');

-- Service fee collection state
CREATE TYPE service_payment_status AS ENUM ('unpaid', 'partially_paid', 'paid');

-- Agent engagement state
CREATE TYPE agent_status AS ENUM ('active', 'inactive');
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    kind property_kind NOT NULL,
    title_deed_number VARCHAR(100) NOT NULL UNIQUE,
    location VARCHAR(255) NOT NULL,
    size NUMERIC(14, 3) NOT NULL,
    price NUMERIC(16, 2) NOT NULL,
    status property_status NOT NULL DEFAULT 'available',
    owner VARCHAR(255),
    description TEXT,
    telephone_number VARCHAR(30),
    email VARCHAR(255),
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_properties_size_non_negative CHECK (size >= 0),
    CONSTRAINT chk_properties_price_non_negative CHECK (price >= 0)
);

CREATE INDEX idx_properties_status ON properties(status);
CREATE INDEX idx_properties_kind ON properties(kind);
";

const PROPOSED_LOTS_SQL: &str = r"
CREATE TABLE proposed_lots (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent_block_id UUID NOT NULL REFERENCES properties(id),
    size NUMERIC(14, 3) NOT NULL,
    location VARCHAR(255) NOT NULL,
    surveyor_name VARCHAR(255),
    title_deed_number VARCHAR(100) NOT NULL,
    price NUMERIC(16, 2) NOT NULL,
    status lot_proposal_status NOT NULL DEFAULT 'proposed',
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    decided_at TIMESTAMPTZ,

    CONSTRAINT chk_proposed_lots_size_positive CHECK (size > 0)
);

CREATE INDEX idx_proposed_lots_parent ON proposed_lots(parent_block_id);
CREATE INDEX idx_proposed_lots_status ON proposed_lots(status);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    telephone_number VARCHAR(30) NOT NULL,
    email VARCHAR(255),
    status client_status NOT NULL DEFAULT 'active',
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- One active record per phone number; inactive rows may repeat it.
CREATE UNIQUE INDEX idx_clients_phone_active
    ON clients(telephone_number) WHERE status = 'active';
";

const AGENTS_SQL: &str = r"
CREATE TABLE agents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL UNIQUE,
    status agent_status NOT NULL DEFAULT 'active',
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PAYMENT_PLANS_SQL: &str = r"
CREATE TABLE payment_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    deposit_percentage NUMERIC(5, 2) NOT NULL,
    duration_months INTEGER NOT NULL,
    interest_rate NUMERIC(5, 2) NOT NULL,
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_payment_plans_deposit CHECK (deposit_percentage >= 0 AND deposit_percentage <= 100),
    CONSTRAINT chk_payment_plans_duration CHECK (duration_months >= 0),
    CONSTRAINT chk_payment_plans_rate CHECK (interest_rate >= 0)
);
";

const SALE_TRANSACTIONS_SQL: &str = r"
CREATE TABLE sale_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id),
    client_id UUID NOT NULL REFERENCES clients(id),
    agent_id UUID REFERENCES agents(id),
    payment_mode payment_mode NOT NULL,
    total_payable NUMERIC(16, 2) NOT NULL,
    total_amount_paid NUMERIC(16, 2) NOT NULL DEFAULT 0,
    discount NUMERIC(16, 2) NOT NULL DEFAULT 0,
    balance NUMERIC(16, 2) NOT NULL,
    transaction_date DATE NOT NULL,
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_sale_balance_identity CHECK (balance = total_payable - total_amount_paid),
    CONSTRAINT chk_sale_balance_non_negative CHECK (balance >= 0)
);

CREATE INDEX idx_sale_transactions_property ON sale_transactions(property_id);
CREATE INDEX idx_sale_transactions_client ON sale_transactions(client_id);
";

const INSTALLMENT_PLANS_SQL: &str = r"
CREATE TABLE installment_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sale_transaction_id UUID NOT NULL UNIQUE REFERENCES sale_transactions(id),
    payment_plan_id UUID NOT NULL REFERENCES payment_plans(id),
    financed_balance NUMERIC(16, 2) NOT NULL,
    monthly_amount NUMERIC(16, 2) NOT NULL,
    start_date DATE NOT NULL
);
";

const INSTALLMENTS_SQL: &str = r"
CREATE TABLE installments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    installment_plan_id UUID NOT NULL REFERENCES installment_plans(id),
    sequence INTEGER NOT NULL,
    due_date DATE NOT NULL,
    amount_due NUMERIC(16, 2) NOT NULL,
    amount_paid NUMERIC(16, 2) NOT NULL DEFAULT 0,
    status installment_status NOT NULL DEFAULT 'outstanding',

    CONSTRAINT uq_installments_plan_sequence UNIQUE (installment_plan_id, sequence),
    CONSTRAINT chk_installments_paid_within_due CHECK (amount_paid <= amount_due)
);

CREATE INDEX idx_installments_plan ON installments(installment_plan_id);
CREATE INDEX idx_installments_due ON installments(due_date);
";

const SALE_PAYMENT_HISTORY_SQL: &str = r"
CREATE TABLE sale_payment_history (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sale_transaction_id UUID NOT NULL REFERENCES sale_transactions(id),
    installment_id UUID REFERENCES installments(id),
    amount NUMERIC(16, 2) NOT NULL,
    reason VARCHAR(100) NOT NULL,
    recorded_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sale_payment_history_txn ON sale_payment_history(sale_transaction_id);
";

const PROPERTY_TRANSFERS_SQL: &str = r"
CREATE TABLE property_transfers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id),
    from_client_id UUID REFERENCES clients(id),
    to_client_id UUID NOT NULL REFERENCES clients(id),
    transfer_price NUMERIC(16, 2) NOT NULL,
    transfer_date DATE NOT NULL,
    supervising_agent_id UUID REFERENCES agents(id),
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_property_transfers_price_non_negative CHECK (transfer_price >= 0)
);

CREATE INDEX idx_property_transfers_property ON property_transfers(property_id);
";

const SERVICE_JOBS_SQL: &str = r"
CREATE TABLE service_jobs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    client_id UUID NOT NULL REFERENCES clients(id),
    description TEXT NOT NULL,
    title_name VARCHAR(255),
    title_number VARCHAR(100),
    fee NUMERIC(16, 2) NOT NULL,
    status job_status NOT NULL DEFAULT 'ongoing',
    brought_by VARCHAR(255),
    recorded_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_service_jobs_fee_non_negative CHECK (fee >= 0)
);

CREATE INDEX idx_service_jobs_client ON service_jobs(client_id);
CREATE INDEX idx_service_jobs_status ON service_jobs(status);
";

const SERVICE_PAYMENTS_SQL: &str = r"
CREATE TABLE service_payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    job_id UUID NOT NULL UNIQUE REFERENCES service_jobs(id),
    fee NUMERIC(16, 2) NOT NULL,
    amount_paid NUMERIC(16, 2) NOT NULL DEFAULT 0,
    balance NUMERIC(16, 2) NOT NULL,
    status service_payment_status NOT NULL DEFAULT 'unpaid',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_service_payments_identity CHECK (amount_paid + balance = fee)
);
";

const SERVICE_PAYMENT_HISTORY_SQL: &str = r"
CREATE TABLE service_payment_history (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    service_payment_id UUID NOT NULL REFERENCES service_payments(id),
    amount NUMERIC(16, 2) NOT NULL,
    payment_type VARCHAR(50) NOT NULL,
    recorded_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_service_payment_history_payment
    ON service_payment_history(service_payment_id);
";

const SERVICE_DISPATCHES_SQL: &str = r"
CREATE TABLE service_dispatches (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    job_id UUID NOT NULL UNIQUE REFERENCES service_jobs(id),
    reason TEXT,
    collected_by VARCHAR(255) NOT NULL,
    collector_phone VARCHAR(30),
    dispatched_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACTIVITY_LOGS_SQL: &str = r"
CREATE TABLE activity_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    actor VARCHAR(100) NOT NULL,
    action VARCHAR(100) NOT NULL,
    details TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_activity_logs_created ON activity_logs(created_at);
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

DROP TABLE IF EXISTS activity_logs CASCADE;
DROP TABLE IF EXISTS service_dispatches CASCADE;
DROP TABLE IF EXISTS service_payment_history CASCADE;
DROP TABLE IF EXISTS service_payments CASCADE;
DROP TABLE IF EXISTS service_jobs CASCADE;
DROP TABLE IF EXISTS property_transfers CASCADE;
DROP TABLE IF EXISTS sale_payment_history CASCADE;
DROP TABLE IF EXISTS installments CASCADE;
DROP TABLE IF EXISTS installment_plans CASCADE;
DROP TABLE IF EXISTS sale_transactions CASCADE;
DROP TABLE IF EXISTS payment_plans CASCADE;
DROP TABLE IF EXISTS agents CASCADE;
DROP TABLE IF EXISTS clients CASCADE;
DROP TABLE IF EXISTS proposed_lots CASCADE;
DROP TABLE IF EXISTS properties CASCADE;

DROP TYPE IF EXISTS agent_status;
DROP TYPE IF EXISTS service_payment_status;
DROP TYPE IF EXISTS job_status;
DROP TYPE IF EXISTS installment_status;
DROP TYPE IF EXISTS payment_mode;
DROP TYPE IF EXISTS client_status;
DROP TYPE IF EXISTS lot_proposal_status;
DROP TYPE IF EXISTS property_status;
DROP TYPE IF EXISTS property_kind;
";

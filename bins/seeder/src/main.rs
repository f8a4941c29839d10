//! Database seeder for Terralot development and testing.
//!
//! Seeds the standard payment plan templates plus a demo block, agent,
//! and client for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use terralot_db::entities::{
    agents, clients, payment_plans, properties,
    sea_orm_active_enums::{AgentStatus, ClientStatus, PropertyKind, PropertyStatus},
};

/// Demo block ID (consistent for all seeds)
const DEMO_BLOCK_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo client ID (consistent for all seeds)
const DEMO_CLIENT_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = terralot_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding payment plans...");
    seed_payment_plans(&db).await;

    println!("Seeding demo block...");
    seed_demo_block(&db).await;

    println!("Seeding demo agent...");
    seed_demo_agent(&db).await;

    println!("Seeding demo client...");
    seed_demo_client(&db).await;

    println!("Seeding complete!");
}

fn demo_block_id() -> Uuid {
    Uuid::parse_str(DEMO_BLOCK_ID).unwrap()
}

fn demo_client_id() -> Uuid {
    Uuid::parse_str(DEMO_CLIENT_ID).unwrap()
}

/// Seeds the standard installment plan templates.
async fn seed_payment_plans(db: &DatabaseConnection) {
    // (name, deposit %, months, annual interest %)
    let plans = [
        ("6 Months", Decimal::new(30, 0), 6, Decimal::new(10, 0)),
        ("12 Months", Decimal::new(25, 0), 12, Decimal::new(15, 0)),
        ("24 Months", Decimal::new(20, 0), 24, Decimal::new(20, 0)),
    ];

    for (name, deposit, months, rate) in plans {
        let exists = payment_plans::Entity::find()
            .filter(payment_plans::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            println!("  Plan {name} already exists, skipping...");
            continue;
        }

        let plan = payment_plans::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            deposit_percentage: Set(deposit),
            duration_months: Set(months),
            interest_rate: Set(rate),
            created_by: Set("seeder".to_string()),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = plan.insert(db).await {
            eprintln!("Failed to insert plan {name}: {e}");
        } else {
            println!("  Created plan: {name}");
        }
    }
}

/// Seeds a 10-acre demo block to subdivide.
async fn seed_demo_block(db: &DatabaseConnection) {
    if properties::Entity::find_by_id(demo_block_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo block already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let block = properties::ActiveModel {
        id: Set(demo_block_id()),
        kind: Set(PropertyKind::Block),
        title_deed_number: Set("BLOCK/DEMO/001".to_string()),
        location: Set("Riverside".to_string()),
        size: Set(Decimal::new(10, 0)),
        price: Set(Decimal::new(5_000_000, 0)),
        status: Set(PropertyStatus::Available),
        owner: Set(Some("Terralot Demo Estate".to_string())),
        description: Set(Some("Demo block for local development".to_string())),
        telephone_number: Set(None),
        email: Set(None),
        recorded_by: Set("seeder".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = block.insert(db).await {
        eprintln!("Failed to insert demo block: {e}");
    } else {
        println!("  Created demo block: BLOCK/DEMO/001 (10 acres)");
    }
}

/// Seeds a demo introducing agent.
async fn seed_demo_agent(db: &DatabaseConnection) {
    let exists = agents::Entity::find()
        .filter(agents::Column::Name.eq("Demo Agent"))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some();
    if exists {
        println!("  Demo agent already exists, skipping...");
        return;
    }

    let agent = agents::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Demo Agent".to_string()),
        status: Set(AgentStatus::Active),
        recorded_by: Set("seeder".to_string()),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = agent.insert(db).await {
        eprintln!("Failed to insert demo agent: {e}");
    } else {
        println!("  Created demo agent");
    }
}

/// Seeds a demo client.
async fn seed_demo_client(db: &DatabaseConnection) {
    if clients::Entity::find_by_id(demo_client_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo client already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let client = clients::ActiveModel {
        id: Set(demo_client_id()),
        name: Set("Demo Client".to_string()),
        telephone_number: Set("0700000000".to_string()),
        email: Set(Some("client@terralot.dev".to_string())),
        status: Set(ClientStatus::Active),
        recorded_by: Set("seeder".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = client.insert(db).await {
        eprintln!("Failed to insert demo client: {e}");
    } else {
        println!("  Created demo client: 0700000000");
    }
}

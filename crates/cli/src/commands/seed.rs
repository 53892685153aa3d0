//! Seed the database with demo data.
//!
//! Creates a demo store, one console user per role, a small product
//! catalog, a handful of pickup orders, storefront layout sections,
//! category icons, and the default text labels. Intended for local
//! development; refuses to run against a database that already has users.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use chrono::{Duration, Utc};
use secrecy::SecretString;
use tracing::info;

use curbside_admin::db::{
    self, EmployeeRepository, LayoutRepository, OrderRepository, ProductRepository,
    UserRepository,
};
use curbside_admin::db::employees::EmployeeFields;
use curbside_admin::db::orders::NewOrderItem;
use curbside_admin::db::products::ProductFields;
use curbside_admin::services::auth;
use curbside_core::{Email, EmployeeStatus, OrderStatus, Price, Role, StoreId};

const DEMO_PASSWORD: &str = "curbside-demo";

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn demo_data() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ADMIN_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let existing_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
        .fetch_one(&pool)
        .await?;
    if existing_users > 0 {
        return Err("Database already has users; refusing to seed".into());
    }

    // Store
    let store_id: i32 =
        sqlx::query_scalar("INSERT INTO store (name) VALUES ($1) RETURNING id")
            .bind("Curbside Market - Downtown")
            .fetch_one(&pool)
            .await?;
    let store = StoreId::new(store_id);
    info!(store_id, "Created demo store");

    // Users, one per console role
    let users = UserRepository::new(&pool);
    let password_hash = auth::hash_password(DEMO_PASSWORD)?;
    let accounts = [
        ("sysadmin@example.com", "Sys", "Admin", Role::SysAdmin, None),
        ("admin@example.com", "Dana", "Reyes", Role::Admin, Some(store)),
        ("employee@example.com", "Riley", "Chen", Role::Employee, Some(store)),
    ];
    for (email, first, last, role, store_id) in accounts {
        let email = Email::parse(email)?;
        users
            .create(&email, first, last, role, store_id, &password_hash)
            .await?;
        info!(email = email.as_str(), %role, "Created user");
    }
    info!("Demo password for all users: {DEMO_PASSWORD}");

    // Products
    let products = ProductRepository::new(&pool);
    let catalog = [
        ("Bananas (bunch)", 129, "Produce", "PRD-0001", true),
        ("Honeycrisp Apples 3lb", 549, "Produce", "PRD-0002", true),
        ("Whole Milk 1gal", 389, "Dairy", "PRD-0003", true),
        ("Sharp Cheddar 8oz", 449, "Dairy", "PRD-0004", true),
        ("Sourdough Loaf", 499, "Bakery", "PRD-0005", true),
        ("Ground Coffee 12oz", 899, "Pantry", "PRD-0006", false),
        ("Spaghetti 16oz", 179, "Pantry", "PRD-0007", true),
        ("Chicken Breast 1lb", 649, "Meat", "PRD-0008", true),
    ];
    for (name, cents, category, sku, in_stock) in catalog {
        products
            .create(&ProductFields {
                name: name.to_owned(),
                price: Price::from_cents(cents),
                category: category.to_owned(),
                sku: sku.to_owned(),
                in_stock,
            })
            .await?;
    }
    info!(count = catalog.len(), "Created products");

    // Employees
    let employees = EmployeeRepository::new(&pool);
    let roster = [
        ("Riley", "Chen", "riley.chen@example.com", "555-0101", "Picker"),
        ("Jordan", "Park", "jordan.park@example.com", "555-0102", "Runner"),
        ("Casey", "Nguyen", "casey.nguyen@example.com", "555-0103", "Shift Lead"),
    ];
    for (first, last, email, phone, position) in roster {
        employees
            .create(
                store,
                &EmployeeFields {
                    first_name: first.to_owned(),
                    last_name: last.to_owned(),
                    email: Email::parse(email)?,
                    phone: phone.to_owned(),
                    position: position.to_owned(),
                    status: EmployeeStatus::Active,
                },
            )
            .await?;
    }
    info!(count = roster.len(), "Created employees");

    // Orders: a mix of today's queue and recent history
    let orders = OrderRepository::new(&pool);
    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);
    let order_specs = [
        ("ORD-1001", "Alice Morgan", today, OrderStatus::Pending),
        ("ORD-1002", "Ben Castillo", today, OrderStatus::Pending),
        ("ORD-1003", "Carla Diaz", today, OrderStatus::Ready),
        ("ORD-1004", "Devon Lee", yesterday, OrderStatus::Completed),
        ("ORD-1005", "Erin Walsh", yesterday, OrderStatus::Cancelled),
    ];
    for (reference, customer, placed_on, status) in order_specs {
        let items = vec![
            NewOrderItem {
                product_name: "Bananas (bunch)".to_owned(),
                quantity: 2,
                unit_price: Price::from_cents(129),
            },
            NewOrderItem {
                product_name: "Whole Milk 1gal".to_owned(),
                quantity: 1,
                unit_price: Price::from_cents(389),
            },
        ];
        orders
            .create(reference, customer, placed_on, status, &items)
            .await?;
    }
    info!(count = order_specs.len(), "Created orders");

    // Layout sections
    let layout = LayoutRepository::new(&pool);
    for name in ["Featured", "Weekly Deals", "New Arrivals", "Seasonal"] {
        layout.add(name).await?;
    }
    info!("Created layout sections");

    // Category icons and text labels have no repository create path; the
    // console only edits existing rows, so seed them directly.
    let icons = [
        ("Produce", "https://cdn.example.com/icons/produce.svg"),
        ("Dairy", "https://cdn.example.com/icons/dairy.svg"),
        ("Bakery", "https://cdn.example.com/icons/bakery.svg"),
        ("Pantry", "https://cdn.example.com/icons/pantry.svg"),
        ("Meat", "https://cdn.example.com/icons/meat.svg"),
    ];
    for (name, image_url) in icons {
        sqlx::query("INSERT INTO category_icon (name, image_url) VALUES ($1, $2)")
            .bind(name)
            .bind(image_url)
            .execute(&pool)
            .await?;
    }

    let labels = [
        ("home.hero.title", "Groceries, ready when you are", "Storefront hero heading"),
        ("home.hero.subtitle", "Order ahead, pick up curbside", "Storefront hero subheading"),
        ("pickup.instructions", "Park in a numbered spot and tap 'I'm here'", "Shown on the pickup confirmation screen"),
        ("footer.support", "Questions? support@curbside.example", "Footer support line"),
    ];
    for (key, value, description) in labels {
        sqlx::query("INSERT INTO app_label (key, value, description) VALUES ($1, $2, $3)")
            .bind(key)
            .bind(value)
            .bind(description)
            .execute(&pool)
            .await?;
    }
    info!("Created icons and labels");

    info!("Seeding complete!");
    Ok(())
}

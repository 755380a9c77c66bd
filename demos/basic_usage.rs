use userhaus::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 userhaus basic usage\n");

    // Database setup: in-memory SQLite, schema applied at startup
    let config = DatabaseConfig::default();
    let pool = db::connect(&config).await?;
    migration::apply_schema(&pool).await?;
    db::health_check(&pool).await?;
    println!("✅ Database connected");

    let store = SqliteUserStore::new(pool);

    // Create a couple of users; ids and timestamps come from the store
    let ada = store.create(User::new("Ada", "Lovelace")).await?;
    let grace = store.create(User::new("Grace", "Murray")).await?;
    println!("✅ Created {} and {}", ada.entity.id, grace.entity.id);

    // Fetch one back by id
    let fetched = store.fetch_by_id(&ada.entity.id).await?;
    println!(
        "🔎 Fetched {} {} (created {})",
        fetched.user.first_name, fetched.user.last_name, fetched.entity.created_at
    );

    // Partial update: empty fields keep their stored value
    let updated = store
        .update(&grace.entity.id, User::new("", "Hopper"))
        .await?;
    println!(
        "✏️  Updated to {} {} (updated {})",
        updated.user.first_name, updated.user.last_name, updated.entity.updated_at
    );

    // List all active users in insertion order
    let users = store.fetch_all().await?;
    println!("📋 {} active users:", users.len());
    for user in &users {
        println!("   - {} {} [{}]", user.user.first_name, user.user.last_name, user.entity.id);
    }

    Ok(())
}

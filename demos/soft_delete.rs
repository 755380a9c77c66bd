use userhaus::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 userhaus soft deletion\n");

    let pool = db::connect(&DatabaseConfig::default()).await?;
    migration::apply_schema(&pool).await?;

    let store = SqliteUserStore::new(pool);

    let ada = store.create(User::new("Ada", "Lovelace")).await?;
    let grace = store.create(User::new("Grace", "Hopper")).await?;
    println!("✅ Created two users");

    // Soft-delete keeps the row but hides it from every read
    store.delete(&ada.entity.id).await?;
    println!("🗑️  Deleted {}", ada.entity.id);

    let users = store.fetch_all().await?;
    println!("📋 {} user(s) remain visible:", users.len());
    for user in &users {
        println!("   - {} {}", user.user.first_name, user.user.last_name);
    }

    // A deleted user is distinguishable from one that never existed
    match store.fetch_by_id(&ada.entity.id).await {
        Err(StoreError::Deleted) => println!("✅ Fetching the deleted user reports the tombstone"),
        other => println!("❓ Unexpected outcome: {other:?}"),
    }

    // Writes refuse the tombstone as well
    match store.update(&ada.entity.id, User::new("A", "L")).await {
        Err(StoreError::Deleted) => println!("✅ Updates refuse the deleted user"),
        other => println!("❓ Unexpected outcome: {other:?}"),
    }

    // Deletion is not idempotent: a second delete is an error
    match store.delete(&ada.entity.id).await {
        Err(StoreError::Deleted) => println!("✅ A second delete reports the tombstone"),
        other => println!("❓ Unexpected outcome: {other:?}"),
    }

    // The survivor is untouched
    let fetched = store.fetch_by_id(&grace.entity.id).await?;
    println!(
        "🔎 {} {} is still active",
        fetched.user.first_name, fetched.user.last_name
    );

    Ok(())
}

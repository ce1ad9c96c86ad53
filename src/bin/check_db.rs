use sqlx::postgres::PgPool;
use std::env;

use dotenvy;

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    println!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    for table in ["scenarios", "diagnosis_runs"] {
        let result = sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&pool)
            .await;

        match result {
            Ok((count,)) => println!("✅ {} table exists ({} rows)", table, count),
            Err(e) => println!("❌ {} table NOT FOUND: {}", table, e),
        }
    }

    println!("\nChecking _sqlx_migrations table...");
    let migrations = sqlx::query_as::<_, (i64, String)>(
        "SELECT version, description FROM _sqlx_migrations ORDER BY version DESC",
    )
    .fetch_all(&pool)
    .await;

    match migrations {
        Ok(migrations) => {
            println!("✅ Applied migrations:");
            for (version, description) in migrations {
                println!("  - {} {}", version, description);
            }
        }
        Err(e) => println!("❌ Error querying _sqlx_migrations: {}", e),
    }

    Ok(())
}

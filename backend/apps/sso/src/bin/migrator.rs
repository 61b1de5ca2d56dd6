//! Schema Migrator
//!
//! Applies the embedded migrations to an SQLite file without starting the
//! server.

use std::path::PathBuf;

use anyhow::Context;
use auth::SqliteStore;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "sso-migrator", about = "Apply SSO schema migrations")]
struct Args {
    /// Path to the SQLite database file
    #[arg(long, env = "SSO_STORAGE_PATH")]
    storage_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth=info".into()),
        )
        .init();

    let args = Args::parse();

    let store = SqliteStore::connect(&args.storage_path)
        .await
        .with_context(|| format!("opening {}", args.storage_path.display()))?;
    let applied = store.migrate().await.context("applying migrations")?;
    store.close().await;

    if applied == 0 {
        println!("no migrations to apply");
    } else {
        println!("migrations applied: {applied}");
    }

    Ok(())
}

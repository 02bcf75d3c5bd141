// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};

pub async fn create_db_pool(db_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {}", db_url))?;
    }

    let pool = SqlitePool::connect(db_url)
        .await
        .with_context(|| format!("Failed to connect to {}", db_url))?;

    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    Ok(())
}

/// Single-connection in-memory pool so every query sees the migrated schema.
#[cfg(test)]
pub async fn create_test_pool() -> Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

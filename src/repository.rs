// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Currency, LookupCriteria};

const CURRENCY_COLUMNS: &str = "id, name, current_exchange_rate, base, created_at, updated_at";

/// Storage operations the currency service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    /// One window of currencies in insertion order, plus the total row count.
    async fn count_and_slice(&self, skip: u32, take: u32) -> Result<(Vec<Currency>, u64)>;

    /// First currency whose id or name matches any supplied criterion.
    async fn find_one(&self, criteria: &LookupCriteria) -> Result<Option<Currency>>;

    /// Insert a currency, or only replace its rate if the name already exists.
    async fn upsert_rate(&self, name: &str, rate: f64, base: bool) -> Result<()>;
}

#[derive(Clone)]
pub struct SqliteCurrencyRepository {
    pool: SqlitePool,
}

impl SqliteCurrencyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyRepository for SqliteCurrencyRepository {
    async fn count_and_slice(&self, skip: u32, take: u32) -> Result<(Vec<Currency>, u64)> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM currencies")
            .fetch_one(&self.pool)
            .await?;

        let currencies = sqlx::query_as::<_, Currency>(&format!(
            r#"
            SELECT {}
            FROM currencies
            ORDER BY rowid
            LIMIT ? OFFSET ?
            "#,
            CURRENCY_COLUMNS
        ))
        .bind(i64::from(take))
        .bind(i64::from(skip))
        .fetch_all(&self.pool)
        .await?;

        Ok((currencies, count.max(0) as u64))
    }

    async fn find_one(&self, criteria: &LookupCriteria) -> Result<Option<Currency>> {
        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM currencies", CURRENCY_COLUMNS));

        let mut separator = " WHERE ";
        if let Some(id) = criteria.id() {
            query.push(separator).push("id = ").push_bind(id.to_string());
            separator = " OR ";
        }
        if let Some(name) = criteria.name() {
            query.push(separator).push("name = ").push_bind(name.to_string());
        }
        query.push(" ORDER BY rowid LIMIT 1");

        let currency = query
            .build_query_as::<Currency>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(currency)
    }

    async fn upsert_rate(&self, name: &str, rate: f64, base: bool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO currencies (id, name, current_exchange_rate, base)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                current_exchange_rate = excluded.current_exchange_rate,
                -- bookkeeping only, base and id keep their stored values
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(rate)
        .bind(base)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use approx::assert_relative_eq;

    async fn seeded_repository() -> anyhow::Result<SqliteCurrencyRepository> {
        let pool = db::create_test_pool().await?;
        let repository = SqliteCurrencyRepository::new(pool);

        repository.upsert_rate("PLN", 1.0, true).await?;
        repository.upsert_rate("EUR", 0.2342, false).await?;
        repository.upsert_rate("USD", 0.2747, false).await?;

        Ok(repository)
    }

    #[tokio::test]
    async fn test_count_and_slice() -> anyhow::Result<()> {
        let repository = seeded_repository().await?;

        let (currencies, count) = repository.count_and_slice(0, 2).await?;
        assert_eq!(count, 3);
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[0].name, "PLN");
        assert_eq!(currencies[1].name, "EUR");

        let (currencies, count) = repository.count_and_slice(2, 2).await?;
        assert_eq!(count, 3);
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].name, "USD");

        let (currencies, count) = repository.count_and_slice(10, 2).await?;
        assert_eq!(count, 3);
        assert!(currencies.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_find_one() -> anyhow::Result<()> {
        let repository = seeded_repository().await?;

        let eur = repository
            .find_one(&LookupCriteria::by_name("EUR"))
            .await?
            .expect("EUR should exist");
        assert_eq!(eur.name, "EUR");
        assert!(!eur.base);

        let by_id = repository.find_one(&LookupCriteria::by_id(&eur.id)).await?;
        assert_eq!(by_id, Some(eur.clone()));

        // Either criterion is enough to match
        let either = repository
            .find_one(&LookupCriteria {
                id: Some("not-an-id".to_string()),
                name: Some("EUR".to_string()),
            })
            .await?;
        assert_eq!(either.map(|c| c.name), Some("EUR".to_string()));

        let missing = repository.find_one(&LookupCriteria::by_name("GBP")).await?;
        assert!(missing.is_none());

        let unconstrained = repository.find_one(&LookupCriteria::default()).await?;
        assert_eq!(unconstrained.map(|c| c.name), Some("PLN".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_find_one_ignores_empty_strings() -> anyhow::Result<()> {
        let repository = seeded_repository().await?;

        // Blank fields fall through to the unconstrained lookup
        let blank = repository
            .find_one(&LookupCriteria {
                id: None,
                name: Some(String::new()),
            })
            .await?;
        assert_eq!(blank.map(|c| c.name), Some("PLN".to_string()));

        let blank_id = repository
            .find_one(&LookupCriteria {
                id: Some(String::new()),
                name: Some("USD".to_string()),
            })
            .await?;
        assert_eq!(blank_id.map(|c| c.name), Some("USD".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_find_one_on_empty_store() -> anyhow::Result<()> {
        let repository = SqliteCurrencyRepository::new(db::create_test_pool().await?);

        assert!(repository
            .find_one(&LookupCriteria::by_name("EUR"))
            .await?
            .is_none());
        assert!(repository
            .find_one(&LookupCriteria::default())
            .await?
            .is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_only_updates_rate() -> anyhow::Result<()> {
        let repository = SqliteCurrencyRepository::new(db::create_test_pool().await?);

        repository.upsert_rate("EUR", 4.25, true).await?;
        let original = repository
            .find_one(&LookupCriteria::by_name("EUR"))
            .await?
            .unwrap();

        repository.upsert_rate("EUR", 4.30, false).await?;
        repository.upsert_rate("EUR", 4.30, false).await?;

        let (currencies, count) = repository.count_and_slice(0, 10).await?;
        assert_eq!(count, 1);
        let updated = &currencies[0];
        assert_eq!(updated.id, original.id);
        assert_relative_eq!(updated.current_exchange_rate, 4.30, epsilon = 0.00001);
        assert!(updated.base, "base flag must survive a conflicting upsert");

        Ok(())
    }
}

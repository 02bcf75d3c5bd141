// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use tracing::{Instrument, Span};

use crate::api::ExchangeRateSource;
use crate::error::{CurrencyError, RateFetchError, Result};
use crate::models::{Currency, ExchangeRateUpdate, LookupCriteria, Page, PageMeta, PageRequest};
use crate::repository::CurrencyRepository;

pub const EUR: &str = "EUR";
pub const USD: &str = "USD";

/// Rows created by `seed`: (name, rate, base). Rates are PLN based.
pub const DEFAULT_CURRENCIES: [(&str, f64, bool); 3] =
    [("PLN", 1.0, true), (EUR, 0.0, false), (USD, 0.0, false)];

/// Currency listing, lookup and exchange rate maintenance.
#[derive(Clone)]
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepository>,
    rates: Arc<dyn ExchangeRateSource>,
    span: Span,
}

impl CurrencyService {
    /// Every event the service logs is recorded inside `span`.
    pub fn new(
        repository: Arc<dyn CurrencyRepository>,
        rates: Arc<dyn ExchangeRateSource>,
        span: Span,
    ) -> Self {
        Self {
            repository,
            rates,
            span,
        }
    }

    pub async fn list_currencies(&self, page: &PageRequest) -> Result<Page<Currency>> {
        async {
            let (data, item_count) = self
                .repository
                .count_and_slice(page.skip(), page.take())
                .await?;
            tracing::debug!(
                skip = page.skip(),
                take = page.take(),
                item_count,
                "Listed currencies"
            );

            Ok::<_, CurrencyError>(Page {
                data,
                meta: PageMeta::new(page, item_count),
            })
        }
        .instrument(self.span.clone())
        .await
    }

    /// Returns `None` when no currency matches. An empty `criteria` is not
    /// rejected; it yields the first stored currency.
    pub async fn find_currency(&self, criteria: &LookupCriteria) -> Result<Option<Currency>> {
        async {
            if criteria.is_empty() {
                tracing::warn!("Currency lookup without criteria returns an arbitrary row");
            }
            self.repository.find_one(criteria).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn upsert_exchange_rate(&self, name: &str, rate: f64, base: bool) -> Result<()> {
        async {
            self.repository.upsert_rate(name, rate, base).await?;
            tracing::debug!(currency = name, rate, base, "Upserted exchange rate");
            Ok::<_, CurrencyError>(())
        }
        .instrument(self.span.clone())
        .await
    }

    /// Fetch EUR and USD quotes concurrently and turn each into a mid-rate.
    ///
    /// Fails as a whole if either quote cannot be fetched or carries no
    /// bid/ask pair.
    pub async fn fetch_live_exchange_rates(&self) -> Result<Vec<ExchangeRateUpdate>> {
        async {
            self.try_fetch_live_exchange_rates().await.map_err(|e| {
                tracing::error!(error = ?e, "Error fetching foreign exchange rates");
                CurrencyError::ExchangeRatesNotFound(e)
            })
        }
        .instrument(self.span.clone())
        .await
    }

    async fn try_fetch_live_exchange_rates(
        &self,
    ) -> std::result::Result<Vec<ExchangeRateUpdate>, RateFetchError> {
        let (eur, usd) =
            futures::try_join!(self.rates.fetch_quote(EUR), self.rates.fetch_quote(USD))?;

        [eur, usd]
            .into_iter()
            .map(|quote| -> std::result::Result<ExchangeRateUpdate, RateFetchError> {
                let rate = quote
                    .rates
                    .first()
                    .ok_or_else(|| RateFetchError::MissingRates {
                        currency: quote.code.clone(),
                    })?;
                Ok(ExchangeRateUpdate {
                    current_exchange_rate: rate.mid_rate(),
                    name: quote.code,
                })
            })
            .collect()
    }

    /// Fetch live rates and store each of them. Nothing is written when the
    /// fetch fails.
    pub async fn sync_exchange_rates(&self) -> Result<Vec<ExchangeRateUpdate>> {
        let updates = self.fetch_live_exchange_rates().await?;
        for update in &updates {
            self.upsert_exchange_rate(&update.name, update.current_exchange_rate, false)
                .await?;
        }
        tracing::info!(parent: &self.span, count = updates.len(), "Exchange rates synced");
        Ok(updates)
    }

    /// Create the default currencies that are not stored yet. Returns the
    /// names that were created.
    pub async fn seed_currencies(&self) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for (name, rate, base) in DEFAULT_CURRENCIES {
            if self
                .find_currency(&LookupCriteria::by_name(name))
                .await?
                .is_some()
            {
                continue;
            }
            self.upsert_exchange_rate(name, rate, base).await?;
            created.push(name.to_string());
        }
        Ok(created)
    }
}

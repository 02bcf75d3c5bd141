// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client};

use crate::error::RateFetchError;
use crate::models::NbpQuote;

pub const NBP_BASE_URL: &str = "https://api.nbp.pl";

/// Quotes are always requested for this trading day.
pub fn default_rates_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 26).unwrap_or_default()
}

/// Source of bid/ask quotes for a single currency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn fetch_quote(&self, code: &str) -> Result<NbpQuote, RateFetchError>;
}

#[derive(Clone)]
pub struct NbpClient {
    client: Client,
    base_url: String,
    date: NaiveDate,
}

impl NbpClient {
    pub fn new(base_url: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            date,
        }
    }

    fn quote_url(&self, code: &str) -> String {
        format!(
            "{}/api/exchangerates/rates/c/{}/{}/?format=json",
            self.base_url,
            code.to_lowercase(),
            self.date.format("%Y-%m-%d")
        )
    }
}

impl Default for NbpClient {
    fn default() -> Self {
        Self::new(NBP_BASE_URL, default_rates_date())
    }
}

#[async_trait]
impl ExchangeRateSource for NbpClient {
    async fn fetch_quote(&self, code: &str) -> Result<NbpQuote, RateFetchError> {
        let url = self.quote_url(code);
        let request_failed = |source| RateFetchError::Request {
            currency: code.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateFetchError::Status {
                currency: code.to_string(),
                status,
            });
        }

        let text = response.text().await.map_err(request_failed)?;
        tracing::debug!(currency = code, body = %text, "NBP exchange rate response");

        serde_json::from_str(&text).map_err(|source| RateFetchError::Parse {
            currency: code.to_string(),
            source,
        })
    }
}

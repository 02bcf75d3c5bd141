// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain errors for the currency service.
//!
//! Lookups that match nothing are not errors; they come back as `Ok(None)`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurrencyError>;

#[derive(Error, Debug)]
pub enum CurrencyError {
    /// Any failure while fetching or validating live NBP rates.
    #[error("Foreign exchange rates not found")]
    ExchangeRatesNotFound(#[source] RateFetchError),

    #[error("Database operation failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),
}

/// Why a single NBP quote could not be obtained.
#[derive(Error, Debug)]
pub enum RateFetchError {
    #[error("request for {currency} rates failed")]
    Request {
        currency: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{currency} rates request returned status {status}")]
    Status {
        currency: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to parse {currency} rates response")]
    Parse {
        currency: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{currency} rates response contains no bid/ask pair")]
    MissingRates { currency: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_keeps_cause() {
        let err = CurrencyError::ExchangeRatesNotFound(RateFetchError::MissingRates {
            currency: "USD".to_string(),
        });

        assert_eq!(err.to_string(), "Foreign exchange rates not found");
        let source = err.source().expect("cause should be preserved");
        assert_eq!(
            source.to_string(),
            "USD rates response contains no bid/ask pair"
        );
    }
}

use serde::{Deserialize, Serialize};

/// Table C quote for one currency as returned by the NBP API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NbpQuote {
    #[allow(dead_code)]
    pub table: Option<String>,
    #[allow(dead_code)]
    pub currency: Option<String>,
    pub code: String,
    pub rates: Vec<NbpRate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NbpRate {
    #[allow(dead_code)]
    pub no: Option<String>,
    #[serde(rename = "effectiveDate")]
    #[allow(dead_code)]
    pub effective_date: Option<String>,
    pub bid: f64,
    pub ask: f64,
}

impl NbpRate {
    /// Reciprocal of the bid/ask average. NBP quotes PLN per unit of foreign
    /// currency, the stored rate is foreign currency per PLN.
    pub fn mid_rate(&self) -> f64 {
        1.0 / ((self.bid + self.ask) / 2.0)
    }
}

/// A rate ready to be stored against a currency name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateUpdate {
    pub name: String,
    pub current_exchange_rate: f64,
}

pub mod nbp_client;

pub use nbp_client::{default_rates_date, ExchangeRateSource, NbpClient, NBP_BASE_URL};

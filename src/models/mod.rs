// Re-export model modules
mod currencies;
mod exchange_rates;
mod pagination;

pub use currencies::*;
pub use exchange_rates::*;
pub use pagination::*;

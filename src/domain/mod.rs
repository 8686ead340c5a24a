// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod allocation;
pub mod currency;
mod errors;
pub mod exchange_rate;
pub mod money;

pub use currency::{default_pattern, Currency, DEFAULT_SYMBOL};
pub use errors::{MoneyError, MoneyResult};
pub use exchange_rate::ExchangeRate;
pub use money::Money;

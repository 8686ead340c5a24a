// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod codec;
mod currency_lookup;
mod exchange;

pub use codec::{MoneyData, MoneyDecoder, MoneyEncoder, PatternDecoder, PatternEncoder};
pub use currency_lookup::CurrencyLookup;
pub use exchange::ExchangeRateSource;

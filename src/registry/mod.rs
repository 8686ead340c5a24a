// ============================================================================
// Registry Module
// Currency lookup tables
// ============================================================================

mod common;
mod currency_registry;

pub use common::common_currencies;
pub use currency_registry::CurrencyRegistry;

// ============================================================================
// Utilities Module
// Helpers shared by demos, benches and embedding applications
// ============================================================================

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "logging")]
pub use logging::init as init_logging;

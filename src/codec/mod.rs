// ============================================================================
// Codec Module
// Default implementations of the text and serialization codec interfaces
// ============================================================================

#[cfg(feature = "serde")]
mod json;
mod pattern;

#[cfg(feature = "serde")]
pub use json::JsonCodec;
pub(crate) use pattern::CompiledPattern;
pub use pattern::PatternCodec;

//! Response normalization.
//!
//! Maps provider responses into the small, stable result records returned by
//! tools. Every field gets a deterministic default when the provider omits it.

pub mod open_access;
pub mod scholar;

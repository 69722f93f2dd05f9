//! Data models: provider response shapes, normalized results and tool inputs.
//!
//! Provider models use `#[serde(default)]` on every field so partial
//! responses still deserialize.

pub mod core_api;
mod de;
mod inputs;
mod scholar;
pub mod serpapi;

pub use inputs::*;
pub use scholar::*;

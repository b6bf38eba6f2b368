//! Shared value types for the stagecraft engine.
//!
//! # Invariants
//! - Sprite ids are random v4 UUIDs and never reused.
//! - Every type here persists field-for-field as it lives in memory.

pub mod types;

pub use types::{Anchor, ImageSize, SpriteId};

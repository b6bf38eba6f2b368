//! Sprite Registry: the authoritative ordered collection of on-screen sprites.
//!
//! # Invariants
//! - Every sprite id in the collection is unique.
//! - Insertion order is the only draw/update order; `layer` is stored, never sorted on.
//! - Sprites are created only through the registry and never come back once removed.
//! - Deferred image-size updates re-resolve by id and are dropped if the sprite is gone.

pub mod config;
pub mod narrative;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod save;

pub use config::SpriteDefaults;
pub use narrative::NarrativeController;
pub use record::SpriteRecord;
pub use registry::SpriteRegistry;
pub use resolver::{ImageResolver, ResolveError, StaticImageResolver};
pub use save::{SaveError, SpriteStoreSave};

pub fn crate_info() -> &'static str {
    "stagecraft-sprites v0.1.0"
}

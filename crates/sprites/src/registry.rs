use stagecraft_common::{ImageSize, SpriteId};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::SpriteDefaults;
use crate::narrative::NarrativeController;
use crate::record::SpriteRecord;
use crate::resolver::ImageResolver;
use crate::save::SpriteStoreSave;

/// The collection shared by every clone of a registry handle.
#[derive(Debug)]
struct RegistryState {
    sprites: Vec<SpriteRecord>,
    defaults: SpriteDefaults,
}

impl RegistryState {
    fn position(&self, id: SpriteId) -> Option<usize> {
        self.sprites.iter().position(|s| s.id == id)
    }

    fn find_mut(&mut self, id: SpriteId) -> Option<&mut SpriteRecord> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    /// Draw an id that no held sprite uses.
    fn fresh_id(&self) -> SpriteId {
        loop {
            let id = SpriteId::new();
            if self.position(id).is_none() {
                return id;
            }
        }
    }
}

/// The authoritative ordered collection of on-screen sprites.
///
/// A `SpriteRegistry` is a handle: clones share one collection, so the
/// rendering, input and save subsystems each receive a clone at startup.
/// Records are addressed by [`SpriteId`]; [`SpriteRegistry::with_sprite_mut`]
/// mutates the canonical record in place.
///
/// The registry is single-threaded. [`SpriteRegistry::create_sprite`] spawns
/// the image-size request with `tokio::task::spawn_local`, so it must be
/// called from inside a `tokio::task::LocalSet`.
#[derive(Clone)]
pub struct SpriteRegistry {
    state: Rc<RefCell<RegistryState>>,
    resolver: Rc<dyn ImageResolver>,
    controller: Rc<dyn NarrativeController>,
}

impl SpriteRegistry {
    /// Create an empty registry with the stock sprite defaults.
    pub fn new(
        resolver: Rc<dyn ImageResolver>,
        controller: Rc<dyn NarrativeController>,
    ) -> Self {
        Self::with_defaults(resolver, controller, SpriteDefaults::default())
    }

    pub fn with_defaults(
        resolver: Rc<dyn ImageResolver>,
        controller: Rc<dyn NarrativeController>,
        defaults: SpriteDefaults,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                sprites: Vec::new(),
                defaults,
            })),
            resolver,
            controller,
        }
    }

    /// Number of sprites in the collection.
    pub fn len(&self) -> usize {
        self.state.borrow().sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().sprites.is_empty()
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.state.borrow().position(id).is_some()
    }

    /// Copy of the collection in draw order.
    pub fn sprites(&self) -> Vec<SpriteRecord> {
        self.state.borrow().sprites.clone()
    }

    /// Create a sprite at `(x, y)` and append it as the last-drawn entry.
    ///
    /// Returns immediately with a placeholder size. The real image dimensions
    /// are requested in the background and written to the sprite only if it is
    /// still in the collection when they arrive.
    pub fn create_sprite(&self, image: impl Into<String>, x: f32, y: f32) -> SpriteRecord {
        let image = image.into();
        let record = {
            let mut state = self.state.borrow_mut();
            let id = state.fresh_id();
            let record = SpriteRecord::new(id, image.clone(), x, y, &state.defaults);
            state.sprites.push(record.clone());
            record
        };
        tracing::trace!(id = %record.id, %image, "sprite created");
        self.request_image_size(record.id, image);
        record
    }

    fn request_image_size(&self, id: SpriteId, image: String) {
        let state = Rc::downgrade(&self.state);
        let resolver = Rc::clone(&self.resolver);
        tokio::task::spawn_local(async move {
            match resolver.resolve(&image).await {
                Ok(size) => apply_resolved_size(&state, id, size),
                Err(e) => tracing::warn!(%id, "keeping placeholder size: {e}"),
            }
        });
    }

    /// Copy of the sprite with the given id, if it is in the collection.
    pub fn get_sprite(&self, id: SpriteId) -> Option<SpriteRecord> {
        self.state.borrow().sprites.iter().find(|s| s.id == id).cloned()
    }

    /// Mutate the canonical record in place. Returns `None` if the id is absent.
    ///
    /// `f` must not call back into the registry.
    pub fn with_sprite_mut<R>(
        &self,
        id: SpriteId,
        f: impl FnOnce(&mut SpriteRecord) -> R,
    ) -> Option<R> {
        self.state.borrow_mut().find_mut(id).map(f)
    }

    /// Remove a sprite from the collection. Returns the removed record.
    ///
    /// Deleting a sprite that is not present logs a warning and changes nothing.
    pub fn delete_sprite(&self, sprite: &SpriteRecord) -> Option<SpriteRecord> {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.position(sprite.id) else {
            tracing::warn!("sprite {} not found in sprite registry", sprite.id);
            return None;
        };
        Some(state.sprites.remove(index))
    }

    /// React to a click on `sprite`. Returns true if a label jump was issued.
    ///
    /// Acts on the record as passed in; membership in the collection is not checked.
    pub fn click_sprite(&self, sprite: &SpriteRecord) -> bool {
        let Some(label) = sprite.on_click.as_deref() else {
            return false;
        };
        tracing::debug!(id = %sprite.id, label, "sprite clicked");
        self.controller.jump_to_label(label);
        true
    }

    /// Snapshot the collection for a save game. The snapshot is an independent copy.
    pub fn generate_save_data(&self) -> SpriteStoreSave {
        SpriteStoreSave {
            sprites: self.sprites(),
        }
    }

    /// Replace the whole collection with a saved snapshot.
    pub fn load_save_data(&self, data: SpriteStoreSave) {
        let mut state = self.state.borrow_mut();
        state.sprites = data.sprites;
        tracing::debug!(count = state.sprites.len(), "sprites restored from save");
    }

    /// Clear the collection for a new session.
    ///
    /// In-flight size requests are not cancelled; they find nothing and drop themselves.
    pub fn reset(&self) {
        self.state.borrow_mut().sprites.clear();
    }
}

impl fmt::Debug for SpriteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SpriteRegistry")
            .field("sprites", &state.sprites.len())
            .field("defaults", &state.defaults)
            .finish_non_exhaustive()
    }
}

/// Continuation of a size request: re-resolve by id against the current collection.
fn apply_resolved_size(state: &Weak<RefCell<RegistryState>>, id: SpriteId, size: ImageSize) {
    let Some(state) = state.upgrade() else {
        return;
    };
    match state.borrow_mut().find_mut(id) {
        Some(sprite) => sprite.apply_image_size(size),
        None => tracing::debug!(%id, "sprite removed before its image resolved"),
    }
}

use serde::{Deserialize, Serialize};

use crate::record::SpriteRecord;

/// Errors crossing the save serialization boundary.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sprite section of a saved game session.
///
/// Holds the records exactly as they live in the registry, in draw order.
/// No versioning or migration is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteStoreSave {
    pub sprites: Vec<SpriteRecord>,
}

impl SpriteStoreSave {
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Duplicate ids are not checked; the snapshot is trusted.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_common::{Anchor, SpriteId};

    const SAVED: &str = r#"{
        "sprites": [
            {
                "id": "6f1c1a52-3a5e-4d0e-9f57-0b8c3f6f4a11",
                "x": 120,
                "y": 80.5,
                "anchor": { "x": 0, "y": 1 },
                "width": 64,
                "height": 32,
                "image": "portraits/alice.png",
                "opacity": 0.75,
                "scale": 2,
                "layer": 4,
                "onClick": "talkToAlice"
            },
            {
                "id": "a3d9e0b2-55c4-4e8b-8d0e-1c2f3a4b5c6d",
                "x": 0,
                "y": 0,
                "anchor": { "x": 0.5, "y": 0.5 },
                "width": 1,
                "height": 1,
                "image": "bg/forest.png",
                "opacity": 1,
                "scale": 1,
                "layer": 0
            }
        ]
    }"#;

    #[test]
    fn parses_saved_session() {
        let save = SpriteStoreSave::from_json(SAVED).unwrap();
        assert_eq!(save.len(), 2);

        let alice = &save.sprites[0];
        assert_eq!(alice.id.to_string(), "6f1c1a52-3a5e-4d0e-9f57-0b8c3f6f4a11");
        assert_eq!(alice.anchor, Anchor::new(0.0, 1.0));
        assert_eq!(alice.on_click.as_deref(), Some("talkToAlice"));
        assert_eq!(alice.layer, 4);

        let forest = &save.sprites[1];
        assert_eq!(forest.image, "bg/forest.png");
        assert!(forest.on_click.is_none());
    }

    #[test]
    fn json_preserves_order_and_fields() {
        let save = SpriteStoreSave::from_json(SAVED).unwrap();
        let reparsed = SpriteStoreSave::from_json(&save.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, save);
        let ids: Vec<SpriteId> = reparsed.sprites.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![save.sprites[0].id, save.sprites[1].id]);
    }

    #[test]
    fn duplicate_ids_are_accepted() {
        let save = SpriteStoreSave::from_json(SAVED).unwrap();
        let mut dup = save.clone();
        dup.sprites.push(save.sprites[0].clone());
        let parsed = SpriteStoreSave::from_json(&dup.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SpriteStoreSave::from_json(r#"{ "sprites": 3 }"#).unwrap_err();
        assert!(matches!(err, SaveError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn empty_save() {
        let save = SpriteStoreSave::default();
        assert!(save.is_empty());
        assert_eq!(save.to_json().unwrap(), r#"{"sprites":[]}"#);
    }
}

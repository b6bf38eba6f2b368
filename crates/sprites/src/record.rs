use glam::Vec2;
use serde::{Deserialize, Serialize};
use stagecraft_common::{Anchor, ImageSize, SpriteId};

use crate::config::SpriteDefaults;

/// One visible sprite instance.
///
/// The serialized shape is the persisted save format; there is no separate
/// save schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteRecord {
    pub id: SpriteId,
    pub x: f32,
    pub y: f32,
    pub anchor: Anchor,
    pub width: f32,
    pub height: f32,
    pub image: String,
    pub opacity: f32,
    pub scale: f32,
    pub layer: i32,
    /// Label to jump to when clicked. `None` means the sprite is not interactive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
}

impl SpriteRecord {
    /// Build a fresh record from the registry defaults. Only the registry calls this.
    pub(crate) fn new(
        id: SpriteId,
        image: String,
        x: f32,
        y: f32,
        defaults: &SpriteDefaults,
    ) -> Self {
        Self {
            id,
            x,
            y,
            anchor: defaults.anchor,
            width: defaults.placeholder.width.max(1) as f32,
            height: defaults.placeholder.height.max(1) as f32,
            image,
            opacity: defaults.opacity,
            scale: defaults.scale,
            layer: defaults.layer,
            on_click: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Unscaled size in scene units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Overwrite the placeholder with resolved dimensions, never going below 1×1.
    pub(crate) fn apply_image_size(&mut self, size: ImageSize) {
        self.width = size.width.max(1) as f32;
        self.height = size.height.max(1) as f32;
    }

    pub fn is_interactive(&self) -> bool {
        self.on_click.is_some()
    }

    /// Axis-aligned scene rectangle `(min, max)` covered by the sprite, with
    /// scale applied around the anchor point.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let extent = self.size() * self.scale;
        let min = self.position() - extent * Vec2::from(self.anchor);
        (min, min + extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SpriteRecord {
        SpriteRecord::new(
            SpriteId::new(),
            "img/door.png".into(),
            100.0,
            50.0,
            &SpriteDefaults::default(),
        )
    }

    #[test]
    fn new_record_uses_defaults() {
        let r = record();
        assert_eq!(r.anchor, Anchor::CENTER);
        assert_eq!(r.size(), Vec2::ONE);
        assert_eq!(r.opacity, 1.0);
        assert_eq!(r.scale, 1.0);
        assert_eq!(r.layer, 0);
        assert!(!r.is_interactive());
    }

    #[test]
    fn bounds_centered_on_position() {
        let mut r = record();
        r.width = 20.0;
        r.height = 10.0;
        let (min, max) = r.bounds();
        assert_eq!(min, Vec2::new(90.0, 45.0));
        assert_eq!(max, Vec2::new(110.0, 55.0));
    }

    #[test]
    fn bounds_respect_scale_and_anchor() {
        let mut r = record();
        r.width = 20.0;
        r.height = 10.0;
        r.scale = 2.0;
        r.anchor = Anchor::TOP_LEFT;
        let (min, max) = r.bounds();
        assert_eq!(min, Vec2::new(100.0, 50.0));
        assert_eq!(max, Vec2::new(140.0, 70.0));
    }

    #[test]
    fn set_position_moves_record() {
        let mut r = record();
        r.set_position(Vec2::new(3.0, 4.0));
        assert_eq!((r.x, r.y), (3.0, 4.0));
    }

    #[test]
    fn serialized_field_names() {
        let mut r = record();
        r.on_click = Some("sceneTwo".into());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["onClick"], "sceneTwo");
        assert_eq!(json["anchor"]["x"], 0.5);
        assert_eq!(json["image"], "img/door.png");

        r.on_click = None;
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("onClick").is_none());
    }
}

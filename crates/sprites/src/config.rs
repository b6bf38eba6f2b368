use serde::{Deserialize, Serialize};
use stagecraft_common::{Anchor, ImageSize};

/// Field values given to every newly created sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteDefaults {
    /// Pivot within the bounding box.
    pub anchor: Anchor,
    pub opacity: f32,
    pub scale: f32,
    /// Draw-order key. Stored only; the registry never sorts on it.
    pub layer: i32,
    /// Size held until the image resolver reports real dimensions.
    /// Dimensions below 1 are raised to 1.
    pub placeholder: ImageSize,
}

impl Default for SpriteDefaults {
    fn default() -> Self {
        Self {
            anchor: Anchor::CENTER,
            opacity: 1.0,
            scale: 1.0,
            layer: 0,
            placeholder: ImageSize::PLACEHOLDER,
        }
    }
}

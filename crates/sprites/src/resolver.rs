use async_trait::async_trait;
use stagecraft_common::ImageSize;
use std::collections::HashMap;

/// Errors reported by an image resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("failed to resolve image {image}: {reason}")]
    Failed { image: String, reason: String },
}

/// Asynchronous source of intrinsic image dimensions.
///
/// Futures are polled on the registry's thread, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait ImageResolver {
    async fn resolve(&self, image: &str) -> Result<ImageSize, ResolveError>;
}

/// Resolver backed by a fixed table of known image sizes.
#[derive(Debug, Clone, Default)]
pub struct StaticImageResolver {
    sizes: HashMap<String, ImageSize>,
}

impl StaticImageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the size reported for `image`.
    pub fn insert(&mut self, image: impl Into<String>, size: ImageSize) {
        self.sizes.insert(image.into(), size);
    }

    pub fn with(mut self, image: impl Into<String>, size: ImageSize) -> Self {
        self.insert(image, size);
        self
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[async_trait(?Send)]
impl ImageResolver for StaticImageResolver {
    async fn resolve(&self, image: &str) -> Result<ImageSize, ResolveError> {
        self.sizes
            .get(image)
            .copied()
            .ok_or_else(|| ResolveError::NotFound(image.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_resolver_known_image() {
        let resolver = StaticImageResolver::new().with("bg.png", ImageSize::new(640, 480));
        assert_eq!(resolver.len(), 1);
        assert_eq!(
            resolver.resolve("bg.png").await,
            Ok(ImageSize::new(640, 480))
        );
    }

    #[tokio::test]
    async fn static_resolver_unknown_image() {
        let resolver = StaticImageResolver::new();
        assert!(resolver.is_empty());
        assert_eq!(
            resolver.resolve("missing.png").await,
            Err(ResolveError::NotFound("missing.png".into()))
        );
    }

    #[test]
    fn error_messages() {
        let e = ResolveError::Failed {
            image: "a.png".into(),
            reason: "decode".into(),
        };
        assert_eq!(e.to_string(), "failed to resolve image a.png: decode");
    }
}
